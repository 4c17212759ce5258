use crate::catalog::ScoredMovie;

/// Response header naming the tier that produced a result set.
pub const SEARCH_SOURCE_HEADER: &str = "X-Cine-Source";

/// Which tier answered a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchSource {
    /// Served from the result cache.
    Cache,
    /// Ranked by the external vector index.
    Index,
    /// Ranked by the in-memory scan fallback.
    Scan,
}

impl SearchSource {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            SearchSource::Cache => "CACHE",
            SearchSource::Index => "INDEX",
            SearchSource::Scan => "SCAN",
        }
    }
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}

/// Successful result of a semantic search call.
///
/// A blank query is not an error; it short-circuits to [`NoQuery`] before any
/// embedding or retrieval work happens.
///
/// [`NoQuery`]: SearchOutcome::NoQuery
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was blank; nothing was computed.
    NoQuery,
    /// A ranked (possibly empty) result list.
    Ranked {
        hits: Vec<ScoredMovie>,
        source: SearchSource,
    },
}

impl SearchOutcome {
    pub fn hits(&self) -> &[ScoredMovie] {
        match self {
            SearchOutcome::NoQuery => &[],
            SearchOutcome::Ranked { hits, .. } => hits,
        }
    }

    pub fn source(&self) -> Option<SearchSource> {
        match self {
            SearchOutcome::NoQuery => None,
            SearchOutcome::Ranked { source, .. } => Some(*source),
        }
    }

    pub fn is_no_query(&self) -> bool {
        matches!(self, SearchOutcome::NoQuery)
    }
}
