use blake3::Hasher;

/// Normalizes free-text query input for fingerprinting.
///
/// Trims, collapses internal whitespace, and lowercases, so cosmetic variants
/// of the same query share a cache entry. Returns an empty string for blank
/// input; callers short-circuit on that instead of fingerprinting it.
pub fn normalize_query(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Computes the cache key for a search result set.
///
/// The fingerprint is a BLAKE3 hash over `(generation, normalized query,
/// limit)` with explicit separators, truncated to 64 bits and rendered as a
/// stable hex key. Because the generation participates in the hash, bumping it
/// makes every previously written key unaddressable without touching the keys
/// themselves.
///
/// # Truncation Rationale
///
/// 64 bits of BLAKE3 output give a birthday-bound collision probability of
/// roughly `n² / 2^65` for `n` distinct live queries, negligible at any
/// realistic query volume. A collision returns one query's cached ranking for
/// another until the entry expires; the higher layers tolerate that, so the
/// full 256-bit digest is not needed here.
pub fn fingerprint(generation: u64, normalized_query: &str, limit: usize) -> String {
    let mut hasher = Hasher::new();
    hasher.update(&generation.to_le_bytes());
    hasher.update(b"|");
    hasher.update(normalized_query.as_bytes());
    hasher.update(b"|");
    hasher.update(&(limit as u64).to_le_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    format!("search:{:016x}", u64::from_le_bytes(bytes))
}
