//! Determinism checks for digest-producing functions.

use envprint_core::Digest;

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether every run produced the same digest.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Digest of the first run.
    pub digest: Digest,
    /// Index of the first run whose digest differed.
    pub first_mismatch: Option<usize>,
}

/// Runs `produce` `runs` times and compares the digests.
///
/// # Panics
/// Panics if `runs` is zero.
pub fn verify_determinism<F>(mut produce: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> Digest,
{
    assert!(runs > 0, "at least one run is required");
    let digest = produce();
    let first_mismatch = (1..runs).find(|_| produce() != digest);
    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        digest,
        first_mismatch,
    }
}
