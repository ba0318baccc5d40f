//! Transposition table for caching search results
//!
//! Direct-mapped, depth-preferred table keyed by the 32-bit position hash.
//! Each entry records the score together with a bound flag: `Exact` for a
//! fully resolved window, `UpperBound` for a fail-low (the true score is at
//! most the stored one), `LowerBound` for a fail-high (at least the stored
//! one). A probe only trusts entries searched at least as deep as the
//! caller.

/// Interpretation of a stored score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// The search completed inside the window
    Exact,
    /// Fail-high: true score >= stored score
    LowerBound,
    /// Fail-low: true score <= stored score
    UpperBound,
}

/// One table slot
#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub hash: u32,
    pub depth: u8,
    pub score: i32,
    pub entry_type: EntryType,
}

/// Direct-mapped transposition table. Collisions are resolved by a
/// depth-preferred replacement policy.
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TtEntry>>();
        let size = ((size_mb * 1024 * 1024) / entry_size).max(1024);
        Self {
            entries: vec![None; size],
            size,
        }
    }

    /// Probe for a usable score.
    ///
    /// Returns the stored score for an `Exact` entry, the window edge when a
    /// bound entry proves a cutoff (`beta` for a lower bound at or above it,
    /// `alpha` for an upper bound at or below it), and `None` otherwise.
    #[must_use]
    pub fn probe(&self, hash: u32, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let idx = hash as usize % self.size;
        let entry = self.entries[idx]?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }
        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(beta),
            EntryType::UpperBound if entry.score <= alpha => Some(alpha),
            _ => None,
        }
    }

    /// Store a result. Replaces the slot when it is empty, holds the same
    /// position, or holds a shallower search.
    pub fn store(&mut self, hash: u32, depth: u8, score: i32, entry_type: EntryType) {
        let idx = hash as usize % self.size;
        let should_replace = match &self.entries[idx] {
            None => true,
            Some(existing) => existing.hash == hash || existing.depth <= depth,
        };
        if should_replace {
            self.entries[idx] = Some(TtEntry {
                hash,
                depth,
                score,
                entry_type,
            });
        }
    }

    /// Drop every entry. Called when a new whole-engine search begins.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Occupancy statistics
    #[must_use]
    pub fn stats(&self) -> TtStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TtStats {
            size: self.size,
            used,
        }
    }
}

/// Table usage counters
#[derive(Debug, Clone, Copy)]
pub struct TtStats {
    pub size: usize,
    pub used: usize,
}
