use serde::{Deserialize, Serialize};

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProgress {
    /// Deck length for this pass.
    pub total: usize,
    /// Cards completed so far (the cursor).
    pub completed: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
