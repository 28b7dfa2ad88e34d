use crate::constants::DEFAULT_MAX_DECODE_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Deepest batch nesting the decoder expands before failing
    pub max_decode_depth: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            max_decode_depth: DEFAULT_MAX_DECODE_DEPTH,
        }
    }
}
