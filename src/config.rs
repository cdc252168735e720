/// Limits applied by the traversal engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    lookahead: usize,
    max_vacant_depth: usize,
}

pub const DEFAULT_LOOKAHEAD: usize = 4096;
pub const DEFAULT_MAX_VACANT_DEPTH: usize = 64;

impl Default for Config {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            max_vacant_depth: DEFAULT_MAX_VACANT_DEPTH,
        }
    }
}

impl Config {
    /// Bytes handed to a decode hook when reading from a stream. A single
    /// custom-encoded value larger than this cannot be decoded from a stream.
    /// Never zero.
    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// How many absent references may be materialised inside one another,
    /// on encode and on decode. Self-referential types never bottom out
    /// otherwise.
    pub fn max_vacant_depth(&self) -> usize {
        self.max_vacant_depth
    }

    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead.max(1);
        self
    }

    pub fn with_max_vacant_depth(mut self, depth: usize) -> Self {
        self.max_vacant_depth = depth;
        self
    }
}
