/// Configuration options for the tree walk.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Maximum depth to recurse (None = unlimited)
    pub max_depth: Option<usize>,

    /// Follow symbolic links
    pub follow_symlinks: bool,
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum recursion depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}
