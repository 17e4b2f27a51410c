/// Default maximum nesting of arrays and objects, e.g. `[[[]]]` is 3 levels.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How `true`, `false` and `null` are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Keywords {
    /// The literal must be spelled exactly.
    #[default]
    Exact,
    /// Any run of the literal's letters is accepted as that literal, so
    /// `ture` reads as `true` and `nul` as `null`.
    Permissive,
}

/// Options for JSON parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Keyword matching mode (default: exact)
    pub keywords: Keywords,
    /// Deepest nesting of arrays and objects accepted (default: 128)
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keywords: Keywords::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Shorthand for `keywords(Keywords::Permissive)`.
    pub fn permissive_keywords(self) -> Self {
        self.keywords(Keywords::Permissive)
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
