use crate::semantic::Interval;

/// Registry-wide settings for a [`crate::Model`]
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Declare unknown names on first reference instead of failing
    pub auto_declare: bool,

    /// Domain given to variables declared without an explicit interval
    pub default_domain: Interval,

    /// Maximum expression nesting accepted when reading source text
    /// Real usage: ~5 levels, Limit: 100
    pub max_expression_depth: usize,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            auto_declare: true,
            default_domain: Interval::default(),
            max_expression_depth: 100,
        }
    }
}

impl ModelOptions {
    /// Create a new ModelOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_declare(mut self, auto_declare: bool) -> Self {
        self.auto_declare = auto_declare;
        self
    }

    pub fn with_default_domain(mut self, domain: Interval) -> Self {
        self.default_domain = domain;
        self
    }

    pub fn with_max_expression_depth(mut self, depth: usize) -> Self {
        self.max_expression_depth = depth;
        self
    }
}
