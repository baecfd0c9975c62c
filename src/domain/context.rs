//! Explicit setup handle handed to [`Config`](crate::domain::config::Config) at construction.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewContext {
    verbose: bool,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, stores built from this context warn about lookups that miss.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
