//! Registry configuration

/// Tuning knobs for the registry and its query engine
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Page size used when a query carries no `limit`
    pub default_page_size: usize,

    /// Hard ceiling on `limit`; larger requests are clamped
    pub max_page_size: usize,

    /// Compiled-size bound (bytes) for free-text filter patterns; patterns
    /// exceeding it match nothing
    pub regex_size_limit: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            regex_size_limit: 256 * 1024, // 256KB
        }
    }
}

impl RegistryConfig {
    /// Set the default page size (floor of 1)
    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Set the maximum page size (floor of 1)
    pub fn max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size.max(1);
        self
    }

    /// Set the compiled-size bound for filter patterns
    pub fn regex_size_limit(mut self, bytes: usize) -> Self {
        self.regex_size_limit = bytes;
        self
    }
}
