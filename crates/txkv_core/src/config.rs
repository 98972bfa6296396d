//! Store configuration.

/// Configuration for constructing a store.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Initial capacity reserved for the committed map.
    pub initial_capacity: usize,

    /// Capacity reserved for each transaction's staging layer.
    pub transaction_capacity: usize,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity of the committed map.
    #[must_use]
    pub const fn initial_capacity(mut self, value: usize) -> Self {
        self.initial_capacity = value;
        self
    }

    /// Sets the capacity reserved for each transaction's staging layer.
    #[must_use]
    pub const fn transaction_capacity(mut self, value: usize) -> Self {
        self.transaction_capacity = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.initial_capacity, 0);
        assert_eq!(config.transaction_capacity, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().initial_capacity(64).transaction_capacity(8);
        assert_eq!(config.initial_capacity, 64);
        assert_eq!(config.transaction_capacity, 8);
    }
}
