//! Context options populated by the configurator.

/// Options a context is built with.
///
/// The configurator calls [`ContextOptions::use_storage_engine`] once the
/// binding is complete; an options value that was never populated is what a
/// later persistence call reports as unconfigured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOptions {
    storage_engine: Option<String>,
    connection_string: Option<String>,
}

impl ContextOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a storage engine and its shaped connection string.
    pub fn use_storage_engine(
        &mut self,
        storage_engine: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> &mut Self {
        self.storage_engine = Some(storage_engine.into());
        self.connection_string = Some(connection_string.into());
        self
    }

    /// Returns `true` once a storage engine has been bound.
    pub fn is_configured(&self) -> bool {
        self.storage_engine.is_some()
    }

    /// Returns the bound storage-engine identifier.
    pub fn storage_engine(&self) -> Option<&str> {
        self.storage_engine.as_deref()
    }

    /// Returns the bound, engine-shaped connection string.
    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_storage_engine() {
        let mut options = ContextOptions::new();
        assert!(!options.is_configured());

        options.use_storage_engine("sqlite", "Data Source=a.db");
        assert!(options.is_configured());
        assert_eq!(options.storage_engine(), Some("sqlite"));
        assert_eq!(options.connection_string(), Some("Data Source=a.db"));
    }
}
