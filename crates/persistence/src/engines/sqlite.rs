//! SQLite storage engine.

use super::StorageEngine;

/// SQLite adapter.
///
/// Templates may store either a full `Data Source=...` connection string or a
/// bare database file path; bare paths are wrapped into a connection string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteEngine;

impl SqliteEngine {
    /// Registry identifier.
    pub const NAME: &'static str = "sqlite";
}

impl StorageEngine for SqliteEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self) -> &str {
        "SQLite"
    }

    fn shape_connection_string(&self, connection_string: &str) -> String {
        let trimmed = connection_string.trim();
        if trimmed.contains('=') {
            trimmed.to_string()
        } else {
            format!("Data Source={}", trimmed)
        }
    }
}
