//! SQL Server storage engine.

use super::StorageEngine;

/// SQL Server adapter. Uses connection strings and identity names as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerEngine;

impl SqlServerEngine {
    /// Registry identifier.
    pub const NAME: &'static str = "sqlserver";
}

impl StorageEngine for SqlServerEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self) -> &str {
        "SQL Server"
    }
}
