//! MySQL storage engine.

use super::StorageEngine;
use crate::schema::IdentitySchema;

/// MySQL adapter. Identity table names are lower-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlEngine;

impl MySqlEngine {
    /// Registry identifier.
    pub const NAME: &'static str = "mysql";
}

impl StorageEngine for MySqlEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self) -> &str {
        "MySQL"
    }

    fn update_identity_table_names(&self, schema: &mut IdentitySchema) {
        schema.rename_all(|name| name.to_lowercase());
    }
}
