//! PostgreSQL storage engine.
//!
//! PostgreSQL folds unquoted identifiers to lower case, so identity tables are
//! renamed to lower snake case (`AspNetUsers` becomes `asp_net_users`).

use heck::ToSnakeCase;

use super::StorageEngine;
use crate::schema::IdentitySchema;

/// PostgreSQL adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresEngine;

impl PostgresEngine {
    /// Registry identifier.
    pub const NAME: &'static str = "postgresql";
}

impl StorageEngine for PostgresEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self) -> &str {
        "PostgreSQL"
    }

    fn update_identity_table_names(&self, schema: &mut IdentitySchema) {
        schema.rename_all(|name| name.to_snake_case());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IdentityTable;

    #[test]
    fn test_identity_names_rewritten() {
        let mut schema = IdentitySchema::default();
        PostgresEngine.update_identity_table_names(&mut schema);
        assert_eq!(schema.table_name(IdentityTable::Users), "asp_net_users");
        assert_eq!(
            schema.table_name(IdentityTable::UserClaims),
            "asp_net_user_claims"
        );
        assert_eq!(
            schema.table_name(IdentityTable::UserLogins),
            "asp_net_user_logins"
        );
        assert_eq!(
            schema.table_name(IdentityTable::UserTokens),
            "asp_net_user_tokens"
        );
    }

    #[test]
    fn test_renamed_schema_is_stable() {
        let mut schema = IdentitySchema::default();
        PostgresEngine.update_identity_table_names(&mut schema);
        let once = schema.clone();
        PostgresEngine.update_identity_table_names(&mut schema);
        assert_eq!(schema, once);
    }

    #[test]
    fn test_connection_string_unchanged() {
        let conn = "Host=db;Database=acme;Username=app";
        assert_eq!(PostgresEngine.shape_connection_string(conn), conn);
    }
}
