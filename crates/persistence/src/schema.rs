//! Identity-store schema naming.
//!
//! The identity tables are created by an external identity library with
//! fixed logical names. Each storage engine may rewrite the physical table
//! names to suit its conventions (see
//! [`StorageEngine::update_identity_table_names`](crate::engines::StorageEngine::update_identity_table_names)).

use std::collections::BTreeMap;
use std::fmt;

/// The identity-store tables whose names a storage engine may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentityTable {
    /// User accounts.
    Users,
    /// Claims attached to users.
    UserClaims,
    /// External login providers linked to users.
    UserLogins,
    /// Authentication tokens issued to users.
    UserTokens,
}

impl IdentityTable {
    /// All identity tables.
    pub const ALL: [IdentityTable; 4] = [
        IdentityTable::Users,
        IdentityTable::UserClaims,
        IdentityTable::UserLogins,
        IdentityTable::UserTokens,
    ];

    /// Returns the table name used when no engine rewrites it.
    pub fn default_name(&self) -> &'static str {
        match self {
            IdentityTable::Users => "AspNetUsers",
            IdentityTable::UserClaims => "AspNetUserClaims",
            IdentityTable::UserLogins => "AspNetUserLogins",
            IdentityTable::UserTokens => "AspNetUserTokens",
        }
    }
}

impl fmt::Display for IdentityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.default_name())
    }
}

/// Physical names of the identity tables.
///
/// # Examples
///
/// ```
/// use meridian_persistence::schema::{IdentitySchema, IdentityTable};
///
/// let mut schema = IdentitySchema::default();
/// assert_eq!(schema.table_name(IdentityTable::Users), "AspNetUsers");
///
/// schema.rename_all(|name| name.to_lowercase());
/// assert_eq!(schema.table_name(IdentityTable::Users), "aspnetusers");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySchema {
    tables: BTreeMap<IdentityTable, String>,
}

impl Default for IdentitySchema {
    fn default() -> Self {
        Self {
            tables: IdentityTable::ALL
                .iter()
                .map(|table| (*table, table.default_name().to_string()))
                .collect(),
        }
    }
}

impl IdentitySchema {
    /// Returns the physical name of a table.
    pub fn table_name(&self, table: IdentityTable) -> &str {
        self.tables
            .get(&table)
            .map(String::as_str)
            .unwrap_or_else(|| table.default_name())
    }

    /// Renames a single table.
    pub fn rename(&mut self, table: IdentityTable, name: impl Into<String>) {
        self.tables.insert(table, name.into());
    }

    /// Renames every table by applying `f` to its current name.
    pub fn rename_all(&mut self, f: impl Fn(&str) -> String) {
        for name in self.tables.values_mut() {
            *name = f(name);
        }
    }

    /// Iterates over `(table, physical name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (IdentityTable, &str)> {
        self.tables.iter().map(|(table, name)| (*table, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let schema = IdentitySchema::default();
        assert_eq!(schema.iter().count(), 4);
        assert_eq!(schema.table_name(IdentityTable::UserTokens), "AspNetUserTokens");
    }

    #[test]
    fn test_rename_single() {
        let mut schema = IdentitySchema::default();
        schema.rename(IdentityTable::UserClaims, "claims");
        assert_eq!(schema.table_name(IdentityTable::UserClaims), "claims");
        assert_eq!(schema.table_name(IdentityTable::Users), "AspNetUsers");
    }
}
