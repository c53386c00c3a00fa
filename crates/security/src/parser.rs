//! Structured permission policy names.
//!
//! ```text
//! Entity:Permission:Role1,Role2[:RequireEntityId]
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SecurityError;

/// Segment separator.
pub const SEGMENT_SEPARATOR: char = ':';

/// Role separator within the roles segment.
pub const ROLE_SEPARATOR: char = ',';

/// Fourth-segment literal that requires an entity ID.
pub const REQUIRE_ENTITY_ID: &str = "RequireEntityId";

/// A parsed permission policy name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequirement {
    /// Entity the permission applies to, e.g. `Module`.
    pub entity_name: String,
    /// Permission name, e.g. `View`.
    pub permission_name: String,
    /// Roles granted the permission.
    pub roles: BTreeSet<String>,
    /// Whether the check needs a specific entity ID.
    pub require_entity_id: bool,
}

impl PermissionRequirement {
    /// Returns `true` if `role` is one of the granted roles.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

impl fmt::Display for PermissionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: Vec<&str> = self.roles.iter().map(String::as_str).collect();
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.entity_name,
            self.permission_name,
            roles.join(","),
            sep = SEGMENT_SEPARATOR
        )?;
        if self.require_entity_id {
            write!(f, "{}{}", SEGMENT_SEPARATOR, REQUIRE_ENTITY_ID)?;
        }
        Ok(())
    }
}

impl FromStr for PermissionRequirement {
    type Err = SecurityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).ok_or_else(|| SecurityError::InvalidPolicyName {
            name: s.to_string(),
        })
    }
}

/// Parses a structured policy name.
///
/// Returns `None` when the name has fewer than three segments. Only a name
/// with exactly four segments whose last is `RequireEntityId` sets
/// `require_entity_id`; any other fourth segment is ignored, as is every
/// segment past the fourth. Empty role names are dropped.
///
/// # Examples
///
/// ```
/// use meridian_security::parse;
///
/// let requirement = parse("Module:Edit:Administrators,Editors:RequireEntityId").unwrap();
/// assert_eq!(requirement.entity_name, "Module");
/// assert_eq!(requirement.permission_name, "Edit");
/// assert!(requirement.has_role("Editors"));
/// assert!(requirement.require_entity_id);
///
/// assert!(parse("NoColonHere").is_none());
/// ```
pub fn parse(name: &str) -> Option<PermissionRequirement> {
    let segments: Vec<&str> = name.split(SEGMENT_SEPARATOR).collect();
    let [entity, permission, roles, rest @ ..] = segments.as_slice() else {
        return None;
    };

    Some(PermissionRequirement {
        entity_name: entity.to_string(),
        permission_name: permission.to_string(),
        roles: roles
            .split(ROLE_SEPARATOR)
            .filter(|role| !role.is_empty())
            .map(String::from)
            .collect(),
        require_entity_id: matches!(rest, [flag] if *flag == REQUIRE_ENTITY_ID),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_three_segments() {
        let req = parse("Module:Edit:Administrators").unwrap();
        assert_eq!(req.entity_name, "Module");
        assert_eq!(req.permission_name, "Edit");
        assert_eq!(req.roles, roles(&["Administrators"]));
        assert!(!req.require_entity_id);
    }

    #[test]
    fn test_four_segments_with_flag() {
        let req = parse("Module:Edit:Administrators,Editors:RequireEntityId").unwrap();
        assert_eq!(req.roles, roles(&["Administrators", "Editors"]));
        assert!(req.require_entity_id);
    }

    #[test]
    fn test_four_segments_wrong_literal() {
        let req = parse("Module:Edit:Administrators:Foo").unwrap();
        assert_eq!(req, parse("Module:Edit:Administrators").unwrap());
    }

    #[test]
    fn test_flag_is_case_sensitive() {
        let req = parse("Module:Edit:Administrators:requireentityid").unwrap();
        assert!(!req.require_entity_id);
    }

    #[test]
    fn test_too_few_segments() {
        assert!(parse("NoColonHere").is_none());
        assert!(parse("A:B").is_none());
        assert!(parse("").is_none());
    }

    #[test]
    fn test_five_segments_ignore_extras() {
        let req = parse("Module:Edit:Administrators:RequireEntityId:Extra").unwrap();
        assert_eq!(req.entity_name, "Module");
        assert_eq!(req.roles, roles(&["Administrators"]));
        assert!(!req.require_entity_id);
    }

    #[test]
    fn test_role_order_and_duplicates_irrelevant() {
        assert_eq!(
            parse("Page:View:Editors,Administrators,Editors"),
            parse("Page:View:Administrators,Editors")
        );
    }

    #[test]
    fn test_empty_roles_dropped() {
        let req = parse("Page:View:,Editors,").unwrap();
        assert_eq!(req.roles, roles(&["Editors"]));
        assert!(parse("Page:View:").unwrap().roles.is_empty());
    }

    #[test]
    fn test_display_is_canonical() {
        let req = parse("Module:Edit:Editors,Administrators:RequireEntityId").unwrap();
        assert_eq!(
            req.to_string(),
            "Module:Edit:Administrators,Editors:RequireEntityId"
        );
    }

    #[test]
    fn test_from_str() {
        assert!("Module:View:Administrators".parse::<PermissionRequirement>().is_ok());
        assert_eq!(
            "A:B".parse::<PermissionRequirement>(),
            Err(SecurityError::InvalidPolicyName {
                name: "A:B".to_string()
            })
        );
    }
}
