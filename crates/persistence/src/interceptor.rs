//! Pre-save hooks.
//!
//! Every commit through a [`TenantDbContext`](crate::context::TenantDbContext)
//! first passes its pending changes to a [`SaveInterceptor`], on both the
//! blocking and the async path.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Audit field: user who created the entity.
pub const CREATED_BY: &str = "createdBy";
/// Audit field: creation timestamp (RFC 3339).
pub const CREATED_ON: &str = "createdOn";
/// Audit field: user who last modified the entity.
pub const MODIFIED_BY: &str = "modifiedBy";
/// Audit field: last modification timestamp (RFC 3339).
pub const MODIFIED_ON: &str = "modifiedOn";

/// State of a tracked entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeState {
    /// The entity will be inserted.
    Added,
    /// The entity will be updated.
    Modified,
    /// The entity will be deleted.
    Deleted,
}

/// A single tracked entity awaiting commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingChange {
    /// Entity type name.
    pub entity: String,
    /// What the commit will do with it.
    pub state: ChangeState,
    /// Whether the entity carries audit fields.
    #[serde(default)]
    pub auditable: bool,
    /// Field values.
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl PendingChange {
    /// Creates a pending change with no field values.
    pub fn new(entity: impl Into<String>, state: ChangeState) -> Self {
        Self {
            entity: entity.into(),
            state,
            auditable: false,
            values: Map::new(),
        }
    }

    /// Marks the entity as carrying audit fields.
    pub fn auditable(mut self) -> Self {
        self.auditable = true;
        self
    }

    /// Sets a field value.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Returns a field value as a string slice.
    pub fn str_value(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(Value::as_str)
    }
}

/// The set of changes a single commit will persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingChanges(Vec<PendingChange>);

impl PendingChanges {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a change.
    pub fn push(&mut self, change: PendingChange) {
        self.0.push(change);
    }

    /// Returns the number of changes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is nothing to commit.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the changes.
    pub fn iter(&self) -> std::slice::Iter<'_, PendingChange> {
        self.0.iter()
    }

    /// Iterates mutably over the changes.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PendingChange> {
        self.0.iter_mut()
    }
}

impl FromIterator<PendingChange> for PendingChanges {
    fn from_iter<I: IntoIterator<Item = PendingChange>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PendingChanges {
    type Item = &'a PendingChange;
    type IntoIter = std::slice::Iter<'a, PendingChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A hook invoked synchronously before pending changes are committed.
pub trait SaveInterceptor: Send + Sync {
    /// Inspects and may mutate the pending changes.
    fn before_save(&self, changes: &mut PendingChanges);
}

impl<T: SaveInterceptor + ?Sized> SaveInterceptor for Arc<T> {
    fn before_save(&self, changes: &mut PendingChanges) {
        (**self).before_save(changes)
    }
}

/// An interceptor that leaves changes untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInterceptor;

impl SaveInterceptor for NoopInterceptor {
    fn before_save(&self, _changes: &mut PendingChanges) {}
}

/// Supplies the name of the user performing the current unit of work.
pub trait CurrentUser: Send + Sync {
    /// Returns the user name, or `None` for anonymous work.
    fn user_name(&self) -> Option<String>;
}

/// A user accessor fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct FixedUser(pub Option<String>);

impl CurrentUser for FixedUser {
    fn user_name(&self) -> Option<String> {
        self.0.clone()
    }
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Stamps audit fields on auditable entities.
///
/// - `Added`: sets `createdBy`, `createdOn`, `modifiedBy`, `modifiedOn`
/// - `Modified`: sets `modifiedBy`, `modifiedOn`
/// - `Deleted`: untouched
///
/// `*By` fields are only written when a user is known.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use meridian_persistence::interceptor::{
///     AuditInterceptor, ChangeState, FixedUser, PendingChange, PendingChanges, SaveInterceptor,
/// };
///
/// let interceptor = AuditInterceptor::new(Arc::new(FixedUser(Some("admin".into()))));
/// let mut changes: PendingChanges =
///     std::iter::once(PendingChange::new("Page", ChangeState::Added).auditable()).collect();
///
/// interceptor.before_save(&mut changes);
/// let page = changes.iter().next().unwrap();
/// assert_eq!(page.str_value("createdBy"), Some("admin"));
/// assert!(page.str_value("createdOn").is_some());
/// ```
pub struct AuditInterceptor {
    user: Arc<dyn CurrentUser>,
    clock: Clock,
}

impl AuditInterceptor {
    /// Creates an interceptor using the system clock.
    pub fn new(user: Arc<dyn CurrentUser>) -> Self {
        Self {
            user,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the clock.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }
}

impl SaveInterceptor for AuditInterceptor {
    fn before_save(&self, changes: &mut PendingChanges) {
        let user = self.user.user_name();
        let now = (self.clock)().to_rfc3339();

        for change in changes.iter_mut().filter(|c| c.auditable) {
            let stamp_created = match change.state {
                ChangeState::Added => true,
                ChangeState::Modified => false,
                ChangeState::Deleted => continue,
            };

            if stamp_created {
                if let Some(ref user) = user {
                    change.values.insert(CREATED_BY.to_string(), Value::from(user.as_str()));
                }
                change.values.insert(CREATED_ON.to_string(), Value::from(now.as_str()));
            }
            if let Some(ref user) = user {
                change.values.insert(MODIFIED_BY.to_string(), Value::from(user.as_str()));
            }
            change.values.insert(MODIFIED_ON.to_string(), Value::from(now.as_str()));
        }
    }
}

impl fmt::Debug for AuditInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditInterceptor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    fn interceptor(user: Option<&str>) -> AuditInterceptor {
        AuditInterceptor::new(Arc::new(FixedUser(user.map(String::from)))).with_clock(fixed_time)
    }

    #[test]
    fn test_added_gets_all_fields() {
        let mut changes: PendingChanges =
            std::iter::once(PendingChange::new("Page", ChangeState::Added).auditable()).collect();
        interceptor(Some("admin")).before_save(&mut changes);

        let page = changes.iter().next().unwrap();
        let stamp = fixed_time().to_rfc3339();
        assert_eq!(page.str_value(CREATED_BY), Some("admin"));
        assert_eq!(page.str_value(CREATED_ON), Some(stamp.as_str()));
        assert_eq!(page.str_value(MODIFIED_BY), Some("admin"));
        assert_eq!(page.str_value(MODIFIED_ON), Some(stamp.as_str()));
    }

    #[test]
    fn test_modified_keeps_created_fields() {
        let mut changes: PendingChanges = std::iter::once(
            PendingChange::new("Page", ChangeState::Modified)
                .auditable()
                .with_value(CREATED_BY, "original"),
        )
        .collect();
        interceptor(Some("editor")).before_save(&mut changes);

        let page = changes.iter().next().unwrap();
        assert_eq!(page.str_value(CREATED_BY), Some("original"));
        assert_eq!(page.str_value(CREATED_ON), None);
        assert_eq!(page.str_value(MODIFIED_BY), Some("editor"));
    }

    #[test]
    fn test_deleted_and_non_auditable_untouched() {
        let mut changes: PendingChanges = vec![
            PendingChange::new("Page", ChangeState::Deleted).auditable(),
            PendingChange::new("Log", ChangeState::Added),
        ]
        .into_iter()
        .collect();
        let before = changes.clone();
        interceptor(Some("admin")).before_save(&mut changes);
        assert_eq!(changes, before);
    }

    #[test]
    fn test_anonymous_user_only_stamps_times() {
        let mut changes: PendingChanges =
            std::iter::once(PendingChange::new("Page", ChangeState::Added).auditable()).collect();
        interceptor(None).before_save(&mut changes);

        let page = changes.iter().next().unwrap();
        assert_eq!(page.str_value(CREATED_BY), None);
        assert!(page.str_value(CREATED_ON).is_some());
    }

    #[test]
    fn test_pending_changes_serde() {
        let changes: PendingChanges =
            serde_json::from_str(r#"[{"entity":"Page","state":"added","values":{"title":"Home"}}]"#)
                .unwrap();
        assert_eq!(changes.len(), 1);
        let page = changes.iter().next().unwrap();
        assert!(!page.auditable);
        assert_eq!(page.str_value("title"), Some("Home"));
    }
}
