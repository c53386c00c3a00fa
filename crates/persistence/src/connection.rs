//! Connection-string resolution.
//!
//! A tenant names a connection-string template by configuration key. The
//! template may contain the [`DATA_DIRECTORY_TOKEN`] placeholder, which is
//! replaced with the runtime data directory:
//!
//! ```text
//! template:  Data Source=|DataDirectory|/acme.db
//! data dir:  /var/lib/meridian
//! resolved:  Data Source=/var/lib/meridian/acme.db
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConfigurationSource;
use crate::tenant::Tenant;

/// Placeholder replaced with the runtime data directory. Matched exactly and
/// case-sensitively.
pub const DATA_DIRECTORY_TOKEN: &str = "|DataDirectory|";

/// Supplies the runtime data directory.
pub trait DataDirectory: Send + Sync {
    /// Returns the absolute path of the current data directory.
    fn current_data_dir(&self) -> String;
}

impl<T: DataDirectory + ?Sized> DataDirectory for Arc<T> {
    fn current_data_dir(&self) -> String {
        (**self).current_data_dir()
    }
}

/// A data directory fixed at startup.
#[derive(Debug, Clone)]
pub struct FixedDataDirectory {
    path: PathBuf,
}

impl FixedDataDirectory {
    /// Creates a data directory accessor for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataDirectory for FixedDataDirectory {
    fn current_data_dir(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Resolves the connection string for `tenant`.
///
/// Returns `None` when the configuration has no template under the tenant's
/// key; the tenant simply has no binding yet. Otherwise every occurrence of
/// [`DATA_DIRECTORY_TOKEN`] is replaced with `data_dir`. An empty template
/// resolves to an empty string, which is distinct from `None`.
///
/// # Examples
///
/// ```
/// use meridian_persistence::config::InMemoryConfiguration;
/// use meridian_persistence::connection::resolve_connection_string;
/// use meridian_persistence::tenant::Tenant;
///
/// let config = InMemoryConfiguration::new()
///     .with_connection_string("Acme", "Data Source=|DataDirectory|/acme.db");
/// let tenant = Tenant::new("acme", "Acme", "sqlite");
///
/// let resolved = resolve_connection_string(&tenant, &config, "/data");
/// assert_eq!(resolved.as_deref(), Some("Data Source=/data/acme.db"));
/// ```
pub fn resolve_connection_string(
    tenant: &Tenant,
    config: &dyn ConfigurationSource,
    data_dir: &str,
) -> Option<String> {
    let template = config.connection_string(tenant.connection_string_key())?;
    Some(template.replace(DATA_DIRECTORY_TOKEN, data_dir))
}
