use std::collections::HashMap;
use std::sync::Arc;

use crate::{Permission, PermissionError, Result};

/// Raw grant code the platform reports for a granted permission.
const RAW_GRANTED: i32 = 0;

/// The platform's answer for one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantResult {
    /// Permission has been granted by the user.
    Granted,
    /// Permission has been denied by the user.
    Denied,
}

impl GrantResult {
    /// Interpret a raw platform grant code (`0` granted, anything else denied).
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        if raw == RAW_GRANTED {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    /// Whether this is [`GrantResult::Granted`].
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for GrantResult {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// One permission and the platform's answer for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionResult {
    /// The permission asked for.
    pub permission: Permission,
    /// The answer.
    pub grant: GrantResult,
}

/// Immutable snapshot of a platform answer.
///
/// Clones share the same backing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    results: Arc<[PermissionResult]>,
}

impl ResultSet {
    /// Zip `permissions` with `grants`.
    ///
    /// # Errors
    /// Returns [`PermissionError::ArityMismatch`] if the lengths differ.
    pub fn new(permissions: &[Permission], grants: &[GrantResult]) -> Result<Self> {
        if permissions.len() != grants.len() {
            return Err(PermissionError::ArityMismatch {
                permissions: permissions.len(),
                results: grants.len(),
            });
        }

        let results = permissions
            .iter()
            .zip(grants)
            .map(|(permission, &grant)| PermissionResult {
                permission: permission.clone(),
                grant,
            })
            .collect();

        Ok(Self { results })
    }

    /// Zip `permissions` with raw platform grant codes.
    ///
    /// # Errors
    /// Returns [`PermissionError::ArityMismatch`] if the lengths differ.
    pub fn from_raw(permissions: &[Permission], grants: &[i32]) -> Result<Self> {
        let grants: Vec<GrantResult> = grants.iter().copied().map(GrantResult::from_raw).collect();
        Self::new(permissions, &grants)
    }

    /// Whether `permission` was granted. Unknown permissions are not granted.
    #[must_use]
    pub fn is_granted(&self, permission: &Permission) -> bool {
        self.results
            .iter()
            .find(|result| &result.permission == permission)
            .is_some_and(|result| result.grant.is_granted())
    }

    /// Whether every permission in the set was granted.
    #[must_use]
    pub fn all_granted(&self) -> bool {
        self.results.iter().all(|result| result.grant.is_granted())
    }

    /// Permissions that were denied.
    pub fn denied(&self) -> impl Iterator<Item = &Permission> {
        self.results
            .iter()
            .filter(|result| !result.grant.is_granted())
            .map(|result| &result.permission)
    }

    /// Permissions in the order the platform reported them.
    pub fn permissions(&self) -> impl Iterator<Item = &Permission> {
        self.results.iter().map(|result| &result.permission)
    }

    /// Permission to granted flag.
    #[must_use]
    pub fn granted_map(&self) -> HashMap<Permission, bool> {
        self.permissions()
            .map(|permission| (permission.clone(), self.is_granted(permission)))
            .collect()
    }

    /// Every result, in reported order.
    pub fn iter(&self) -> std::slice::Iter<'_, PermissionResult> {
        self.results.iter()
    }

    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set holds no results.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a PermissionResult;
    type IntoIter = std::slice::Iter<'a, PermissionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
