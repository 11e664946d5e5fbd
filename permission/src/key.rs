use crate::{Permission, RequestCode};

/// Identity of an outstanding request: its code and its permission multiset.
///
/// Permissions are kept sorted, so the order a caller listed them in does not
/// matter. The key is structural rather than a joined string, so no
/// identifier content can make two different requests collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    code: RequestCode,
    permissions: Vec<Permission>,
}

impl RequestKey {
    /// Derive the key for `code` and `permissions`.
    pub fn new(code: RequestCode, permissions: &[Permission]) -> Self {
        let mut permissions = permissions.to_vec();
        permissions.sort_unstable();
        Self { code, permissions }
    }

    /// The request code.
    #[must_use]
    pub const fn code(&self) -> RequestCode {
        self.code
    }

    /// The permissions, in normalized order.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}
