//! Desktop request target.
//!
//! Desktop platforms have no runtime permission prompts: access is handled at
//! the OS or sandbox level, so every permission reports as granted.

use std::sync::{Arc, Weak};

use log::{debug, error};

use crate::{Permission, PermissionRegistry, RequestCode, RequestTarget};

/// A target for platforms without runtime permission prompts.
#[derive(Debug, Default, Clone)]
pub struct DesktopTarget {
    registry: Option<Weak<PermissionRegistry>>,
}

impl DesktopTarget {
    /// A target that reports every permission as granted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer prompt requests inline by dispatching an all-granted result to
    /// `registry`.
    #[must_use]
    pub fn answering(registry: &Arc<PermissionRegistry>) -> Self {
        Self {
            registry: Some(Arc::downgrade(registry)),
        }
    }
}

impl RequestTarget for DesktopTarget {
    fn is_granted(&self, _permission: &Permission) -> bool {
        true
    }

    fn should_explain(&self, _permission: &Permission) -> bool {
        false
    }

    fn request_permissions(&self, permissions: &[Permission], code: RequestCode) {
        let Some(registry) = self.registry.as_ref().and_then(Weak::upgrade) else {
            debug!("request {code}: no registry to answer");
            return;
        };
        let grants = vec![0; permissions.len()];
        if let Err(e) = registry.dispatch(code, permissions, &grants) {
            error!("request {code}: answering failed: {e}");
        }
    }
}
