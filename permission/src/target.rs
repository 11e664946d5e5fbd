use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use crate::{Permission, PermissionError, RequestCode, Result};

/// A UI context able to talk to the platform's permission machinery.
pub trait RequestTarget: Send + Sync + fmt::Debug {
    /// Whether `permission` is currently granted.
    fn is_granted(&self, permission: &Permission) -> bool;

    /// Whether the platform advises explaining `permission` before asking.
    fn should_explain(&self, permission: &Permission) -> bool;

    /// Show the platform prompt for `permissions`.
    ///
    /// The answer arrives later through the host's result entry point.
    fn request_permissions(&self, permissions: &[Permission], code: RequestCode);
}

/// Holds the single currently active [`RequestTarget`].
#[derive(Debug, Default)]
pub struct TargetBinding {
    current: RwLock<Option<Arc<dyn RequestTarget>>>,
}

impl TargetBinding {
    /// An empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target` the active target, replacing any other.
    pub fn bind(&self, target: Arc<dyn RequestTarget>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        debug!("binding request target {target:?}");
        *current = Some(target);
    }

    /// Clear the active target, but only if it is `target`.
    ///
    /// A context that lost the foreground must not clear the one that took
    /// over from it.
    pub fn unbind(&self, target: &Arc<dyn RequestTarget>) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some(bound) if same_target(bound, target) => {
                debug!("unbinding request target {target:?}");
                *current = None;
            }
            Some(_) => warn!("unbind: stale target {target:?} tried to unbind a newer one"),
            None => debug!("unbind: no target bound"),
        }
    }

    /// The active target.
    ///
    /// # Errors
    /// Returns [`PermissionError::NoActiveTarget`] if none is bound.
    pub fn current(&self) -> Result<Arc<dyn RequestTarget>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(PermissionError::NoActiveTarget)
    }

    /// Whether a target is bound.
    pub fn is_bound(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

// Compares data pointers only; vtable pointers of the same type may differ
// across codegen units.
fn same_target(a: &Arc<dyn RequestTarget>, b: &Arc<dyn RequestTarget>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
