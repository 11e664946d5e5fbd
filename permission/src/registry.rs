//! Pending-request registry.
//!
//! One platform prompt is issued per distinct [`RequestKey`] while it is
//! outstanding; every caller asking for the same key in the meantime joins the
//! bucket and is answered by the same dispatch.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::{
    Callback, Permission, PermissionError, RequestCode, RequestKey, RequestTarget, Result,
    TargetBinding,
};

/// What [`PermissionRegistry::submit`] did with a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Every permission was already granted. No prompt was shown and the
    /// callback was dropped without being invoked.
    AlreadyGranted,
    /// The callback opened a new bucket and the platform prompt was shown.
    Prompted,
    /// A prompt for the same key is outstanding; the callback joined it.
    Joined {
        /// Callbacks now waiting on the key, this one included.
        waiting: usize,
    },
}

/// Outstanding permission requests and the target they are issued against.
#[derive(Debug, Default)]
pub struct PermissionRegistry {
    binding: TargetBinding,
    buckets: Mutex<HashMap<RequestKey, Vec<Callback>>>,
}

impl PermissionRegistry {
    /// An empty registry with no bound target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The target binding consulted by [`is_granted`](Self::is_granted) and
    /// [`submit`](Self::submit).
    pub const fn binding(&self) -> &TargetBinding {
        &self.binding
    }

    /// Make `target` the active target.
    pub fn bind(&self, target: Arc<dyn RequestTarget>) {
        self.binding.bind(target);
    }

    /// Clear the active target if it is `target`.
    pub fn unbind(&self, target: &Arc<dyn RequestTarget>) {
        self.binding.unbind(target);
    }

    /// Ask the active target whether `permission` is granted.
    ///
    /// # Errors
    /// Returns [`PermissionError::NoActiveTarget`] if no target is bound.
    pub fn is_granted(&self, permission: &Permission) -> Result<bool> {
        Ok(self.binding.current()?.is_granted(permission))
    }

    /// Ask the active target whether `permission` should be explained first.
    ///
    /// # Errors
    /// Returns [`PermissionError::NoActiveTarget`] if no target is bound.
    pub fn should_explain(&self, permission: &Permission) -> Result<bool> {
        Ok(self.binding.current()?.should_explain(permission))
    }

    /// Register `callback` for `permissions` under `code`.
    ///
    /// The first callback for a key shows the platform prompt; later ones wait
    /// for the same answer. If everything is already granted the callback is
    /// dropped without being invoked.
    ///
    /// # Errors
    /// Returns [`PermissionError::InvalidRequest`] for an empty permission list
    /// or a zero request code, and [`PermissionError::NoActiveTarget`] if no
    /// target is bound.
    pub fn submit(
        &self,
        callback: Callback,
        code: RequestCode,
        permissions: &[Permission],
    ) -> Result<Submission> {
        validate(code, permissions)?;
        let target = self.binding.current()?;

        if permissions.iter().all(|p| target.is_granted(p)) {
            debug!("request {code}: {permissions:?} already granted");
            return Ok(Submission::AlreadyGranted);
        }

        let key = RequestKey::new(code, permissions);
        {
            let mut buckets = self.lock();
            match buckets.entry(key) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().push(callback);
                    let waiting = entry.get().len();
                    debug!("request {code}: joined pending bucket ({waiting} waiting)");
                    return Ok(Submission::Joined { waiting });
                }
                Entry::Vacant(entry) => {
                    entry.insert(vec![callback]);
                }
            }
        }

        // Only the caller that created the bucket gets here, so the prompt is
        // shown once per key. It runs unlocked: a target may answer inline.
        debug!("request {code}: prompting for {permissions:?}");
        target.request_permissions(permissions, code);
        Ok(Submission::Prompted)
    }

    /// Number of keys with an outstanding prompt.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Number of callbacks waiting on `key`, or zero if nothing is pending.
    pub fn waiting(&self, key: &RequestKey) -> usize {
        self.lock().get(key).map_or(0, Vec::len)
    }

    pub(crate) fn take_bucket(&self, key: &RequestKey) -> Option<Vec<Callback>> {
        self.lock().remove(key)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RequestKey, Vec<Callback>>> {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn validate(code: RequestCode, permissions: &[Permission]) -> Result<()> {
    if permissions.is_empty() {
        return Err(PermissionError::InvalidRequest(
            "permissions must be set".into(),
        ));
    }
    if code == 0 {
        return Err(PermissionError::InvalidRequest(
            "request code must be positive".into(),
        ));
    }
    Ok(())
}
