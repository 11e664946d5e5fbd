use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, warn};

use crate::{Permission, PermissionRegistry, RequestCode, RequestKey, Result, ResultSet};

/// Outcome of routing one platform result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A bucket was waiting for this result and has been resolved.
    Consumed {
        /// Callbacks invoked.
        delivered: usize,
        /// Callbacks among them that panicked.
        faults: usize,
    },
    /// Nothing was waiting; the host should apply its default handling.
    NotConsumed,
}

impl Dispatch {
    /// Whether this registry claimed the result.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed { .. })
    }
}

impl PermissionRegistry {
    /// Deliver a platform result to every callback waiting on it.
    ///
    /// Callbacks run in submission order with one shared [`ResultSet`]. A
    /// panicking callback is logged and skipped; the rest still run. Once
    /// dispatched, the key is no longer pending.
    ///
    /// # Errors
    /// Returns [`PermissionError::ArityMismatch`](crate::PermissionError::ArityMismatch)
    /// if `permissions` and `grants` differ in length.
    pub fn dispatch(
        &self,
        code: RequestCode,
        permissions: &[Permission],
        grants: &[i32],
    ) -> Result<Dispatch> {
        let results = ResultSet::from_raw(permissions, grants)?;
        Ok(self.deliver(code, permissions, &results))
    }

    /// Like [`dispatch`](Self::dispatch), for a request code as the host
    /// reports it.
    ///
    /// Codes outside the [`RequestCode`] range were never issued here, so
    /// they are reported as [`Dispatch::NotConsumed`] once the arrays check
    /// out.
    ///
    /// # Errors
    /// Returns [`PermissionError::ArityMismatch`](crate::PermissionError::ArityMismatch)
    /// if `permissions` and `grants` differ in length.
    pub fn dispatch_host_code(
        &self,
        code: i32,
        permissions: &[Permission],
        grants: &[i32],
    ) -> Result<Dispatch> {
        let results = ResultSet::from_raw(permissions, grants)?;
        match RequestCode::try_from(code) {
            Ok(code) => Ok(self.deliver(code, permissions, &results)),
            Err(_) => {
                debug!("request code {code} is not ours; falling through");
                Ok(Dispatch::NotConsumed)
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), with a result set already built.
    pub fn dispatch_results(&self, code: RequestCode, results: &ResultSet) -> Dispatch {
        let permissions: Vec<Permission> = results.permissions().cloned().collect();
        self.deliver(code, &permissions, results)
    }

    fn deliver(
        &self,
        code: RequestCode,
        permissions: &[Permission],
        results: &ResultSet,
    ) -> Dispatch {
        let key = RequestKey::new(code, permissions);
        let Some(callbacks) = self.take_bucket(&key) else {
            warn!("result for request {code} has no pending callbacks");
            return Dispatch::NotConsumed;
        };

        let delivered = callbacks.len();
        let mut faults = 0;
        for callback in callbacks {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback.invoke(code, results)));
            if let Err(payload) = outcome {
                faults += 1;
                error!(
                    "callback for request {code} panicked: {}",
                    panic_message(payload.as_ref())
                );
            }
        }

        debug!("request {code}: delivered to {delivered} callbacks ({faults} faulted)");
        Dispatch::Consumed { delivered, faults }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
