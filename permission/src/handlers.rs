use std::fmt;
use std::sync::Arc;

use crate::{Callback, Permission, PermissionError, RequestCode, RequestKey, Result, ResultSet};

type Handler = Arc<dyn Fn(RequestCode, &ResultSet) + Send + Sync>;

/// Result handlers registered up front, looked up by permission set.
///
/// Lookup ignores the order permissions are listed in.
#[derive(Clone, Default)]
pub struct HandlerTable {
    entries: Vec<(RequestKey, Handler)>,
}

impl HandlerTable {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> HandlerTableBuilder {
        HandlerTableBuilder::default()
    }

    /// A callback invoking the handler registered for `permissions`.
    ///
    /// # Errors
    /// Returns [`PermissionError::InvalidRequest`] if no handler matches.
    pub fn callback_for(&self, permissions: &[Permission]) -> Result<Callback> {
        let handler = self.find(permissions).ok_or_else(|| {
            PermissionError::InvalidRequest(format!(
                "no result handler registered for {permissions:?}"
            ))
        })?;
        Ok(Callback::new(move |code, results: &ResultSet| handler(code, results)))
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, permissions: &[Permission]) -> Option<Handler> {
        let signature = signature(permissions);
        self.entries
            .iter()
            .find(|(key, _)| *key == signature)
            .map(|(_, handler)| handler.clone())
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, _)| key.permissions()))
            .finish()
    }
}

/// Builder for [`HandlerTable`].
#[derive(Default)]
pub struct HandlerTableBuilder {
    table: HandlerTable,
}

impl HandlerTableBuilder {
    /// Handle results for exactly `permissions`. A later registration for the
    /// same set replaces the earlier one.
    #[must_use]
    pub fn on<F>(mut self, permissions: &[Permission], handler: F) -> Self
    where
        F: Fn(RequestCode, &ResultSet) + Send + Sync + 'static,
    {
        let signature = signature(permissions);
        self.table.entries.retain(|(key, _)| *key != signature);
        self.table.entries.push((signature, Arc::new(handler)));
        self
    }

    /// Finish the table.
    #[must_use]
    pub fn build(self) -> HandlerTable {
        self.table
    }
}

impl fmt::Debug for HandlerTableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTableBuilder")
            .field("table", &self.table)
            .finish()
    }
}

// Handlers match on the permission set alone, whatever the request code.
fn signature(permissions: &[Permission]) -> RequestKey {
    RequestKey::new(0, permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrantResult;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn lookup_ignores_order() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let table = HandlerTable::builder()
            .on(&[Permission::CAMERA, Permission::RECORD_AUDIO], move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        let callback = table
            .callback_for(&[Permission::RECORD_AUDIO, Permission::CAMERA])
            .unwrap();
        let results = ResultSet::new(&[Permission::CAMERA], &[GrantResult::Granted]).unwrap();
        callback.invoke(1, &results);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_handler_is_invalid() {
        let table = HandlerTable::builder()
            .on(&[Permission::CAMERA], |_, _| {})
            .build();

        assert!(matches!(
            table.callback_for(&[Permission::READ_CONTACTS]),
            Err(PermissionError::InvalidRequest(_))
        ));
        assert!(matches!(
            table.callback_for(&[Permission::CAMERA, Permission::READ_CONTACTS]),
            Err(PermissionError::InvalidRequest(_))
        ));
    }

    #[test]
    fn later_registration_replaces() {
        let table = HandlerTable::builder()
            .on(&[Permission::CAMERA], |_, _| panic!("replaced"))
            .on(&[Permission::CAMERA], |_, _| {})
            .build();

        assert_eq!(table.len(), 1);
        let results = ResultSet::new(&[Permission::CAMERA], &[GrantResult::Denied]).unwrap();
        table.callback_for(&[Permission::CAMERA]).unwrap().invoke(2, &results);
    }
}
