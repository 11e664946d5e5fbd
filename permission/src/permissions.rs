use std::fmt;
use std::sync::Arc;

use grantkit_dialog::{AutoPrompter, Dialog, DialogType, Prompter};
use log::debug;

use crate::{
    Dispatch, Gate, LifecycleEvent, MemoryPrimingStore, Permission, PermissionRegistry,
    PermissionRequest, PermissionsConfig, PrimingStore, RequestCode, RequestOutcome,
    RequestTarget, Result, Submission, should_show_priming,
};

/// Entry point for callers and hosts.
///
/// Wraps a [`PermissionRegistry`] with the priming and rationale dialogs, and
/// with the glue a host needs for lifecycle and result delivery.
pub struct Permissions {
    registry: Arc<PermissionRegistry>,
    prompter: Arc<dyn Prompter>,
    store: Arc<dyn PrimingStore>,
    config: PermissionsConfig,
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permissions")
            .field("registry", &self.registry)
            .field("prompter", &self.prompter)
            .field("store", &self.store)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Permissions {
    /// Start configuring an instance.
    #[must_use]
    pub fn builder() -> PermissionsBuilder {
        PermissionsBuilder::default()
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<PermissionRegistry> {
        &self.registry
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &PermissionsConfig {
        &self.config
    }

    /// Whether `permission` is currently granted.
    ///
    /// # Errors
    /// Returns [`PermissionError::NoActiveTarget`](crate::PermissionError::NoActiveTarget)
    /// if no target is bound.
    pub fn is_granted(&self, permission: &Permission) -> Result<bool> {
        self.registry.is_granted(permission)
    }

    /// Whether the platform advises explaining `permission` before asking.
    ///
    /// # Errors
    /// Returns [`PermissionError::NoActiveTarget`](crate::PermissionError::NoActiveTarget)
    /// if no target is bound.
    pub fn should_show_rationale(&self, permission: &Permission) -> Result<bool> {
        self.registry.should_explain(permission)
    }

    /// Request permissions, passing through the priming and rationale
    /// dialogs first when the request configures them.
    ///
    /// Declining a dialog drops the callback without invoking it and reports
    /// [`RequestOutcome::Dismissed`].
    ///
    /// # Errors
    /// Returns [`PermissionError::NoActiveTarget`](crate::PermissionError::NoActiveTarget)
    /// if no target is bound,
    /// [`PermissionError::InvalidRequest`](crate::PermissionError::InvalidRequest)
    /// for a zero request code, and dialog or store failures.
    pub async fn request(
        &self,
        request: PermissionRequest,
        code: RequestCode,
    ) -> Result<RequestOutcome> {
        let PermissionRequest {
            permissions,
            callback,
            rationale,
            rationale_theme,
            priming_message,
        } = request;

        crate::registry::validate(code, &permissions)?;
        self.registry.binding().current()?;

        if let Some(message) = priming_message {
            if should_show_priming(self.store.as_ref(), &self.config.priming_key)? {
                let dialog = self.dialog(Gate::Priming, message, rationale_theme);
                if !dialog.show_confirm(self.prompter.as_ref()).await? {
                    debug!("request {code}: priming declined");
                    return Ok(RequestOutcome::Dismissed(Gate::Priming));
                }
            }
        }

        if self.all_granted(&permissions)? {
            return Ok(RequestOutcome::AlreadyGranted);
        }

        if let Some(rationale) = rationale {
            if self.any_needs_explaining(&permissions)? {
                let dialog = self.dialog(Gate::Rationale, rationale, rationale_theme);
                if !dialog.show_confirm(self.prompter.as_ref()).await? {
                    debug!("request {code}: rationale declined");
                    return Ok(RequestOutcome::Dismissed(Gate::Rationale));
                }
            }
        }

        Ok(match self.registry.submit(callback, code, &permissions)? {
            Submission::AlreadyGranted => RequestOutcome::AlreadyGranted,
            submission => RequestOutcome::Submitted(submission),
        })
    }

    /// Bind or unbind `target` as the host reports its lifecycle.
    pub fn on_lifecycle(&self, target: &Arc<dyn RequestTarget>, event: LifecycleEvent) {
        if event.binds() {
            self.registry.bind(target.clone());
        } else {
            self.registry.unbind(target);
        }
    }

    /// Host entry point for platform results. Runs `fallback` if nothing in
    /// this registry was waiting for the result.
    ///
    /// # Errors
    /// Returns [`PermissionError::ArityMismatch`](crate::PermissionError::ArityMismatch)
    /// if the arrays differ in length.
    pub fn on_request_permissions_result<F>(
        &self,
        code: RequestCode,
        permissions: &[Permission],
        grants: &[i32],
        fallback: F,
    ) -> Result<Dispatch>
    where
        F: FnOnce(RequestCode, &[Permission], &[i32]),
    {
        let dispatch = self.registry.dispatch(code, permissions, grants)?;
        if !dispatch.is_consumed() {
            fallback(code, permissions, grants);
        }
        Ok(dispatch)
    }

    fn all_granted(&self, permissions: &[Permission]) -> Result<bool> {
        let target = self.registry.binding().current()?;
        Ok(permissions.iter().all(|p| target.is_granted(p)))
    }

    fn any_needs_explaining(&self, permissions: &[Permission]) -> Result<bool> {
        let target = self.registry.binding().current()?;
        Ok(permissions.iter().any(|p| target.should_explain(p)))
    }

    fn dialog(&self, gate: Gate, message: String, theme: Option<u32>) -> Dialog {
        // A rationale follows an earlier denial.
        let (type_, dismiss) = match gate {
            Gate::Priming => (DialogType::Info, &self.config.priming_dismiss_label),
            Gate::Rationale => (DialogType::Warning, &self.config.rationale_dismiss_label),
        };
        Dialog::new(self.config.dialog_title.clone(), message)
            .with_type(type_)
            .with_theme(theme)
            .with_labels(self.config.confirm_label.clone(), dismiss.clone())
    }
}

/// Builder for [`Permissions`].
#[derive(Default)]
pub struct PermissionsBuilder {
    registry: Option<Arc<PermissionRegistry>>,
    prompter: Option<Arc<dyn Prompter>>,
    store: Option<Arc<dyn PrimingStore>>,
    config: PermissionsConfig,
}

impl fmt::Debug for PermissionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionsBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PermissionsBuilder {
    /// Share an existing registry instead of creating one.
    #[must_use]
    pub fn registry(mut self, registry: Arc<PermissionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Show priming and rationale dialogs through `prompter`.
    /// Defaults to accepting every dialog unseen.
    #[must_use]
    pub fn prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    /// Keep priming flags in `store`. Defaults to an in-memory store.
    #[must_use]
    pub fn priming_store(mut self, store: Arc<dyn PrimingStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use `config` for dialog texts and the priming key.
    #[must_use]
    pub fn config(mut self, config: PermissionsConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Permissions {
        Permissions {
            registry: self.registry.unwrap_or_default(),
            prompter: self
                .prompter
                .unwrap_or_else(|| Arc::new(AutoPrompter::accepting())),
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryPrimingStore::new())),
            config: self.config,
        }
    }
}
