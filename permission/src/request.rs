use crate::{Callback, Permission, PermissionError, RequestCode, Result, ResultSet, Submission};

/// A dialog placed in front of the platform prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The one-time priming message.
    Priming,
    /// The rationale shown when the platform advises explaining.
    Rationale,
}

/// What became of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Everything was already granted. The callback was not invoked.
    AlreadyGranted,
    /// The request reached the registry; the callback will run on dispatch.
    Submitted(Submission),
    /// The user declined a dialog. The callback was not invoked.
    Dismissed(Gate),
}

/// A validated permission request.
#[derive(Debug)]
pub struct PermissionRequest {
    pub(crate) permissions: Vec<Permission>,
    pub(crate) callback: Callback,
    pub(crate) rationale: Option<String>,
    pub(crate) rationale_theme: Option<u32>,
    pub(crate) priming_message: Option<String>,
}

impl PermissionRequest {
    /// Start building a request.
    #[must_use]
    pub fn builder() -> PermissionRequestBuilder {
        PermissionRequestBuilder::default()
    }

    /// The permissions asked for.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}

/// Builder for [`PermissionRequest`].
#[derive(Debug, Default)]
pub struct PermissionRequestBuilder {
    permissions: Vec<Permission>,
    callback: Option<Callback>,
    rationale: Option<String>,
    rationale_theme: Option<u32>,
    priming_message: Option<String>,
}

impl PermissionRequestBuilder {
    /// Ask for `permission`.
    #[must_use]
    pub fn permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Ask for every permission in `permissions`.
    #[must_use]
    pub fn permissions<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Permission>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Run `callback` with the platform's answer.
    #[must_use]
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(RequestCode, &ResultSet) + Send + 'static,
    {
        self.callback = Some(Callback::new(callback));
        self
    }

    /// Run an existing [`Callback`] with the platform's answer.
    #[must_use]
    pub fn with_callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Explain the request when the platform advises it.
    #[must_use]
    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    /// Host theme for the rationale and priming dialogs.
    #[must_use]
    pub fn rationale_theme(mut self, theme: u32) -> Self {
        self.rationale_theme = Some(theme);
        self
    }

    /// Show `message` once, before anything else, the first time any request
    /// with a priming message is made.
    #[must_use]
    pub fn priming_message(mut self, message: impl Into<String>) -> Self {
        self.priming_message = Some(message.into());
        self
    }

    /// Validate and finish the request.
    ///
    /// # Errors
    /// Returns [`PermissionError::InvalidRequest`] if no permission or no
    /// callback was set.
    pub fn build(self) -> Result<PermissionRequest> {
        if self.permissions.is_empty() {
            return Err(PermissionError::InvalidRequest(
                "permissions must be set".into(),
            ));
        }
        let callback = self
            .callback
            .ok_or_else(|| PermissionError::InvalidRequest("callback must be set".into()))?;

        Ok(PermissionRequest {
            permissions: self.permissions,
            callback,
            rationale: self.rationale,
            rationale_theme: self.rationale_theme,
            priming_message: self.priming_message,
        })
    }

    /// Validate and finish the request, taking the callback from `table`.
    ///
    /// # Errors
    /// Returns [`PermissionError::InvalidRequest`] if no permission was set or
    /// `table` has no handler for the permission set.
    pub fn build_with_handlers(mut self, table: &crate::HandlerTable) -> Result<PermissionRequest> {
        if !self.permissions.is_empty() {
            self.callback = Some(table.callback_for(&self.permissions)?);
        }
        self.build()
    }
}
