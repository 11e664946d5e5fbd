use serde::{Deserialize, Serialize};

use crate::{PermissionError, Result};

/// Default priming flag key.
pub const DEFAULT_PRIMING_KEY: &str = "grantkit.key.should_show_priming";

/// Texts and keys used by [`Permissions`](crate::Permissions) around the core
/// registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Priming store key consulted by the priming gate.
    pub priming_key: String,
    /// Title of priming and rationale dialogs.
    pub dialog_title: String,
    /// Label of the accepting button.
    pub confirm_label: String,
    /// Label of the declining button on the priming dialog.
    pub priming_dismiss_label: String,
    /// Label of the declining button on the rationale dialog.
    pub rationale_dismiss_label: String,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            priming_key: DEFAULT_PRIMING_KEY.into(),
            dialog_title: String::new(),
            confirm_label: "OK".into(),
            priming_dismiss_label: "Not now".into(),
            rationale_dismiss_label: "Not Now".into(),
        }
    }
}

impl PermissionsConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`PermissionError::InvalidRequest`] if `json` is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PermissionError::InvalidRequest(format!("config: {e}")))
    }

    /// Set the priming flag key.
    #[must_use]
    pub fn with_priming_key(mut self, key: impl Into<String>) -> Self {
        self.priming_key = key.into();
        self
    }

    /// Set the dialog title.
    #[must_use]
    pub fn with_dialog_title(mut self, title: impl Into<String>) -> Self {
        self.dialog_title = title.into();
        self
    }
}
