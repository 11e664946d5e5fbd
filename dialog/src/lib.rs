//! Confirmation prompts shown in front of permission requests.
//!
//! A [`Prompter`] turns a [`Dialog`] into a yes/no answer. Hosts provide one
//! that draws on their active UI context; headless hosts and tests use
//! [`AutoPrompter`]. With the `native` feature enabled, [`NativePrompter`]
//! shows a desktop message box.

#![warn(missing_docs)]

mod error;

/// Platform-specific implementations.
pub mod sys;

use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::{self, BoxFuture};

pub use error::DialogError;
#[cfg(feature = "native")]
pub use sys::NativePrompter;

/// Types of dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogType {
    /// Information dialog.
    Info,
    /// Warning dialog.
    Warning,
}

/// A confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Title of the dialog.
    pub title: String,
    /// Message content of the dialog.
    pub message: String,
    /// Type/Icon of the dialog.
    pub type_: DialogType,
    /// Host theme resource to draw the dialog with, if any.
    pub theme: Option<u32>,
    /// Label of the accepting button.
    pub confirm_label: String,
    /// Label of the declining button.
    pub dismiss_label: String,
}

impl Dialog {
    /// Create a new dialog with default Info type and OK/Cancel buttons.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            type_: DialogType::Info,
            theme: None,
            confirm_label: "OK".into(),
            dismiss_label: "Cancel".into(),
        }
    }

    /// Set the dialog type.
    #[must_use]
    pub fn with_type(mut self, type_: DialogType) -> Self {
        self.type_ = type_;
        self
    }

    /// Set the host theme used to draw the dialog.
    #[must_use]
    pub fn with_theme(mut self, theme: Option<u32>) -> Self {
        self.theme = theme;
        self
    }

    /// Set the button labels.
    #[must_use]
    pub fn with_labels(mut self, confirm: impl Into<String>, dismiss: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.dismiss_label = dismiss.into();
        self
    }

    /// Show the dialog through `prompter`.
    /// Returns true if confirmed, false if declined.
    ///
    /// # Errors
    /// Returns a [`DialogError`] if the prompter could not show the dialog.
    pub async fn show_confirm(self, prompter: &dyn Prompter) -> Result<bool, DialogError> {
        prompter.confirm(self).await
    }
}

/// Something able to ask the user a yes/no question.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Show `dialog` and resolve to whether the user accepted it.
    fn confirm(&self, dialog: Dialog) -> BoxFuture<'_, Result<bool, DialogError>>;
}

/// A prompter that answers every dialog with a fixed choice.
#[derive(Debug)]
pub struct AutoPrompter {
    answer: bool,
    shown: AtomicUsize,
}

impl AutoPrompter {
    /// A prompter that accepts every dialog.
    #[must_use]
    pub const fn accepting() -> Self {
        Self::new(true)
    }

    /// A prompter that declines every dialog.
    #[must_use]
    pub const fn declining() -> Self {
        Self::new(false)
    }

    const fn new(answer: bool) -> Self {
        Self {
            answer,
            shown: AtomicUsize::new(0),
        }
    }

    /// Number of dialogs answered so far.
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl Prompter for AutoPrompter {
    fn confirm(&self, dialog: Dialog) -> BoxFuture<'_, Result<bool, DialogError>> {
        log::debug!("auto-answering dialog {:?} with {}", dialog.message, self.answer);
        self.shown.fetch_add(1, Ordering::SeqCst);
        Box::pin(future::ready(Ok(self.answer)))
    }
}
