use crate::{Dialog, DialogError, DialogType, Prompter};
use futures::channel::oneshot;
use futures::future::BoxFuture;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

/// Shows dialogs as native desktop message boxes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePrompter;

impl Prompter for NativePrompter {
    fn confirm(&self, dialog: Dialog) -> BoxFuture<'_, Result<bool, DialogError>> {
        Box::pin(show_confirm(dialog))
    }
}

/// Show a confirmation dialog.
///
/// # Errors
/// Returns an error if the native dialog fails to show.
async fn show_confirm(dialog: Dialog) -> Result<bool, DialogError> {
    let (tx, rx) = oneshot::channel();

    std::thread::spawn(move || {
        let level = match dialog.type_ {
            DialogType::Info => MessageLevel::Info,
            DialogType::Warning => MessageLevel::Warning,
        };

        let result = MessageDialog::new()
            .set_level(level)
            .set_title(&dialog.title)
            .set_description(&dialog.message)
            .set_buttons(MessageButtons::OkCancelCustom(
                dialog.confirm_label.clone(),
                dialog.dismiss_label.clone(),
            ))
            .show();

        let confirmed = match result {
            MessageDialogResult::Ok | MessageDialogResult::Yes => true,
            MessageDialogResult::Custom(label) => label == dialog.confirm_label,
            _ => false,
        };

        let _ = tx.send(confirmed);
    });

    rx.await
        .map_err(|_| DialogError::PlatformError("Dialog panicked or channel closed".into()))
}
