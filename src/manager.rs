//! Centralized alert hosting for embedded use.
//!
//! Consolidates the dialog state a host application would otherwise
//! carry itself, using the Option<Dialog> pattern where None = closed,
//! Some = open. The host calls [`AlertManager::render`] once per frame
//! and acts on the result it hands back.

use eframe::egui::Context;
use tracing::debug;

use crate::dialog::AlertDialog;
use crate::request::{AlertRequest, DialogResult};
use crate::theme::AlertTheme;

/// Owns at most one open alert and tears it down after it closes.
pub struct AlertManager {
    dialog: Option<AlertDialog>,
    theme: AlertTheme,
}

impl AlertManager {
    /// Manager with no open alert and the default dark theme.
    pub fn new() -> Self {
        Self::with_theme(AlertTheme::default())
    }

    pub fn with_theme(theme: AlertTheme) -> Self {
        Self {
            dialog: None,
            theme,
        }
    }

    /// Theme used for alerts opened after this call. The currently
    /// open alert, if any, keeps the theme it was created with.
    pub fn set_theme(&mut self, theme: AlertTheme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> &AlertTheme {
        &self.theme
    }

    /// Open an alert for `request` with the manager's theme. An
    /// already-open alert is dismissed first, so its result channel
    /// still fires.
    pub fn open(&mut self, request: AlertRequest) {
        self.open_dialog(AlertDialog::with_theme(request, self.theme.clone()));
    }

    /// Open a pre-built dialog, e.g. one carrying its own theme or a
    /// result sender.
    pub fn open_dialog(&mut self, dialog: AlertDialog) {
        if let Some(mut previous) = self.dialog.take() {
            debug!("replacing open alert");
            previous.dismiss();
        }
        self.dialog = Some(dialog);
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Dismiss the open alert, if any, as if the user clicked past
    /// the buttons.
    pub fn dismiss(&mut self) {
        if let Some(mut dialog) = self.dialog.take() {
            dialog.dismiss();
        }
    }

    /// Render the open alert and collect its result.
    ///
    /// Returns `Some` on the frame the alert closes; the closed
    /// instance is dropped before the next frame.
    pub fn render(&mut self, ctx: &Context) -> Option<DialogResult> {
        let mut result = None;
        let mut close = false;
        if let Some(ref mut dialog) = self.dialog {
            result = dialog.show(ctx);
            if !dialog.is_open() {
                close = true;
            }
        }
        if close {
            self.dialog = None;
        }
        result
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_starts_closed() {
        let manager = AlertManager::new();
        assert!(!manager.is_open());
    }

    #[test]
    fn test_open_and_dismiss() {
        let mut manager = AlertManager::new();
        manager.open(AlertRequest::ok("hello"));
        assert!(manager.is_open());

        manager.dismiss();
        assert!(!manager.is_open());
    }

    #[test]
    fn test_opening_replaces_and_dismisses_previous() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut manager = AlertManager::new();
        manager.open_dialog(AlertDialog::new(AlertRequest::ok("first")).with_result_sender(tx));
        manager.open(AlertRequest::ok("second"));

        assert!(manager.is_open());
        // The replaced alert reported its teardown.
        assert_eq!(rx.try_recv(), Ok(DialogResult::Dismissed));
    }

    #[test]
    fn test_set_theme_applies_to_next_alert() {
        let mut manager = AlertManager::new();
        manager.set_theme(AlertTheme::light());
        assert_eq!(manager.theme().name, "Light");
    }

    #[test]
    fn test_dismiss_with_nothing_open_is_a_no_op() {
        let mut manager = AlertManager::new();
        manager.dismiss();
        assert!(!manager.is_open());
    }
}
