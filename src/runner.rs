//! Blocking entry points: run a single alert in its own borderless,
//! transparent viewport and return the result when it closes.
//!
//! The viewport starts at the maximum dialog size and shrinks to the
//! rendered content after the first frame, so the window hugs the card
//! the way the dialog itself hugs its message.

use eframe::egui::{self, Vec2};
use tracing::debug;

use crate::dialog::{AlertDialog, DIALOG_WIDTH, MAX_DIALOG_HEIGHT};
use crate::error::Result;
use crate::request::{AlertRequest, DialogResult};
use crate::theme::AlertTheme;

/// Show `request` modally in its own window and block until the user
/// answers. Returns the dialog's single result.
pub fn show_alert(request: AlertRequest) -> Result<DialogResult> {
    show_alert_with_theme(request, AlertTheme::default())
}

/// [`show_alert`] with an explicit theme.
pub fn show_alert_with_theme(request: AlertRequest, theme: AlertTheme) -> Result<DialogResult> {
    let title = request.title.clone().unwrap_or_else(|| "Alert".to_string());
    debug!(%title, "running blocking alert viewport");

    let (tx, rx) = crossbeam_channel::bounded(1);
    let dialog = AlertDialog::with_theme(request, theme).with_result_sender(tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([DIALOG_WIDTH, MAX_DIALOG_HEIGHT])
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_always_on_top(),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(AlertApp::new(dialog)))),
    )?;

    // If the window was torn down externally the dialog never fired;
    // that counts as a dismissal.
    Ok(rx.try_recv().unwrap_or(DialogResult::Dismissed))
}

struct AlertApp {
    dialog: AlertDialog,
    viewport_size: Vec2,
}

impl AlertApp {
    fn new(dialog: AlertDialog) -> Self {
        Self {
            dialog,
            viewport_size: egui::vec2(DIALOG_WIDTH, MAX_DIALOG_HEIGHT),
        }
    }

    /// Shrink the viewport to the dialog's rendered height once it is
    /// known. One resize per height change; stable once laid out.
    fn fit_viewport(&mut self, ctx: &egui::Context) {
        let target = fit_size(self.dialog.bounds().height());
        let Some(target) = target else { return };
        if (self.viewport_size - target).length() > 1.0 {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
            self.viewport_size = target;
        }
    }
}

impl eframe::App for AlertApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Everything outside the card stays see-through.
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.dialog.show(ctx) {
            Some(_) => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            None => self.fit_viewport(ctx),
        }
    }
}

/// Viewport size for a dialog of the given rendered height. `None`
/// until a real height exists.
fn fit_size(dialog_height: f32) -> Option<Vec2> {
    if !dialog_height.is_finite() || dialog_height <= 0.0 {
        return None;
    }
    Some(egui::vec2(
        DIALOG_WIDTH,
        dialog_height.min(MAX_DIALOG_HEIGHT),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_size_tracks_content_up_to_the_cap() {
        assert_eq!(fit_size(180.0), Some(egui::vec2(DIALOG_WIDTH, 180.0)));
        assert_eq!(
            fit_size(900.0),
            Some(egui::vec2(DIALOG_WIDTH, MAX_DIALOG_HEIGHT))
        );
    }

    #[test]
    fn test_fit_size_rejects_unrendered_bounds() {
        assert_eq!(fit_size(f32::NEG_INFINITY), None);
        assert_eq!(fit_size(0.0), None);
    }
}
