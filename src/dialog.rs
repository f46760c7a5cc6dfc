//! The alert dialog: a frameless, translucent, auto-sizing popup with
//! a message and a row of action buttons.
//!
//! Input is resolved by the dialog's own controller rather than by
//! per-widget responses: every frame it hit-tests the raw pointer and
//! key events against the rects recorded at the previous render,
//! drives each button's visual state machine, and resolves the
//! press/release pair into at most one [`DialogResult`]. That keeps
//! the close rules in one place: a click is decided by where the press
//! landed and where the release ended, never by widget event order.
//!
//! A dialog emits exactly one result. After that it renders nothing
//! and ignores all input.

use crossbeam_channel::Sender;
use eframe::egui::epaint::Shadow;
use eframe::egui::{
    self, Align2, CornerRadius, Margin, Pos2, Rect, RichText, Sense, Stroke, StrokeKind,
    TextStyle, Vec2,
};
use tracing::{debug, trace};

use crate::request::{AlertRequest, DialogResult};
use crate::theme::AlertTheme;
use crate::visual_state::{transition, ButtonEvent, VisualState};

/// Fixed outer width of the dialog, transparent margin included.
pub const DIALOG_WIDTH: f32 = 424.0;
/// Hard cap on the dialog's total height. Content beyond it scrolls.
pub const MAX_DIALOG_HEIGHT: f32 = 480.0;

// Transparent band around the card. Draws nothing, but clicks on it
// count as clicks on the dialog.
const OUTER_MARGIN: i8 = 12;
const CARD_PADDING: i8 = 16;
const CARD_ROUNDING: u8 = 10;
const BUTTON_ROUNDING: u8 = 6;
const BUTTON_HEIGHT: f32 = 30.0;
const BUTTON_PADDING_X: f32 = 14.0;
const MIN_BUTTON_WIDTH: f32 = 64.0;
const CONTENT_WIDTH: f32 = DIALOG_WIDTH - 2.0 * (OUTER_MARGIN as f32 + CARD_PADDING as f32);
const BODY_MAX_HEIGHT: f32 = MAX_DIALOG_HEIGHT - 2.0 * (OUTER_MARGIN as f32 + CARD_PADDING as f32);

/// What the primary pointer button went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressTarget {
    /// An enabled button, by index into the request's button list.
    Button(usize),
    /// Anywhere else inside the dialog bounds: card, transparent
    /// margin, message area, or a disabled button. Disabled buttons do
    /// not consume clicks.
    Surface,
}

/// One alert instance. Construct, call [`show`](Self::show) every
/// frame, act on the returned result.
pub struct AlertDialog {
    request: AlertRequest,
    theme: AlertTheme,
    /// Visual bucket per button, same order as `request.buttons`.
    states: Vec<VisualState>,
    /// Keyboard-focused button index. Only ever an enabled button.
    focused: Option<usize>,
    /// Button index under the pointer as of the last processed frame.
    hovered: Option<usize>,
    /// Unresolved primary-button press, if any.
    press: Option<PressTarget>,
    /// Screen rects from the last render. Input is hit-tested against
    /// these, one frame behind what is on screen.
    button_rects: Vec<Rect>,
    bounds: Rect,
    open: bool,
    result_tx: Option<Sender<DialogResult>>,
}

impl AlertDialog {
    pub fn new(request: AlertRequest) -> Self {
        Self::with_theme(request, AlertTheme::default())
    }

    pub fn with_theme(request: AlertRequest, theme: AlertTheme) -> Self {
        let states = request
            .buttons
            .iter()
            .map(|b| VisualState::initial(b.enabled))
            .collect();
        debug!(
            buttons = request.buttons.len(),
            theme = %theme.name,
            "opening alert dialog"
        );
        Self {
            request,
            theme,
            states,
            focused: None,
            hovered: None,
            press: None,
            button_rects: Vec::new(),
            bounds: Rect::NOTHING,
            open: true,
            result_tx: None,
        }
    }

    /// Attach a one-shot channel that receives the result at close, in
    /// addition to the value returned from [`show`](Self::show).
    pub fn with_result_sender(mut self, tx: Sender<DialogResult>) -> Self {
        self.result_tx = Some(tx);
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn request(&self) -> &AlertRequest {
        &self.request
    }

    /// Screen rect the dialog occupied at its last render, transparent
    /// margin included. [`Rect::NOTHING`] before the first frame.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Visible screen rect of button `idx` at the last render, clipped
    /// to the scrolled body: a button scrolled out of view yields an
    /// empty rect and cannot be hit. `None` before the first frame or
    /// for an out-of-range index.
    pub fn button_rect(&self, idx: usize) -> Option<Rect> {
        self.button_rects.get(idx).copied()
    }

    /// Current visual bucket of button `idx`.
    pub fn visual_state(&self, idx: usize) -> Option<VisualState> {
        self.states.get(idx).copied()
    }

    /// Close programmatically. Reports `Dismissed` through the result
    /// channel if one is attached; later `show` calls render nothing.
    pub fn dismiss(&mut self) {
        if self.open {
            self.finish(DialogResult::Dismissed);
        }
    }

    /// Render one frame and resolve this frame's input. Returns `Some`
    /// exactly once, on the frame the dialog closes.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogResult> {
        if !self.open {
            return None;
        }

        if let Some(result) = self.process_input(ctx) {
            self.finish(result.clone());
            return Some(result);
        }

        self.render(ctx);
        None
    }

    fn finish(&mut self, result: DialogResult) {
        self.open = false;
        if let Some(tx) = self.result_tx.take() {
            // Receiver may already be gone.
            let _ = tx.send(result.clone());
        }
        debug!(?result, "alert dialog closed");
    }

    // ---- input ----

    fn process_input(&mut self, ctx: &egui::Context) -> Option<DialogResult> {
        let (events, pointer_pos) = ctx.input(|i| (i.events.clone(), i.pointer.latest_pos()));

        // Hover tracking first, so enter/leave fire on plain movement.
        let hover_now = pointer_pos.and_then(|p| self.button_at(p));
        if hover_now != self.hovered {
            if let Some(old) = self.hovered {
                let focus_held = self.focused == Some(old);
                self.step(old, ButtonEvent::PointerLeave { focus_held });
            }
            if let Some(new) = hover_now {
                self.step(new, ButtonEvent::PointerEnter);
            }
            self.hovered = hover_now;
        }

        let mut outcome = None;
        for event in &events {
            if outcome.is_some() {
                break;
            }
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if *pressed {
                        self.on_press(*pos);
                    } else {
                        outcome = self.on_release(*pos);
                    }
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    outcome = self.on_key(*key, *modifiers);
                }
                _ => {}
            }
        }
        outcome
    }

    /// Advance one button's state machine. Returns whether the action
    /// fired.
    fn step(&mut self, idx: usize, event: ButtonEvent) -> bool {
        let t = transition(self.states[idx], event);
        if t.next != self.states[idx] {
            trace!(button = idx, from = ?self.states[idx], to = ?t.next, "visual state change");
        }
        self.states[idx] = t.next;
        t.fired
    }

    /// Index of the button whose rect contains `pos`, enabled or not.
    fn button_at(&self, pos: Pos2) -> Option<usize> {
        self.button_rects.iter().position(|r| r.contains(pos))
    }

    fn enabled_button_at(&self, pos: Pos2) -> Option<usize> {
        self.button_at(pos)
            .filter(|&i| self.request.buttons[i].enabled)
    }

    fn on_press(&mut self, pos: Pos2) {
        if !self.bounds.contains(pos) {
            // Not ours. The host owns everything outside the dialog.
            return;
        }
        // A pointer press takes the keyboard focus away.
        if let Some(old) = self.focused.take() {
            let pointer_inside = self.hovered == Some(old);
            self.step(old, ButtonEvent::FocusLost { pointer_inside });
        }
        match self.enabled_button_at(pos) {
            Some(idx) => {
                self.step(idx, ButtonEvent::Press);
                self.press = Some(PressTarget::Button(idx));
            }
            None => self.press = Some(PressTarget::Surface),
        }
    }

    fn on_release(&mut self, pos: Pos2) -> Option<DialogResult> {
        match self.press.take()? {
            PressTarget::Button(idx) => {
                let inside = self
                    .button_rects
                    .get(idx)
                    .is_some_and(|r| r.contains(pos));
                if self.step(idx, ButtonEvent::Release { inside }) {
                    let action = self.request.buttons[idx].action.clone();
                    return Some(DialogResult::Button(action));
                }
                None
            }
            PressTarget::Surface => {
                if self.bounds.contains(pos) {
                    Some(DialogResult::Dismissed)
                } else {
                    None
                }
            }
        }
    }

    fn on_key(&mut self, key: egui::Key, modifiers: egui::Modifiers) -> Option<DialogResult> {
        match key {
            egui::Key::Escape => Some(DialogResult::Dismissed),
            egui::Key::Tab => {
                self.cycle_focus(modifiers.shift);
                None
            }
            egui::Key::Enter => {
                // `focused` is only ever set to an enabled button. With
                // no focus, Enter falls back to the only enabled button
                // when there is exactly one.
                let idx = self.focused.or_else(|| self.sole_enabled_button())?;
                Some(DialogResult::Button(self.request.buttons[idx].action.clone()))
            }
            egui::Key::Space => {
                let idx = self.focused?;
                Some(DialogResult::Button(self.request.buttons[idx].action.clone()))
            }
            _ => None,
        }
    }

    /// The only enabled button, if exactly one exists.
    fn sole_enabled_button(&self) -> Option<usize> {
        let mut enabled = self
            .request
            .buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.enabled)
            .map(|(i, _)| i);
        let first = enabled.next()?;
        if enabled.next().is_some() {
            None
        } else {
            Some(first)
        }
    }

    /// Move keyboard focus to the next enabled button, wrapping at the
    /// ends. `backwards` reverses direction. Disabled buttons are
    /// skipped; with no enabled button, focus goes nowhere.
    fn cycle_focus(&mut self, backwards: bool) {
        let enabled: Vec<usize> = self
            .request
            .buttons
            .iter()
            .enumerate()
            .filter(|(_, b)| b.enabled)
            .map(|(i, _)| i)
            .collect();
        if enabled.is_empty() {
            return;
        }
        let first = enabled[0];
        let last = enabled[enabled.len() - 1];

        let next = match self
            .focused
            .and_then(|f| enabled.iter().position(|&i| i == f))
        {
            None if backwards => last,
            None => first,
            Some(pos) if backwards => {
                if pos == 0 {
                    last
                } else {
                    enabled[pos - 1]
                }
            }
            Some(pos) => {
                if pos + 1 == enabled.len() {
                    first
                } else {
                    enabled[pos + 1]
                }
            }
        };

        let old = self.focused.replace(next);
        if old == Some(next) {
            return;
        }
        if let Some(old) = old {
            let pointer_inside = self.hovered == Some(old);
            self.step(old, ButtonEvent::FocusLost { pointer_inside });
        }
        self.step(next, ButtonEvent::FocusGained);
    }

    // ---- rendering ----

    fn render(&mut self, ctx: &egui::Context) {
        let response = egui::Area::new(egui::Id::new("glass_alert_dialog"))
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_width(DIALOG_WIDTH);
                egui::Frame::new()
                    .inner_margin(Margin::same(OUTER_MARGIN))
                    .show(ui, |ui| self.render_card(ui));
            });
        self.bounds = response.response.rect;
    }

    fn render_card(&mut self, ui: &mut egui::Ui) {
        egui::Frame::new()
            .fill(self.theme.card_fill)
            .stroke(Stroke::new(1.0, self.theme.card_stroke))
            .corner_radius(CornerRadius::same(CARD_ROUNDING))
            .shadow(Shadow {
                offset: [0, 4],
                blur: 16,
                spread: 0,
                color: self.theme.shadow_color,
            })
            .inner_margin(Margin::same(CARD_PADDING))
            .show(ui, |ui| {
                ui.set_width(CONTENT_WIDTH);
                egui::ScrollArea::vertical()
                    .max_height(BODY_MAX_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        ui.set_width(CONTENT_WIDTH);
                        if let Some(title) = self.request.title.clone() {
                            ui.label(
                                RichText::new(title)
                                    .text_style(TextStyle::Heading)
                                    .color(self.theme.title_text)
                                    .strong(),
                            );
                            ui.add_space(6.0);
                        }
                        ui.label(
                            RichText::new(self.request.message.clone())
                                .color(self.theme.message_text),
                        );
                        if !self.request.buttons.is_empty() {
                            ui.add_space(12.0);
                            self.render_buttons(ui);
                        }
                    });
            });
    }

    fn render_buttons(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(8.0, 6.0);
            for idx in 0..self.request.buttons.len() {
                self.render_button(ui, idx);
            }
        });
    }

    fn render_button(&mut self, ui: &mut egui::Ui, idx: usize) {
        let label = self.request.buttons[idx].label.clone();
        let style = self.theme.button_style(self.states[idx]);

        let font_id = TextStyle::Button.resolve(ui.style());
        let galley = ui.painter().layout_no_wrap(label, font_id, style.text);
        let width = (galley.size().x + 2.0 * BUTTON_PADDING_X).max(MIN_BUTTON_WIDTH);

        // Sense::hover only: presses and releases are resolved by the
        // dialog's controller, egui just hands us the space.
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(width, BUTTON_HEIGHT), Sense::hover());

        let painter = ui.painter();
        painter.rect_filled(rect, CornerRadius::same(BUTTON_ROUNDING), style.fill);
        if style.stroke != Stroke::NONE {
            painter.rect_stroke(
                rect,
                CornerRadius::same(BUTTON_ROUNDING),
                style.stroke,
                StrokeKind::Inside,
            );
        }
        let text_pos = rect.center() - 0.5 * galley.size();
        painter.galley(text_pos, galley, style.text);

        // Hit-test against what is actually visible: a button scrolled
        // out of the body must not catch clicks on the card below it.
        let hit_rect = rect.intersect(ui.clip_rect());
        if self.button_rects.len() == idx {
            self.button_rects.push(hit_rect);
        } else {
            self.button_rects[idx] = hit_rect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ActionId, ButtonSpec};
    use eframe::egui::pos2;

    /// Dialog with synthetic geometry, as if one frame had rendered:
    /// bounds 400x200 at the origin, buttons in a row near the bottom.
    fn laid_out_dialog(buttons: Vec<ButtonSpec>) -> AlertDialog {
        let n = buttons.len();
        let mut dialog = AlertDialog::new(
            AlertRequest::new("are you sure?").buttons(buttons),
        );
        dialog.bounds = Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 200.0));
        dialog.button_rects = (0..n)
            .map(|i| {
                let x = 20.0 + i as f32 * 90.0;
                Rect::from_min_max(pos2(x, 150.0), pos2(x + 80.0, 180.0))
            })
            .collect();
        dialog
    }

    fn button_center(dialog: &AlertDialog, idx: usize) -> Pos2 {
        dialog.button_rects[idx].center()
    }

    #[test]
    fn test_click_on_button_fires_its_action() {
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("OK", "ok"),
            ButtonSpec::new("Cancel", "cancel"),
        ]);
        let pos = button_center(&dialog, 0);

        dialog.on_press(pos);
        assert_eq!(dialog.states[0], VisualState::Pressed);
        let result = dialog.on_release(pos);
        assert_eq!(result, Some(DialogResult::Button(ActionId::ok())));
    }

    #[test]
    fn test_click_on_surface_dismisses() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        let pos = pos2(200.0, 50.0);

        dialog.on_press(pos);
        assert_eq!(dialog.press, Some(PressTarget::Surface));
        assert_eq!(dialog.on_release(pos), Some(DialogResult::Dismissed));
    }

    #[test]
    fn test_press_button_release_elsewhere_keeps_dialog_open() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);

        dialog.on_press(button_center(&dialog, 0));
        let result = dialog.on_release(pos2(200.0, 50.0));
        assert_eq!(result, None);
        assert_eq!(dialog.states[0], VisualState::Normal);
        assert_eq!(dialog.press, None);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_click_on_disabled_button_falls_through_to_surface() {
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("OK", "ok"),
            ButtonSpec::new("Later", "later").disabled(),
        ]);
        let pos = button_center(&dialog, 1);

        dialog.on_press(pos);
        assert_eq!(dialog.press, Some(PressTarget::Surface));
        assert_eq!(dialog.states[1], VisualState::Disabled);
        assert_eq!(dialog.on_release(pos), Some(DialogResult::Dismissed));
    }

    #[test]
    fn test_press_outside_bounds_is_ignored() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        dialog.on_press(pos2(500.0, 500.0));
        assert_eq!(dialog.press, None);
        assert_eq!(dialog.on_release(pos2(500.0, 500.0)), None);
    }

    #[test]
    fn test_surface_press_released_outside_bounds_keeps_dialog_open() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        dialog.on_press(pos2(200.0, 50.0));
        assert_eq!(dialog.on_release(pos2(500.0, 500.0)), None);
        assert!(dialog.is_open());
    }

    #[test]
    fn test_escape_dismisses() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        let result = dialog.on_key(egui::Key::Escape, egui::Modifiers::NONE);
        assert_eq!(result, Some(DialogResult::Dismissed));
    }

    #[test]
    fn test_tab_cycles_enabled_buttons_only() {
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("Yes", "yes"),
            ButtonSpec::new("No", "no").disabled(),
            ButtonSpec::new("Cancel", "cancel"),
        ]);

        dialog.cycle_focus(false);
        assert_eq!(dialog.focused, Some(0));
        assert_eq!(dialog.states[0], VisualState::Focused);

        dialog.cycle_focus(false);
        assert_eq!(dialog.focused, Some(2), "disabled button is skipped");
        assert_eq!(dialog.states[0], VisualState::Normal);
        assert_eq!(dialog.states[2], VisualState::Focused);

        dialog.cycle_focus(false);
        assert_eq!(dialog.focused, Some(0), "focus wraps");

        dialog.cycle_focus(true);
        assert_eq!(dialog.focused, Some(2), "shift-tab goes backwards");
    }

    #[test]
    fn test_tab_with_no_enabled_buttons_is_a_no_op() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("Nope", "nope").disabled()]);
        dialog.cycle_focus(false);
        assert_eq!(dialog.focused, None);
    }

    #[test]
    fn test_enter_activates_focused_button() {
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("Yes", "yes"),
            ButtonSpec::new("No", "no"),
        ]);
        dialog.cycle_focus(false);
        dialog.cycle_focus(false);

        let result = dialog.on_key(egui::Key::Enter, egui::Modifiers::NONE);
        assert_eq!(result, Some(DialogResult::Button(ActionId::no())));
    }

    #[test]
    fn test_enter_without_focus_activates_a_sole_button() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        let result = dialog.on_key(egui::Key::Enter, egui::Modifiers::NONE);
        assert_eq!(result, Some(DialogResult::Button(ActionId::ok())));
    }

    #[test]
    fn test_enter_fallback_requires_exactly_one_enabled_button() {
        // Two enabled buttons: ambiguous, Enter needs focus.
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("Yes", "yes"),
            ButtonSpec::new("No", "no"),
        ]);
        assert_eq!(dialog.on_key(egui::Key::Enter, egui::Modifiers::NONE), None);

        // One of them disabled: the remaining button is unambiguous.
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("Yes", "yes").disabled(),
            ButtonSpec::new("No", "no"),
        ]);
        let result = dialog.on_key(egui::Key::Enter, egui::Modifiers::NONE);
        assert_eq!(result, Some(DialogResult::Button(ActionId::no())));
    }

    #[test]
    fn test_space_requires_focus() {
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        assert_eq!(dialog.on_key(egui::Key::Space, egui::Modifiers::NONE), None);

        dialog.cycle_focus(false);
        let result = dialog.on_key(egui::Key::Space, egui::Modifiers::NONE);
        assert_eq!(result, Some(DialogResult::Button(ActionId::ok())));
    }

    #[test]
    fn test_pointer_press_steals_keyboard_focus() {
        let mut dialog = laid_out_dialog(vec![
            ButtonSpec::new("Yes", "yes"),
            ButtonSpec::new("No", "no"),
        ]);
        dialog.cycle_focus(false);
        assert_eq!(dialog.focused, Some(0));

        dialog.on_press(pos2(200.0, 50.0));
        assert_eq!(dialog.focused, None);
        assert_eq!(dialog.states[0], VisualState::Normal);
    }

    #[test]
    fn test_dismiss_fires_result_channel_once() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut dialog = AlertDialog::new(AlertRequest::ok("bye")).with_result_sender(tx);

        dialog.dismiss();
        assert!(!dialog.is_open());
        assert_eq!(rx.try_recv(), Ok(DialogResult::Dismissed));

        dialog.dismiss();
        assert!(rx.try_recv().is_err(), "second dismiss must not resend");
    }

    #[test]
    fn test_button_result_reaches_channel() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut dialog = laid_out_dialog(vec![ButtonSpec::new("OK", "ok")]);
        dialog.result_tx = Some(tx);

        let pos = button_center(&dialog, 0);
        dialog.on_press(pos);
        if let Some(result) = dialog.on_release(pos) {
            dialog.finish(result);
        }
        assert_eq!(rx.try_recv(), Ok(DialogResult::Button(ActionId::ok())));
    }
}
