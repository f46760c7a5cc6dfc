//! Color themes and per-state button styling for the dialog.
//!
//! # Overview
//!
//! The dialog never hard-codes a color. Everything it paints comes out
//! of an [`AlertTheme`] injected at construction, so hosts can restyle
//! the dialog without touching layout or behavior code.
//!
//! # Structure
//!
//! - **Card**: translucent fill, hairline stroke, and a soft drop
//!   shadow. The card sits inside a fully transparent margin that still
//!   belongs to the dialog's click bounds.
//! - **Text**: three emphasis levels (title, message, button labels)
//!   plus a dedicated disabled-label color.
//! - **Buttons**: one fill per visual state, resolved through
//!   [`AlertTheme::button_style`] so rendering code stays a single
//!   lookup. The focused state keeps the base fill and adds an accent
//!   ring.
//!
//! # Overrides
//!
//! [`ThemeOverrides`] is a partial theme deserialized from JSON with
//! every field optional, colors as `#RRGGBB` / `#RRGGBBAA` strings.
//! Unknown or unparseable values keep the built-in default; a bad
//! color is never an error, just a debug log.

use eframe::egui::{Color32, Stroke};
use serde::Deserialize;
use tracing::debug;

use crate::visual_state::VisualState;

/// Complete visual style for one dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertTheme {
    pub name: String,
    /// Translucent card background.
    pub card_fill: Color32,
    /// Hairline border around the card.
    pub card_stroke: Color32,
    /// Drop shadow under the card.
    pub shadow_color: Color32,
    pub accent: Color32,
    pub title_text: Color32,
    pub message_text: Color32,
    pub button_text: Color32,
    pub disabled_text: Color32,
    pub button_normal: Color32,
    pub button_hovered: Color32,
    pub button_pressed: Color32,
    pub button_disabled: Color32,
}

/// Resolved paint values for one button in one visual state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub fill: Color32,
    pub text: Color32,
    pub stroke: Stroke,
}

impl AlertTheme {
    /// Dark theme, the default.
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            card_fill: Color32::from_rgba_unmultiplied(19, 19, 26, 242),
            card_stroke: Color32::from_rgb(47, 49, 54),
            shadow_color: Color32::from_black_alpha(96),
            accent: Color32::from_rgb(88, 101, 242),
            title_text: Color32::WHITE,
            message_text: Color32::from_rgb(185, 187, 190),
            button_text: Color32::WHITE,
            disabled_text: Color32::from_rgb(79, 84, 92),
            button_normal: Color32::from_rgb(55, 60, 70),
            button_hovered: Color32::from_rgb(70, 76, 88),
            button_pressed: Color32::from_rgb(88, 101, 242),
            button_disabled: Color32::from_rgb(35, 38, 45),
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            card_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 242),
            card_stroke: Color32::from_rgb(210, 213, 219),
            shadow_color: Color32::from_black_alpha(48),
            accent: Color32::from_rgb(88, 101, 242),
            title_text: Color32::from_rgb(6, 6, 7),
            message_text: Color32::from_rgb(79, 86, 96),
            button_text: Color32::from_rgb(6, 6, 7),
            disabled_text: Color32::from_rgb(180, 187, 196),
            button_normal: Color32::from_rgb(227, 229, 232),
            button_hovered: Color32::from_rgb(212, 215, 220),
            button_pressed: Color32::from_rgb(88, 101, 242),
            button_disabled: Color32::from_rgb(242, 243, 245),
        }
    }

    /// Paint values for a button in the given state. Pure lookup; the
    /// state machine stays free of rendering concerns.
    pub fn button_style(&self, state: VisualState) -> ButtonStyle {
        match state {
            VisualState::Normal => ButtonStyle {
                fill: self.button_normal,
                text: self.button_text,
                stroke: Stroke::NONE,
            },
            VisualState::Hovered => ButtonStyle {
                fill: self.button_hovered,
                text: self.button_text,
                stroke: Stroke::NONE,
            },
            VisualState::Pressed => ButtonStyle {
                fill: self.button_pressed,
                text: Color32::WHITE,
                stroke: Stroke::NONE,
            },
            VisualState::Focused => ButtonStyle {
                fill: self.button_normal,
                text: self.button_text,
                stroke: Stroke::new(1.5, self.accent),
            },
            VisualState::Disabled => ButtonStyle {
                fill: self.button_disabled,
                text: self.disabled_text,
                stroke: Stroke::NONE,
            },
        }
    }

    /// Apply a partial override on top of this theme. Fields the
    /// override leaves unset, or sets to an unparseable color, keep
    /// their current value.
    pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
        resolve(&mut self.card_fill, &overrides.card_fill, "card_fill");
        resolve(&mut self.card_stroke, &overrides.card_stroke, "card_stroke");
        resolve(
            &mut self.shadow_color,
            &overrides.shadow_color,
            "shadow_color",
        );
        resolve(&mut self.accent, &overrides.accent, "accent");
        resolve(&mut self.title_text, &overrides.title_text, "title_text");
        resolve(
            &mut self.message_text,
            &overrides.message_text,
            "message_text",
        );
        resolve(&mut self.button_text, &overrides.button_text, "button_text");
        resolve(
            &mut self.disabled_text,
            &overrides.disabled_text,
            "disabled_text",
        );
        resolve(
            &mut self.button_normal,
            &overrides.button_normal,
            "button_normal",
        );
        resolve(
            &mut self.button_hovered,
            &overrides.button_hovered,
            "button_hovered",
        );
        resolve(
            &mut self.button_pressed,
            &overrides.button_pressed,
            "button_pressed",
        );
        resolve(
            &mut self.button_disabled,
            &overrides.button_disabled,
            "button_disabled",
        );
        self
    }
}

impl Default for AlertTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Partial theme parsed from JSON. Every field is optional; colors are
/// `#RRGGBB` or `#RRGGBBAA` strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeOverrides {
    pub card_fill: Option<String>,
    pub card_stroke: Option<String>,
    pub shadow_color: Option<String>,
    pub accent: Option<String>,
    pub title_text: Option<String>,
    pub message_text: Option<String>,
    pub button_text: Option<String>,
    pub disabled_text: Option<String>,
    pub button_normal: Option<String>,
    pub button_hovered: Option<String>,
    pub button_pressed: Option<String>,
    pub button_disabled: Option<String>,
}

impl ThemeOverrides {
    /// Parse overrides from a JSON object. Malformed JSON is an error;
    /// individual bad color values are not (they fall back later, in
    /// [`AlertTheme::with_overrides`]).
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn resolve(slot: &mut Color32, value: &Option<String>, field: &'static str) {
    if let Some(hex) = value {
        match parse_color(hex) {
            Some(color) => *slot = color,
            None => debug!(field, value = %hex, "ignoring unparseable theme override"),
        }
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` into a color. Returns `None` for
/// anything else.
fn parse_color(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#')?;
    // from_str_radix tolerates a leading sign; only bare hex digits
    // form a color.
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Color32::from_rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )),
        8 => Some(Color32::from_rgba_unmultiplied(
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let dark = AlertTheme::dark();
        assert_eq!(dark.name, "Dark");

        let light = AlertTheme::light();
        assert_eq!(light.name, "Light");
        assert_ne!(dark.card_fill, light.card_fill);
    }

    #[test]
    fn test_card_fill_is_translucent() {
        assert!(AlertTheme::dark().card_fill.a() < 255);
        assert!(AlertTheme::light().card_fill.a() < 255);
    }

    #[test]
    fn test_button_style_per_state() {
        let theme = AlertTheme::dark();

        let normal = theme.button_style(VisualState::Normal);
        let hovered = theme.button_style(VisualState::Hovered);
        let pressed = theme.button_style(VisualState::Pressed);
        let focused = theme.button_style(VisualState::Focused);
        let disabled = theme.button_style(VisualState::Disabled);

        assert_ne!(normal.fill, hovered.fill);
        assert_eq!(pressed.fill, theme.accent);
        assert_eq!(focused.fill, normal.fill);
        assert_eq!(focused.stroke.color, theme.accent);
        assert_eq!(disabled.text, theme.disabled_text);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0000"), Some(Color32::from_rgb(255, 0, 0)));
        assert_eq!(
            parse_color("#11223344"),
            Some(Color32::from_rgba_unmultiplied(0x11, 0x22, 0x33, 0x44))
        );
        assert_eq!(parse_color("ff0000"), None);
        assert_eq!(parse_color("#ff00"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        // A leading sign is not a hex digit.
        assert_eq!(parse_color("#+ff000"), None);
        assert_eq!(parse_color("#-ff000"), None);
    }

    #[test]
    fn test_overrides_apply_and_fall_back() {
        let overrides = ThemeOverrides::from_json(
            r##"{"accent": "#ff8800", "card_fill": "not-a-color"}"##,
        )
        .unwrap();

        let theme = AlertTheme::dark().with_overrides(&overrides);
        assert_eq!(theme.accent, Color32::from_rgb(255, 136, 0));
        // Bad value keeps the default.
        assert_eq!(theme.card_fill, AlertTheme::dark().card_fill);
        // Untouched fields keep theirs.
        assert_eq!(theme.button_normal, AlertTheme::dark().button_normal);
    }

    #[test]
    fn test_malformed_override_json_is_an_error() {
        assert!(ThemeOverrides::from_json("{not json").is_err());
    }
}
