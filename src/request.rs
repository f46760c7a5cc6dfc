//! Caller-facing data model: what to show, and what came back.
//!
//! An [`AlertRequest`] describes the dialog contents and is immutable
//! once shown. The dialog answers with a single [`DialogResult`]. Both
//! sides are plain serde data so hosts can define dialogs declaratively
//! (e.g. from a JSON config) and log results as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier handed back to the caller when a button is
/// activated. The dialog never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional id for a confirming button.
    pub fn ok() -> Self {
        Self::new("ok")
    }

    /// Conventional id for a cancelling button.
    pub fn cancel() -> Self {
        Self::new("cancel")
    }

    pub fn yes() -> Self {
        Self::new("yes")
    }

    pub fn no() -> Self {
        Self::new("no")
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ActionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One button in the dialog's action row. Purely descriptive: the
/// dialog owns the visual state, the host owns what the action means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonSpec {
    /// Text shown on the button.
    pub label: String,
    /// Identifier reported back when this button is activated.
    pub action: ActionId,
    /// Disabled buttons render greyed out and never activate.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>, action: impl Into<ActionId>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            enabled: true,
        }
    }

    /// Mark this button disabled.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Everything the dialog needs from the caller: a message, an optional
/// title heading, and the action buttons in display order.
///
/// An empty button list is fine: the dialog renders message-only and
/// is dismissed by clicking anywhere on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRequest {
    pub message: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

impl AlertRequest {
    /// A message-only request with no buttons.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: None,
            buttons: Vec::new(),
        }
    }

    /// Set the heading shown above the message.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a button. Buttons render in the order they were added.
    pub fn button(mut self, button: ButtonSpec) -> Self {
        self.buttons.push(button);
        self
    }

    /// Append several buttons at once, preserving order.
    pub fn buttons(mut self, buttons: impl IntoIterator<Item = ButtonSpec>) -> Self {
        self.buttons.extend(buttons);
        self
    }

    /// Message with a single OK button.
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(message).button(ButtonSpec::new("OK", ActionId::ok()))
    }

    /// Message with OK and Cancel buttons.
    pub fn ok_cancel(message: impl Into<String>) -> Self {
        Self::new(message)
            .button(ButtonSpec::new("OK", ActionId::ok()))
            .button(ButtonSpec::new("Cancel", ActionId::cancel()))
    }

    /// Message with Yes and No buttons.
    pub fn yes_no(message: impl Into<String>) -> Self {
        Self::new(message)
            .button(ButtonSpec::new("Yes", ActionId::yes()))
            .button(ButtonSpec::new("No", ActionId::no()))
    }

    /// Message with Yes, No and Cancel buttons.
    pub fn yes_no_cancel(message: impl Into<String>) -> Self {
        Self::yes_no(message).button(ButtonSpec::new("Cancel", ActionId::cancel()))
    }
}

/// How the dialog closed. Produced exactly once per dialog instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogResult {
    /// An enabled button was activated.
    Button(ActionId),
    /// Closed without selecting any button (outside click or Escape).
    Dismissed,
}

impl DialogResult {
    /// The selected action, if any. `None` means the dialog was
    /// dismissed.
    pub fn action(&self) -> Option<&ActionId> {
        match self {
            DialogResult::Button(id) => Some(id),
            DialogResult::Dismissed => None,
        }
    }
}
