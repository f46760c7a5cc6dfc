//! Borderless, translucent alert dialogs for egui.
//!
//! A dialog shows a message and a row of action buttons, sizes itself
//! to its content up to a hard height cap, and closes on the first
//! terminal interaction: an enabled button click, a click anywhere
//! else on the dialog, or Escape. Each instance reports exactly one
//! [`DialogResult`].
//!
//! Blocking use, in its own frameless window:
//!
//! ```no_run
//! use glass_alert::{show_alert, AlertRequest};
//!
//! let result = show_alert(AlertRequest::yes_no("Purge all images?").title("Purge Images"))?;
//! println!("answered: {:?}", result.action());
//! # Ok::<(), glass_alert::Error>(())
//! ```
//!
//! Embedded use: keep an [`AlertManager`] in your app state, call
//! [`AlertManager::render`] every frame, and act on the result it
//! returns on the frame the dialog closes.

pub mod dialog;
pub mod error;
pub mod manager;
pub mod request;
pub mod runner;
pub mod theme;
pub mod visual_state;


pub use dialog::{AlertDialog, DIALOG_WIDTH, MAX_DIALOG_HEIGHT};
pub use error::{Error, Result};
pub use manager::AlertManager;
pub use request::{ActionId, AlertRequest, ButtonSpec, DialogResult};
pub use runner::{show_alert, show_alert_with_theme};
pub use theme::{AlertTheme, ButtonStyle, ThemeOverrides};
pub use visual_state::{transition, ButtonEvent, Transition, VisualState};
