//! Per-button visual state machine.
//!
//! Each button's rendered appearance is one of five buckets, advanced
//! by a pure transition function with no rendering or side effects.
//! The dialog feeds it pointer and focus events and acts on the
//! returned `fired` flag; the machine itself never touches the UI.
//!
//! States are ephemeral: they are re-derived from input every frame
//! and never persisted.

/// Cosmetic style bucket for a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    /// Base appearance, no interaction in progress.
    Normal,
    /// Pointer is over the button.
    Hovered,
    /// Primary pointer button went down on the button and has not been
    /// released yet. Sticky: the state survives the pointer leaving
    /// the rect mid-press.
    Pressed,
    /// Holds keyboard focus. Pointer states win when both apply.
    Focused,
    /// Not interactive. Absorbs every event except re-enabling.
    Disabled,
}

impl VisualState {
    /// State a button starts in before any input arrives.
    pub fn initial(enabled: bool) -> Self {
        if enabled {
            VisualState::Normal
        } else {
            VisualState::Disabled
        }
    }

    pub fn is_disabled(self) -> bool {
        self == VisualState::Disabled
    }
}

/// Input event for one button. `Press`/`Release` are pointer gestures;
/// keyboard activation is resolved by the dialog without driving the
/// machine through a press.
///
/// The two "leave" events carry what the other input modality is doing
/// at that moment, so the transition function needs no external state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    PointerEnter,
    PointerLeave {
        /// Whether the button still holds keyboard focus.
        focus_held: bool,
    },
    Press,
    Release {
        /// Whether the pointer was over the button at release.
        inside: bool,
    },
    FocusGained,
    FocusLost {
        /// Whether the pointer is over the button right now.
        pointer_inside: bool,
    },
    Disable,
    Enable,
}

/// Outcome of one transition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: VisualState,
    /// True exactly when the press resolved over the button, i.e. the
    /// button's action should fire.
    pub fired: bool,
}

impl Transition {
    fn to(next: VisualState) -> Self {
        Self { next, fired: false }
    }

    fn fire(next: VisualState) -> Self {
        Self { next, fired: true }
    }
}

/// Advance one button's visual state by one event.
///
/// Total over all state/event pairs; unexpected combinations (say, a
/// release without a press) leave the state unchanged.
pub fn transition(state: VisualState, event: ButtonEvent) -> Transition {
    use ButtonEvent as E;
    use VisualState as S;

    // Enablement outranks everything else.
    if event == E::Disable {
        return Transition::to(S::Disabled);
    }
    if state == S::Disabled {
        return match event {
            E::Enable => Transition::to(S::Normal),
            _ => Transition::to(S::Disabled),
        };
    }

    match (state, event) {
        (S::Normal, E::PointerEnter) => Transition::to(S::Hovered),
        // Press events are delivered by hit-testing the press position,
        // so one arriving while still Normal means the pointer is on
        // the button even though no enter event was seen (press and
        // move can land in the same input batch).
        (S::Normal, E::Press) => Transition::to(S::Pressed),
        (S::Normal, E::FocusGained) => Transition::to(S::Focused),

        (S::Hovered, E::PointerLeave { focus_held: true }) => Transition::to(S::Focused),
        (S::Hovered, E::PointerLeave { focus_held: false }) => Transition::to(S::Normal),
        (S::Hovered, E::Press) => Transition::to(S::Pressed),
        (S::Hovered, E::FocusGained) => Transition::to(S::Focused),

        // A press stays pressed until the pointer button comes back up,
        // no matter where the pointer wanders or what focus does.
        (S::Pressed, E::Release { inside: true }) => Transition::fire(S::Hovered),
        (S::Pressed, E::Release { inside: false }) => Transition::to(S::Normal),
        (S::Pressed, _) => Transition::to(S::Pressed),

        (S::Focused, E::PointerEnter) => Transition::to(S::Hovered),
        (S::Focused, E::Press) => Transition::to(S::Pressed),
        (S::Focused, E::FocusLost { pointer_inside: true }) => Transition::to(S::Hovered),
        (S::Focused, E::FocusLost { pointer_inside: false }) => Transition::to(S::Normal),
        (S::Focused, E::PointerLeave { focus_held: false }) => Transition::to(S::Normal),

        (other, _) => Transition::to(other),
    }
}
