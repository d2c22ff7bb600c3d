//! The three-slot action button row at the bottom of a dialog.
//!
//! Dialogs carry up to three named buttons. Divider visibility is derived
//! purely from how many buttons are currently visible, via a small lookup
//! table: the outer divider separates the row from the dialog body, the two
//! inner dividers separate adjacent button slots.

// ============================================================================
// Button Kind
// ============================================================================

/// Identifies one of the three dialog action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// The affirmative action (e.g., OK, Save).
    Positive,
    /// The alternative action (e.g., Later, Details).
    Neutral,
    /// The dismissive action (e.g., Cancel, No).
    Negative,
}

impl ButtonKind {
    /// All kinds in on-screen order, left to right.
    pub const ALL: [ButtonKind; 3] = [ButtonKind::Negative, ButtonKind::Neutral, ButtonKind::Positive];

    /// Slot index in on-screen order.
    pub(crate) fn slot(self) -> usize {
        match self {
            ButtonKind::Negative => 0,
            ButtonKind::Neutral => 1,
            ButtonKind::Positive => 2,
        }
    }
}

// ============================================================================
// Button State
// ============================================================================

/// Display state of one configured button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    /// Button label.
    pub text: String,
    /// Whether clicks are accepted.
    pub enabled: bool,
    /// Whether the button is shown.
    pub visible: bool,
}

impl ButtonState {
    /// Create a visible, enabled button with the given label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: true,
            visible: true,
        }
    }
}

// ============================================================================
// Dividers
// ============================================================================

/// Divider visibility for the button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonDividers {
    /// The horizontal divider between the dialog body and the button row.
    pub outer: bool,
    /// The vertical divider after the first button slot.
    pub inner_left: bool,
    /// The vertical divider before the last button slot.
    pub inner_right: bool,
}

impl ButtonDividers {
    /// Derive divider visibility from the number of visible buttons.
    ///
    /// No buttons means no dividers at all; one button needs only the outer
    /// divider; each additional button adds one inner divider.
    pub fn for_visible_count(count: usize) -> Self {
        match count {
            0 => Self {
                outer: false,
                inner_left: false,
                inner_right: false,
            },
            1 => Self {
                outer: true,
                inner_left: false,
                inner_right: false,
            },
            2 => Self {
                outer: true,
                inner_left: true,
                inner_right: false,
            },
            _ => Self {
                outer: true,
                inner_left: true,
                inner_right: true,
            },
        }
    }
}

// ============================================================================
// Button Row
// ============================================================================

/// The dialog's action button row.
///
/// Holds up to one button per [`ButtonKind`]. A button can be hidden without
/// being removed, keeping its text and enabled flag for when it is shown
/// again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ButtonRow {
    buttons: [Option<ButtonState>; 3],
}

impl ButtonRow {
    /// Create an empty button row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a button, or update the text of an existing one.
    ///
    /// A newly configured button starts visible and enabled; an existing
    /// button keeps its flags.
    pub fn set_button(&mut self, kind: ButtonKind, text: impl Into<String>) {
        match &mut self.buttons[kind.slot()] {
            Some(state) => state.text = text.into(),
            slot => *slot = Some(ButtonState::new(text)),
        }
    }

    /// Install a button with explicit state, replacing any previous one.
    pub fn set_state(&mut self, kind: ButtonKind, state: ButtonState) {
        self.buttons[kind.slot()] = Some(state);
    }

    /// Remove a button entirely.
    ///
    /// Returns `true` if a button was configured for that kind.
    pub fn remove_button(&mut self, kind: ButtonKind) -> bool {
        self.buttons[kind.slot()].take().is_some()
    }

    /// Enable or disable a configured button.
    ///
    /// Returns `false` if no button is configured for that kind.
    pub fn set_enabled(&mut self, kind: ButtonKind, enabled: bool) -> bool {
        match &mut self.buttons[kind.slot()] {
            Some(state) => {
                state.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Show or hide a configured button without discarding its state.
    ///
    /// Returns `false` if no button is configured for that kind.
    pub fn set_visible(&mut self, kind: ButtonKind, visible: bool) -> bool {
        match &mut self.buttons[kind.slot()] {
            Some(state) => {
                state.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Get the state of a configured button.
    pub fn button(&self, kind: ButtonKind) -> Option<&ButtonState> {
        self.buttons[kind.slot()].as_ref()
    }

    /// Number of currently visible buttons.
    pub fn visible_count(&self) -> usize {
        self.buttons
            .iter()
            .filter(|b| b.as_ref().is_some_and(|s| s.visible))
            .count()
    }

    /// Divider visibility derived from the visible button count.
    pub fn dividers(&self) -> ButtonDividers {
        ButtonDividers::for_visible_count(self.visible_count())
    }

    /// Iterate configured buttons in on-screen order.
    pub fn iter(&self) -> impl Iterator<Item = (ButtonKind, &ButtonState)> {
        ButtonKind::ALL
            .iter()
            .filter_map(|&kind| self.button(kind).map(|state| (kind, state)))
    }

    /// Returns `true` if a visible, enabled button exists for the kind.
    pub fn accepts_click(&self, kind: ButtonKind) -> bool {
        self.button(kind)
            .is_some_and(|state| state.visible && state.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divider_table() {
        assert_eq!(
            ButtonDividers::for_visible_count(0),
            ButtonDividers {
                outer: false,
                inner_left: false,
                inner_right: false,
            }
        );
        assert_eq!(
            ButtonDividers::for_visible_count(1),
            ButtonDividers {
                outer: true,
                inner_left: false,
                inner_right: false,
            }
        );
        assert_eq!(
            ButtonDividers::for_visible_count(2),
            ButtonDividers {
                outer: true,
                inner_left: true,
                inner_right: false,
            }
        );
        assert_eq!(
            ButtonDividers::for_visible_count(3),
            ButtonDividers {
                outer: true,
                inner_left: true,
                inner_right: true,
            }
        );
    }

    #[test]
    fn test_dividers_track_visibility() {
        let mut row = ButtonRow::new();
        assert_eq!(row.dividers(), ButtonDividers::for_visible_count(0));

        row.set_button(ButtonKind::Positive, "OK");
        assert_eq!(row.dividers(), ButtonDividers::for_visible_count(1));

        row.set_button(ButtonKind::Negative, "Cancel");
        assert_eq!(row.dividers(), ButtonDividers::for_visible_count(2));

        row.set_button(ButtonKind::Neutral, "Later");
        assert_eq!(row.dividers(), ButtonDividers::for_visible_count(3));

        row.set_visible(ButtonKind::Neutral, false);
        assert_eq!(row.dividers(), ButtonDividers::for_visible_count(2));
    }

    #[test]
    fn test_hide_preserves_state() {
        let mut row = ButtonRow::new();
        row.set_button(ButtonKind::Positive, "Install");
        row.set_enabled(ButtonKind::Positive, false);

        assert!(row.set_visible(ButtonKind::Positive, false));
        assert_eq!(row.visible_count(), 0);

        let state = row.button(ButtonKind::Positive).unwrap();
        assert_eq!(state.text, "Install");
        assert!(!state.enabled);
        assert!(!state.visible);
    }

    #[test]
    fn test_set_button_updates_text_without_resetting_flags() {
        let mut row = ButtonRow::new();
        row.set_button(ButtonKind::Positive, "Install");
        row.set_enabled(ButtonKind::Positive, false);

        row.set_button(ButtonKind::Positive, "Installing");

        let state = row.button(ButtonKind::Positive).unwrap();
        assert_eq!(state.text, "Installing");
        assert!(!state.enabled);
    }

    #[test]
    fn test_remove_button() {
        let mut row = ButtonRow::new();
        row.set_button(ButtonKind::Negative, "Cancel");

        assert!(row.remove_button(ButtonKind::Negative));
        assert!(row.button(ButtonKind::Negative).is_none());
        assert!(!row.remove_button(ButtonKind::Negative));
    }

    #[test]
    fn test_missing_button_rejects_updates() {
        let mut row = ButtonRow::new();
        assert!(!row.set_enabled(ButtonKind::Neutral, true));
        assert!(!row.set_visible(ButtonKind::Neutral, false));
        assert!(!row.accepts_click(ButtonKind::Neutral));
    }

    #[test]
    fn test_accepts_click() {
        let mut row = ButtonRow::new();
        row.set_button(ButtonKind::Positive, "OK");
        assert!(row.accepts_click(ButtonKind::Positive));

        row.set_enabled(ButtonKind::Positive, false);
        assert!(!row.accepts_click(ButtonKind::Positive));

        row.set_enabled(ButtonKind::Positive, true);
        row.set_visible(ButtonKind::Positive, false);
        assert!(!row.accepts_click(ButtonKind::Positive));
    }

    #[test]
    fn test_iteration_is_on_screen_order() {
        let mut row = ButtonRow::new();
        row.set_button(ButtonKind::Positive, "OK");
        row.set_button(ButtonKind::Negative, "Cancel");
        row.set_button(ButtonKind::Neutral, "Later");

        let kinds: Vec<_> = row.iter().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![ButtonKind::Negative, ButtonKind::Neutral, ButtonKind::Positive]
        );
    }
}
