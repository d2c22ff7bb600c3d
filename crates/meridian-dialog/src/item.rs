//! List items for dialog list sections.
//!
//! [`ListItem`] stores all the data for a single row: label, optional
//! sub-label, icon, check state, per-item colors, and an opaque payload the
//! caller can attach. The dialog's list section holds the items behind a
//! [`SharedItems`] handle so callers can mutate them in place and rebind rows
//! without copying the sequence.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::color::Color;
use crate::icon::Icon;

/// Check state for list rows.
///
/// Rows come in three states, not two: a row either renders no check
/// indicator at all, or renders one that is unchecked or checked. Collapsing
/// "no indicator" into "unchecked" loses the distinction, so it is a variant
/// of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// Row renders no check indicator.
    #[default]
    NoIndicator,
    /// Indicator rendered, unchecked.
    Unchecked,
    /// Indicator rendered, checked.
    Checked,
}

impl CheckState {
    /// Returns `true` if the row is checked.
    pub fn is_checked(&self) -> bool {
        matches!(self, CheckState::Checked)
    }

    /// Returns `true` if the row renders a check indicator.
    pub fn has_indicator(&self) -> bool {
        !matches!(self, CheckState::NoIndicator)
    }

    /// Toggles between Unchecked and Checked.
    /// NoIndicator stays NoIndicator.
    pub fn toggled(&self) -> CheckState {
        match self {
            CheckState::NoIndicator => CheckState::NoIndicator,
            CheckState::Unchecked => CheckState::Checked,
            CheckState::Checked => CheckState::Unchecked,
        }
    }

    /// Build a state from a plain checked flag.
    pub fn from_flag(checked: bool) -> CheckState {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// Presentation style for a dialog list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListStyle {
    /// Plain vertical list.
    #[default]
    List,
    /// Grid of cells.
    Grid,
    /// Vertical list with radio indicators; activating a row checks it and
    /// clears the others.
    SingleChoice,
    /// Vertical list with checkbox indicators; activating a row toggles it.
    MultiChoice,
}

/// An item in a dialog list section.
///
/// Stores all the data for a single row including text, icon, check state,
/// and an opaque payload.
#[derive(Clone, Default)]
pub struct ListItem {
    label: Option<String>,
    sub_label: Option<String>,
    icon: Option<Icon>,
    check: CheckState,
    payload: Option<Arc<dyn Any + Send + Sync>>,
    label_color: Option<Color>,
    sub_label_color: Option<Color>,
}

impl ListItem {
    /// Creates a new item with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Creates an item with no label (e.g. an icon-only grid cell).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an item from an optional label.
    pub fn from_label(label: Option<String>) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    /// Set the secondary line of text (builder style).
    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.sub_label = Some(sub_label.into());
        self
    }

    /// Set the icon (builder style).
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the check state (builder style).
    pub fn with_check(mut self, check: CheckState) -> Self {
        self.check = check;
        self
    }

    /// Attach an opaque payload (builder style).
    ///
    /// The payload rides along with the item; retrieve it with
    /// [`ListItem::payload_as`].
    pub fn with_payload<P: Any + Send + Sync>(mut self, payload: P) -> Self {
        self.payload = Some(Arc::new(payload));
        self
    }

    /// Override the label color (builder style).
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = Some(color);
        self
    }

    /// Override the sub-label color (builder style).
    pub fn with_sub_label_color(mut self, color: Color) -> Self {
        self.sub_label_color = Some(color);
        self
    }

    /// Gets the item's label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sets the item's label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Gets the item's sub-label.
    pub fn sub_label(&self) -> Option<&str> {
        self.sub_label.as_deref()
    }

    /// Sets the item's sub-label.
    pub fn set_sub_label(&mut self, sub_label: Option<String>) {
        self.sub_label = sub_label;
    }

    /// Gets the item's icon.
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// Sets the item's icon.
    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;
    }

    /// Gets the item's check state.
    pub fn check(&self) -> CheckState {
        self.check
    }

    /// Sets the item's check state.
    pub fn set_check(&mut self, check: CheckState) {
        self.check = check;
    }

    /// Sets the opaque payload.
    pub fn set_payload<P: Any + Send + Sync>(&mut self, payload: P) {
        self.payload = Some(Arc::new(payload));
    }

    /// Returns whether the item carries a payload.
    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Gets the payload downcast to a concrete type.
    pub fn payload_as<P: Any + Send + Sync>(&self) -> Option<&P> {
        self.payload.as_deref().and_then(|p| p.downcast_ref())
    }

    /// Gets the label color override.
    pub fn label_color(&self) -> Option<Color> {
        self.label_color
    }

    /// Sets the label color override.
    pub fn set_label_color(&mut self, color: Option<Color>) {
        self.label_color = color;
    }

    /// Gets the sub-label color override.
    pub fn sub_label_color(&self) -> Option<Color> {
        self.sub_label_color
    }

    /// Sets the sub-label color override.
    pub fn set_sub_label_color(&mut self, color: Option<Color>) {
        self.sub_label_color = color;
    }
}

impl fmt::Debug for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListItem")
            .field("label", &self.label)
            .field("sub_label", &self.sub_label)
            .field("icon", &self.icon)
            .field("check", &self.check)
            .field("payload", &self.payload.as_ref().map(|_| "..."))
            .field("label_color", &self.label_color)
            .field("sub_label_color", &self.sub_label_color)
            .finish()
    }
}

/// A shared, mutable item sequence.
///
/// The dialog and its row adapter hold the same handle the caller does, so
/// in-place edits (check a row, change a label) are visible to all of them
/// without re-supplying the sequence.
pub type SharedItems = Arc<RwLock<Vec<ListItem>>>;

/// Wrap an item sequence for sharing with a dialog.
pub fn share_items(items: Vec<ListItem>) -> SharedItems {
    Arc::new(RwLock::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_state_toggled() {
        assert_eq!(CheckState::Unchecked.toggled(), CheckState::Checked);
        assert_eq!(CheckState::Checked.toggled(), CheckState::Unchecked);
        assert_eq!(CheckState::NoIndicator.toggled(), CheckState::NoIndicator);
    }

    #[test]
    fn test_check_state_queries() {
        assert!(CheckState::Checked.is_checked());
        assert!(!CheckState::Unchecked.is_checked());
        assert!(!CheckState::NoIndicator.is_checked());

        assert!(CheckState::Checked.has_indicator());
        assert!(CheckState::Unchecked.has_indicator());
        assert!(!CheckState::NoIndicator.has_indicator());
    }

    #[test]
    fn test_check_state_from_flag() {
        assert_eq!(CheckState::from_flag(true), CheckState::Checked);
        assert_eq!(CheckState::from_flag(false), CheckState::Unchecked);
    }

    #[test]
    fn test_item_builder() {
        let item = ListItem::new("Documents")
            .with_sub_label("128 files")
            .with_icon(Icon::named("folder"))
            .with_check(CheckState::Unchecked)
            .with_label_color(Color::RED);

        assert_eq!(item.label(), Some("Documents"));
        assert_eq!(item.sub_label(), Some("128 files"));
        assert!(item.icon().is_some());
        assert_eq!(item.check(), CheckState::Unchecked);
        assert_eq!(item.label_color(), Some(Color::RED));
        assert_eq!(item.sub_label_color(), None);
    }

    #[test]
    fn test_empty_item_has_no_label() {
        let item = ListItem::empty().with_icon(Icon::named("grid-cell"));
        assert_eq!(item.label(), None);
        assert!(item.icon().is_some());
    }

    #[test]
    fn test_from_label() {
        assert_eq!(ListItem::from_label(Some("a".into())).label(), Some("a"));
        assert_eq!(ListItem::from_label(None).label(), None);
    }

    #[test]
    fn test_payload_downcast() {
        #[derive(Debug, PartialEq)]
        struct PackageRef {
            id: u64,
        }

        let item = ListItem::new("app").with_payload(PackageRef { id: 7 });
        assert!(item.has_payload());
        assert_eq!(item.payload_as::<PackageRef>(), Some(&PackageRef { id: 7 }));
        assert_eq!(item.payload_as::<String>(), None);

        let plain = ListItem::new("no payload");
        assert!(!plain.has_payload());
        assert_eq!(plain.payload_as::<PackageRef>(), None);
    }

    #[test]
    fn test_shared_items_mutate_in_place() {
        let items = share_items(vec![ListItem::new("a"), ListItem::new("b")]);
        let alias = Arc::clone(&items);

        alias.write()[1].set_check(CheckState::Checked);

        assert_eq!(items.read()[1].check(), CheckState::Checked);
        assert_eq!(items.read()[0].check(), CheckState::NoIndicator);
    }
}
