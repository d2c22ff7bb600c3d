//! The dialog widget: per-section state, lifecycle, and change signals.
//!
//! A [`Dialog`] is populated from an immutable [`DialogConfig`]; sections
//! whose configuration is absent stay hidden. All state changes go through
//! methods that emit the matching public [`Signal`] field, so embedding code
//! can connect either directly or through the builder's `on_*` listeners.
//!
//! Rebuilding swaps the configuration and repopulates every section in place
//! while the dialog stays visible. Listeners installed by the old
//! configuration are disconnected; connections made directly on the signal
//! fields survive a rebuild.

use std::sync::Arc;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;

use meridian_dialog_core::{ConnectionId, Signal};

use crate::adapter::{RowAdapter, RowTheme, RowView};
use crate::button_row::{ButtonDividers, ButtonKind, ButtonRow, ButtonState};
use crate::config::{CheckboxConfig, DialogConfig, EditConfig, ProgressConfig};
use crate::icon::Icon;
use crate::item::{CheckState, ListItem, ListStyle, SharedItems};

// ============================================================================
// Section State
// ============================================================================

/// A labelled checkbox with its live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckField {
    pub text: String,
    pub checked: bool,
}

impl From<&CheckboxConfig> for CheckField {
    fn from(config: &CheckboxConfig) -> Self {
        Self {
            text: config.text.clone(),
            checked: config.checked,
        }
    }
}

/// The dialog's title bar.
#[derive(Debug, Clone, Default)]
pub struct TitleBar {
    pub icon: Option<Icon>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub checkbox: Option<CheckField>,
    pub spinner_visible: bool,
}

/// Live progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressSection {
    /// A spinner next to a static message.
    Spinner { message: Option<String> },
    /// A bar counting `current` out of `maximum`.
    Bar {
        maximum: i32,
        current: i32,
        message: Option<String>,
    },
    /// A bar sweeping without counts.
    SweepingBar { message: Option<String> },
}

impl From<&ProgressConfig> for ProgressSection {
    fn from(config: &ProgressConfig) -> Self {
        match config {
            ProgressConfig::Indeterminate { message } => Self::Spinner {
                message: message.clone(),
            },
            ProgressConfig::Horizontal {
                maximum,
                current,
                message,
            } => Self::Bar {
                maximum: *maximum,
                current: *current,
                message: message.clone(),
            },
            ProgressConfig::IndeterminateHorizontal { message } => Self::SweepingBar {
                message: message.clone(),
            },
        }
    }
}

/// Live edit field state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditField {
    pub text: String,
    pub hint: Option<String>,
}

impl From<&EditConfig> for EditField {
    fn from(config: &EditConfig) -> Self {
        Self {
            text: config.text.clone(),
            hint: config.hint.clone(),
        }
    }
}

/// Live list state: the shared items plus the adapter bound over them.
#[derive(Clone)]
pub struct ListSection {
    pub style: ListStyle,
    pub items: SharedItems,
    pub adapter: RowAdapter,
}

impl std::fmt::Debug for ListSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListSection")
            .field("style", &self.style)
            .field("len", &self.items.read().len())
            .finish()
    }
}

/// ConnectionIds of the listeners installed from the current config.
#[derive(Default)]
struct ListenerConnections {
    button: Option<ConnectionId>,
    item_activated: Option<ConnectionId>,
    multi_choice: Option<ConnectionId>,
    checkbox: Option<ConnectionId>,
    title_checkbox: Option<ConnectionId>,
    edit: Option<ConnectionId>,
    show: Option<ConnectionId>,
    cancel: Option<ConnectionId>,
    dismiss: Option<ConnectionId>,
}

// ============================================================================
// Dialog
// ============================================================================

/// A modal dialog assembled from a validated configuration.
///
/// # Example
///
/// ```
/// use meridian_dialog::{ButtonKind, DialogBuilder};
///
/// let mut dialog = DialogBuilder::new()
///     .title("Update available")
///     .message("Version 2.4 is ready to install.")
///     .positive_button("Install")
///     .negative_button("Not now")
///     .build()
///     .unwrap();
///
/// dialog.show();
/// dialog.click_button(ButtonKind::Positive);
/// dialog.dismiss();
/// ```
pub struct Dialog {
    config: DialogConfig,
    visible: bool,

    title_bar: TitleBar,
    message: Option<String>,
    progress: Option<ProgressSection>,
    list: Option<ListSection>,
    edit: Option<EditField>,
    checkbox: Option<CheckField>,
    buttons: ButtonRow,

    listener_connections: ListenerConnections,

    /// Emitted by [`show`](Self::show).
    pub shown: Signal<()>,
    /// Emitted by [`dismiss`](Self::dismiss), including the cancel path.
    pub dismissed: Signal<()>,
    /// Emitted by [`cancel`](Self::cancel), before `dismissed`.
    pub canceled: Signal<()>,
    /// Emitted when a visible, enabled button is clicked.
    pub button_clicked: Signal<ButtonKind>,
    /// Emitted for every accepted row activation.
    pub item_activated: Signal<usize>,
    /// Emitted after a multi-choice row toggles: `(position, checked)`.
    pub multi_choice_changed: Signal<(usize, bool)>,
    /// Emitted when the body checkbox changes state.
    pub checkbox_toggled: Signal<bool>,
    /// Emitted when the title bar checkbox changes state.
    pub title_checkbox_toggled: Signal<bool>,
    /// Emitted when the edit field text changes.
    pub edit_changed: Signal<String>,
    /// Emitted when the progress bar value changes.
    pub progress_changed: Signal<i32>,
}

assert_impl_all!(Dialog: Send, Sync);

impl Dialog {
    /// Construct a dialog from a validated configuration.
    ///
    /// Prefer [`DialogBuilder::build`](crate::DialogBuilder::build), which
    /// validates and constructs in one step. The dialog starts hidden.
    pub fn new(config: DialogConfig) -> Self {
        let mut dialog = Self {
            config,
            visible: false,
            title_bar: TitleBar::default(),
            message: None,
            progress: None,
            list: None,
            edit: None,
            checkbox: None,
            buttons: ButtonRow::new(),
            listener_connections: ListenerConnections::default(),
            shown: Signal::new(),
            dismissed: Signal::new(),
            canceled: Signal::new(),
            button_clicked: Signal::new(),
            item_activated: Signal::new(),
            multi_choice_changed: Signal::new(),
            checkbox_toggled: Signal::new(),
            title_checkbox_toggled: Signal::new(),
            edit_changed: Signal::new(),
            progress_changed: Signal::new(),
        };
        dialog.populate();
        dialog
    }

    /// Wrap the dialog for shared ownership across threads.
    pub fn into_shared(self) -> SharedDialog {
        Arc::new(Mutex::new(self))
    }

    /// Reset every section from the stored configuration.
    fn populate(&mut self) {
        self.disconnect_config_listeners();

        self.title_bar = TitleBar {
            icon: self.config.icon.clone(),
            title: self.config.title.clone(),
            subtitle: self.config.subtitle.clone(),
            checkbox: self.config.title_checkbox.as_ref().map(CheckField::from),
            spinner_visible: self.config.title_spinner,
        };
        self.message = self.config.message.clone();
        self.progress = self.config.progress.as_ref().map(ProgressSection::from);
        self.list = self.config.list.as_ref().map(|list| ListSection {
            style: list.style,
            items: Arc::clone(&list.items),
            adapter: RowAdapter::with_theme(
                Arc::clone(&list.items),
                list.style,
                RowTheme::from(self.config.theme),
            ),
        });
        self.edit = self.config.edit.as_ref().map(EditField::from);
        self.checkbox = self.config.checkbox.as_ref().map(CheckField::from);

        let mut buttons = ButtonRow::new();
        for kind in ButtonKind::ALL {
            if let Some(button) = self.config.button(kind) {
                buttons.set_state(
                    kind,
                    ButtonState {
                        text: button.text.clone(),
                        enabled: button.enabled,
                        visible: true,
                    },
                );
            }
        }
        self.buttons = buttons;

        self.connect_config_listeners();

        tracing::debug!(
            target: "meridian_dialog::dialog",
            has_message = self.message.is_some(),
            has_progress = self.progress.is_some(),
            has_list = self.list.is_some(),
            buttons = self.buttons.visible_count(),
            "dialog populated"
        );
    }

    fn connect_config_listeners(&mut self) {
        let listeners = self.config.listeners.clone();
        let mut ids = ListenerConnections::default();

        if let Some(listener) = listeners.button {
            ids.button = Some(self.button_clicked.connect(move |&kind| listener(kind)));
        }
        if let Some(listener) = listeners.item_activated {
            ids.item_activated = Some(
                self.item_activated
                    .connect(move |&position| listener(position)),
            );
        }
        if let Some(listener) = listeners.multi_choice {
            ids.multi_choice = Some(
                self.multi_choice_changed
                    .connect(move |&(position, checked)| listener(position, checked)),
            );
        }
        if let Some(listener) = listeners.checkbox {
            ids.checkbox = Some(
                self.checkbox_toggled
                    .connect(move |&checked| listener(checked)),
            );
        }
        if let Some(listener) = listeners.title_checkbox {
            ids.title_checkbox = Some(
                self.title_checkbox_toggled
                    .connect(move |&checked| listener(checked)),
            );
        }
        if let Some(listener) = listeners.edit {
            ids.edit = Some(self.edit_changed.connect(move |text| listener(text)));
        }
        if let Some(listener) = listeners.show {
            ids.show = Some(self.shown.connect(move |_| listener()));
        }
        if let Some(listener) = listeners.cancel {
            ids.cancel = Some(self.canceled.connect(move |_| listener()));
        }
        if let Some(listener) = listeners.dismiss {
            ids.dismiss = Some(self.dismissed.connect(move |_| listener()));
        }

        self.listener_connections = ids;
    }

    fn disconnect_config_listeners(&mut self) {
        let ids = std::mem::take(&mut self.listener_connections);
        if let Some(id) = ids.button {
            self.button_clicked.disconnect(id);
        }
        if let Some(id) = ids.item_activated {
            self.item_activated.disconnect(id);
        }
        if let Some(id) = ids.multi_choice {
            self.multi_choice_changed.disconnect(id);
        }
        if let Some(id) = ids.checkbox {
            self.checkbox_toggled.disconnect(id);
        }
        if let Some(id) = ids.title_checkbox {
            self.title_checkbox_toggled.disconnect(id);
        }
        if let Some(id) = ids.edit {
            self.edit_changed.disconnect(id);
        }
        if let Some(id) = ids.show {
            self.shown.disconnect(id);
        }
        if let Some(id) = ids.cancel {
            self.canceled.disconnect(id);
        }
        if let Some(id) = ids.dismiss {
            self.dismissed.disconnect(id);
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Show the dialog. Emits [`shown`](Self::shown).
    ///
    /// Showing a visible dialog is a no-op.
    pub fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.shown.emit(());
    }

    /// Hide the dialog. Emits [`dismissed`](Self::dismissed).
    ///
    /// Dismissing a hidden dialog is a no-op.
    pub fn dismiss(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        self.dismissed.emit(());
    }

    /// Cancel the dialog: emits [`canceled`](Self::canceled), then dismisses.
    ///
    /// Does nothing when the dialog is hidden or the configuration is not
    /// cancelable.
    pub fn cancel(&mut self) {
        if !self.visible || !self.config.cancelable {
            return;
        }
        self.canceled.emit(());
        self.dismiss();
    }

    /// Route a click outside the dialog surface.
    ///
    /// Cancels when the configuration opted in via
    /// [`cancel_on_outside_click`](crate::DialogBuilder::cancel_on_outside_click).
    pub fn outside_click(&mut self) {
        if self.config.cancel_on_outside_click {
            self.cancel();
        }
    }

    /// Whether the dialog is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the dialog can be canceled.
    pub fn is_cancelable(&self) -> bool {
        self.config.cancelable
    }

    // ------------------------------------------------------------------
    // Rebuild
    // ------------------------------------------------------------------

    /// Replace the configuration and repopulate every section in place.
    ///
    /// Visibility is kept; sections not present in the new configuration
    /// disappear. Listeners from the old configuration are disconnected and
    /// the new configuration's listeners installed. Connections made directly
    /// on the signal fields survive.
    pub fn rebuild_with(&mut self, config: DialogConfig) {
        self.config = config;
        self.populate();
    }

    /// Re-apply the stored configuration.
    ///
    /// Used after mutating shared items in place so section state derived
    /// from the configuration is recomputed.
    pub fn rebuild(&mut self) {
        self.populate();
    }

    /// The configuration the dialog was last populated from.
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Press a button programmatically.
    ///
    /// Hidden or disabled buttons ignore the click. A click never dismisses
    /// the dialog on its own; connected slots decide what happens next.
    pub fn click_button(&self, kind: ButtonKind) {
        if !self.buttons.accepts_click(kind) {
            tracing::trace!(target: "meridian_dialog::dialog", ?kind, "button click ignored");
            return;
        }
        self.button_clicked.emit(kind);
    }

    /// Configure a button, or update the text of an existing one.
    pub fn set_button(&mut self, kind: ButtonKind, text: impl Into<String>) {
        self.buttons.set_button(kind, text);
    }

    /// Enable or disable a button. Returns `false` if none is configured.
    pub fn set_button_enabled(&mut self, kind: ButtonKind, enabled: bool) -> bool {
        self.buttons.set_enabled(kind, enabled)
    }

    /// Remove a button. Returns `false` if none was configured.
    pub fn remove_button(&mut self, kind: ButtonKind) -> bool {
        self.buttons.remove_button(kind)
    }

    /// The button row.
    pub fn buttons(&self) -> &ButtonRow {
        &self.buttons
    }

    /// Divider visibility derived from the visible button count.
    pub fn button_dividers(&self) -> ButtonDividers {
        self.buttons.dividers()
    }

    // ------------------------------------------------------------------
    // List
    // ------------------------------------------------------------------

    /// Activate the row at `position` as if tapped.
    ///
    /// Out-of-bounds positions and dialogs without a list do nothing.
    /// Selection semantics depend on the list style:
    ///
    /// - Single-choice: the activated item becomes checked; every other item
    ///   carrying an indicator is cleared.
    /// - Multi-choice: the activated item toggles, unless it carries no
    ///   indicator.
    /// - List and grid: item state is untouched.
    ///
    /// Emits [`item_activated`](Self::item_activated) for every accepted
    /// activation, then [`multi_choice_changed`](Self::multi_choice_changed)
    /// when a multi-choice item toggled.
    pub fn activate_row(&self, position: usize) {
        let Some(list) = &self.list else {
            return;
        };

        let mut toggled = None;
        {
            let mut items = list.items.write();
            if position >= items.len() {
                return;
            }
            match list.style {
                ListStyle::SingleChoice => {
                    for (i, item) in items.iter_mut().enumerate() {
                        if i == position {
                            item.set_check(CheckState::Checked);
                        } else if item.check().has_indicator() {
                            item.set_check(CheckState::Unchecked);
                        }
                    }
                }
                ListStyle::MultiChoice => {
                    let item = &mut items[position];
                    if item.check().has_indicator() {
                        let state = item.check().toggled();
                        item.set_check(state);
                        toggled = Some(state.is_checked());
                    }
                }
                ListStyle::List | ListStyle::Grid => {}
            }
        }

        self.item_activated.emit(position);
        if let Some(checked) = toggled {
            self.multi_choice_changed.emit((position, checked));
        }
    }

    /// Clone out every checked item.
    pub fn checked_items(&self) -> Vec<ListItem> {
        self.list.as_ref().map_or_else(Vec::new, |list| {
            list.items
                .read()
                .iter()
                .filter(|item| item.check().is_checked())
                .cloned()
                .collect()
        })
    }

    /// Positions of every checked item, ascending.
    pub fn checked_positions(&self) -> Vec<usize> {
        self.list.as_ref().map_or_else(Vec::new, |list| {
            list.items
                .read()
                .iter()
                .enumerate()
                .filter(|(_, item)| item.check().is_checked())
                .map(|(position, _)| position)
                .collect()
        })
    }

    /// Force every item to checked or unchecked, indicator-less items
    /// included.
    pub fn check_all(&self, checked: bool) {
        if let Some(list) = &self.list {
            for item in list.items.write().iter_mut() {
                item.set_check(CheckState::from_flag(checked));
            }
        }
    }

    /// Clone out the item at `position`.
    pub fn item(&self, position: usize) -> Option<ListItem> {
        self.list
            .as_ref()
            .and_then(|list| list.items.read().get(position).cloned())
    }

    /// Number of items in the list section, zero when absent.
    pub fn item_count(&self) -> usize {
        self.list.as_ref().map_or(0, |list| list.items.read().len())
    }

    /// Bind the row at `position` through the list adapter.
    ///
    /// Yields the absent sentinel when no list is shown or the position is
    /// out of bounds.
    pub fn row(&self, position: usize, recycled: Option<RowView>) -> RowView {
        match &self.list {
            Some(list) => list.adapter.row(position, recycled),
            None => RowView::absent(),
        }
    }

    /// The list section, when one is shown.
    pub fn list(&self) -> Option<&ListSection> {
        self.list.as_ref()
    }

    // ------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------

    /// Set the progress bar value, clamped to `0..=maximum`.
    ///
    /// Does nothing unless a counting bar is shown. Emits
    /// [`progress_changed`](Self::progress_changed) when the stored value
    /// changes.
    pub fn set_progress(&mut self, current: i32) {
        let Some(ProgressSection::Bar {
            maximum,
            current: stored,
            ..
        }) = &mut self.progress
        else {
            return;
        };

        let clamped = current.clamp(0, *maximum);
        if clamped == *stored {
            return;
        }
        *stored = clamped;
        self.progress_changed.emit(clamped);
    }

    /// Advance the progress bar by one.
    pub fn increment_progress(&mut self) {
        self.increment_progress_by(1);
    }

    /// Advance the progress bar by `diff`, which may be negative.
    pub fn increment_progress_by(&mut self, diff: i32) {
        if let Some(current) = self.progress_current() {
            self.set_progress(current.saturating_add(diff));
        }
    }

    /// Advance the progress bar and replace the message in one step.
    pub fn increment_progress_with_message(&mut self, diff: i32, message: impl Into<String>) {
        self.set_progress_message(message);
        self.increment_progress_by(diff);
    }

    /// Replace the message on whatever progress section is shown.
    pub fn set_progress_message(&mut self, message: impl Into<String>) {
        match &mut self.progress {
            Some(
                ProgressSection::Spinner { message: slot }
                | ProgressSection::Bar { message: slot, .. }
                | ProgressSection::SweepingBar { message: slot },
            ) => {
                *slot = Some(message.into());
            }
            None => {}
        }
    }

    /// Current progress value, when a counting bar is shown.
    pub fn progress_current(&self) -> Option<i32> {
        match &self.progress {
            Some(ProgressSection::Bar { current, .. }) => Some(*current),
            _ => None,
        }
    }

    /// Progress maximum, when a counting bar is shown.
    pub fn progress_maximum(&self) -> Option<i32> {
        match &self.progress {
            Some(ProgressSection::Bar { maximum, .. }) => Some(*maximum),
            _ => None,
        }
    }

    /// Whole-number completion percentage, rounded down.
    pub fn progress_percent(&self) -> Option<i32> {
        match &self.progress {
            Some(ProgressSection::Bar {
                maximum, current, ..
            }) => Some((i64::from(*current) * 100 / i64::from(*maximum)) as i32),
            _ => None,
        }
    }

    /// The `current/maximum` counter text, when a counting bar is shown.
    pub fn progress_count_text(&self) -> Option<String> {
        match &self.progress {
            Some(ProgressSection::Bar {
                maximum, current, ..
            }) => Some(format!("{current}/{maximum}")),
            _ => None,
        }
    }

    /// Returns `true` when the progress section shows no definite counts.
    ///
    /// `false` when no progress section is shown at all.
    pub fn is_progress_indeterminate(&self) -> bool {
        matches!(
            self.progress,
            Some(ProgressSection::Spinner { .. }) | Some(ProgressSection::SweepingBar { .. })
        )
    }

    /// The message shown with the progress section.
    pub fn progress_message(&self) -> Option<&str> {
        match &self.progress {
            Some(
                ProgressSection::Spinner { message }
                | ProgressSection::Bar { message, .. }
                | ProgressSection::SweepingBar { message },
            ) => message.as_deref(),
            None => None,
        }
    }

    /// The progress section, when one is shown.
    pub fn progress(&self) -> Option<&ProgressSection> {
        self.progress.as_ref()
    }

    // ------------------------------------------------------------------
    // Edit field and checkboxes
    // ------------------------------------------------------------------

    /// Replace the edit field text.
    ///
    /// Does nothing without an edit field. Emits
    /// [`edit_changed`](Self::edit_changed) when the text actually changes.
    pub fn set_edit_text(&mut self, text: impl Into<String>) {
        let Some(edit) = &mut self.edit else {
            return;
        };
        let text = text.into();
        if edit.text == text {
            return;
        }
        edit.text = text.clone();
        self.edit_changed.emit(text);
    }

    /// Current edit field text, when a field is shown.
    pub fn edit_text(&self) -> Option<&str> {
        self.edit.as_ref().map(|edit| edit.text.as_str())
    }

    /// The edit field, when one is shown.
    pub fn edit(&self) -> Option<&EditField> {
        self.edit.as_ref()
    }

    /// Set the body checkbox state.
    ///
    /// Does nothing without a checkbox. Emits
    /// [`checkbox_toggled`](Self::checkbox_toggled) when the state changes.
    pub fn set_checkbox_checked(&mut self, checked: bool) {
        let Some(field) = &mut self.checkbox else {
            return;
        };
        if field.checked == checked {
            return;
        }
        field.checked = checked;
        self.checkbox_toggled.emit(checked);
    }

    /// Whether the body checkbox is checked. `false` when absent.
    pub fn is_checkbox_checked(&self) -> bool {
        self.checkbox.as_ref().is_some_and(|field| field.checked)
    }

    /// The body checkbox, when one is shown.
    pub fn checkbox(&self) -> Option<&CheckField> {
        self.checkbox.as_ref()
    }

    // ------------------------------------------------------------------
    // Title bar
    // ------------------------------------------------------------------

    /// Set the title bar checkbox state.
    ///
    /// Does nothing without a title checkbox. Emits
    /// [`title_checkbox_toggled`](Self::title_checkbox_toggled) on change.
    pub fn set_title_checkbox_checked(&mut self, checked: bool) {
        let Some(field) = &mut self.title_bar.checkbox else {
            return;
        };
        if field.checked == checked {
            return;
        }
        field.checked = checked;
        self.title_checkbox_toggled.emit(checked);
    }

    /// Whether the title bar checkbox is checked. `false` when absent.
    pub fn is_title_checkbox_checked(&self) -> bool {
        self.title_bar
            .checkbox
            .as_ref()
            .is_some_and(|field| field.checked)
    }

    /// Show or hide the small spinner in the title bar.
    pub fn set_title_spinner_visible(&mut self, visible: bool) {
        self.title_bar.spinner_visible = visible;
    }

    /// Replace the title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title_bar.title = Some(title.into());
    }

    /// Replace the subtitle text.
    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.title_bar.subtitle = Some(subtitle.into());
    }

    /// The title bar state.
    pub fn title_bar(&self) -> &TitleBar {
        &self.title_bar
    }

    /// The message section text, when one is shown.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl std::fmt::Debug for Dialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialog")
            .field("visible", &self.visible)
            .field("title", &self.title_bar.title)
            .field("message", &self.message)
            .field("progress", &self.progress)
            .field("list", &self.list)
            .field("edit", &self.edit)
            .field("checkbox", &self.checkbox)
            .field("buttons", &self.buttons)
            .finish()
    }
}

/// A dialog shared across threads, driven from posted closures.
pub type SharedDialog = Arc<Mutex<Dialog>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialogBuilder;
    use crate::item::share_items;
    use meridian_dialog_core::UiHandle;
    use std::sync::atomic::{AtomicI32, Ordering};

    fn counter() -> (Arc<AtomicI32>, impl Fn() + Send + Sync + Clone) {
        let count = Arc::new(AtomicI32::new(0));
        let count_clone = count.clone();
        (count, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_sections_follow_config() {
        let dialog = DialogBuilder::new()
            .title("Update")
            .subtitle("2.4.0")
            .message("Ready to install.")
            .positive_button("Install")
            .build()
            .unwrap();

        assert_eq!(dialog.title_bar().title.as_deref(), Some("Update"));
        assert_eq!(dialog.title_bar().subtitle.as_deref(), Some("2.4.0"));
        assert_eq!(dialog.message(), Some("Ready to install."));
        assert!(dialog.progress().is_none());
        assert!(dialog.list().is_none());
        assert!(dialog.edit().is_none());
        assert!(dialog.checkbox().is_none());
        assert!(dialog.buttons().button(ButtonKind::Positive).is_some());
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_show_and_dismiss_emit_once() {
        let mut dialog = DialogBuilder::new().message("hi").build().unwrap();

        let (shown, on_shown) = counter();
        let (dismissed, on_dismissed) = counter();
        dialog.shown.connect(move |_| on_shown());
        dialog.dismissed.connect(move |_| on_dismissed());

        dialog.show();
        dialog.show(); // already visible
        assert!(dialog.is_visible());
        assert_eq!(shown.load(Ordering::SeqCst), 1);

        dialog.dismiss();
        dialog.dismiss(); // already hidden
        assert!(!dialog.is_visible());
        assert_eq!(dismissed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_emits_before_dismiss() {
        let mut dialog = DialogBuilder::new().message("hi").build().unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));

        let events_clone = events.clone();
        dialog.canceled.connect(move |_| {
            events_clone.lock().push("canceled");
        });
        let events_clone = events.clone();
        dialog.dismissed.connect(move |_| {
            events_clone.lock().push("dismissed");
        });

        dialog.cancel(); // hidden, ignored
        assert!(events.lock().is_empty());

        dialog.show();
        dialog.cancel();
        assert_eq!(*events.lock(), vec!["canceled", "dismissed"]);
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_not_cancelable_ignores_cancel() {
        let mut dialog = DialogBuilder::new()
            .message("working")
            .cancelable(false)
            .build()
            .unwrap();

        let (canceled, on_canceled) = counter();
        dialog.canceled.connect(move |_| on_canceled());

        dialog.show();
        dialog.cancel();
        assert!(dialog.is_visible());
        assert_eq!(canceled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_outside_click_needs_opt_in() {
        let mut dialog = DialogBuilder::new().message("hi").build().unwrap();
        dialog.show();
        dialog.outside_click();
        assert!(dialog.is_visible());

        let mut dialog = DialogBuilder::new()
            .message("hi")
            .cancel_on_outside_click(true)
            .build()
            .unwrap();
        dialog.show();
        dialog.outside_click();
        assert!(!dialog.is_visible());
    }

    #[test]
    fn test_disabled_and_hidden_buttons_ignore_clicks() {
        let mut dialog = DialogBuilder::new()
            .positive_button_enabled("Install", false)
            .build()
            .unwrap();

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let clicks_clone = clicks.clone();
        dialog.button_clicked.connect(move |&kind| {
            clicks_clone.lock().push(kind);
        });

        dialog.click_button(ButtonKind::Positive);
        assert!(clicks.lock().is_empty());

        dialog.set_button_enabled(ButtonKind::Positive, true);
        dialog.click_button(ButtonKind::Positive);
        assert_eq!(*clicks.lock(), vec![ButtonKind::Positive]);

        dialog.remove_button(ButtonKind::Positive);
        dialog.click_button(ButtonKind::Positive);
        assert_eq!(clicks.lock().len(), 1);

        // Never-configured buttons are ignored too.
        dialog.click_button(ButtonKind::Neutral);
        assert_eq!(clicks.lock().len(), 1);
    }

    #[test]
    fn test_click_does_not_dismiss() {
        let mut dialog = DialogBuilder::new()
            .positive_button("OK")
            .build()
            .unwrap();
        dialog.show();
        dialog.click_button(ButtonKind::Positive);
        assert!(dialog.is_visible());
    }

    #[test]
    fn test_button_listener_from_config() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();

        let dialog = DialogBuilder::new()
            .positive_button("OK")
            .negative_button("Cancel")
            .on_button(move |kind| {
                received_clone.lock().push(kind);
            })
            .build()
            .unwrap();

        dialog.click_button(ButtonKind::Negative);
        dialog.click_button(ButtonKind::Positive);
        assert_eq!(
            *received.lock(),
            vec![ButtonKind::Negative, ButtonKind::Positive]
        );
    }

    #[test]
    fn test_dividers_follow_button_changes() {
        let mut dialog = DialogBuilder::new()
            .positive_button("OK")
            .negative_button("Cancel")
            .neutral_button("Later")
            .build()
            .unwrap();
        assert_eq!(dialog.button_dividers(), ButtonDividers::for_visible_count(3));

        dialog.remove_button(ButtonKind::Neutral);
        assert_eq!(dialog.button_dividers(), ButtonDividers::for_visible_count(2));

        dialog.remove_button(ButtonKind::Negative);
        assert_eq!(dialog.button_dividers(), ButtonDividers::for_visible_count(1));

        dialog.remove_button(ButtonKind::Positive);
        assert_eq!(dialog.button_dividers(), ButtonDividers::for_visible_count(0));
    }

    #[test]
    fn test_single_choice_activation_moves_the_check() {
        let dialog = DialogBuilder::new()
            .single_choice_items(["a", "b", "c"], Some(0))
            .build()
            .unwrap();

        let activations = Arc::new(Mutex::new(Vec::new()));
        let activations_clone = activations.clone();
        dialog.item_activated.connect(move |&position| {
            activations_clone.lock().push(position);
        });

        dialog.activate_row(2);
        assert_eq!(dialog.checked_positions(), vec![2]);

        dialog.activate_row(1);
        assert_eq!(dialog.checked_positions(), vec![1]);

        // Activating the checked item keeps it checked.
        dialog.activate_row(1);
        assert_eq!(dialog.checked_positions(), vec![1]);

        assert_eq!(*activations.lock(), vec![2, 1, 1]);
    }

    #[test]
    fn test_single_choice_leaves_indicator_less_items_alone() {
        let items = vec![
            ListItem::new("header"), // no indicator
            ListItem::new("a").with_check(CheckState::Unchecked),
            ListItem::new("b").with_check(CheckState::Checked),
        ];
        let dialog = DialogBuilder::new()
            .list_items(ListStyle::SingleChoice, items)
            .build()
            .unwrap();

        dialog.activate_row(1);

        assert_eq!(dialog.item(0).unwrap().check(), CheckState::NoIndicator);
        assert_eq!(dialog.item(1).unwrap().check(), CheckState::Checked);
        assert_eq!(dialog.item(2).unwrap().check(), CheckState::Unchecked);
    }

    #[test]
    fn test_multi_choice_toggles_only_the_activated_item() {
        let items = vec![
            ListItem::new("a").with_check(CheckState::Unchecked),
            ListItem::new("b").with_check(CheckState::Checked),
            ListItem::new("frozen"), // no indicator, never toggles
        ];
        let dialog = DialogBuilder::new()
            .list_items(ListStyle::MultiChoice, items)
            .build()
            .unwrap();

        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        dialog.multi_choice_changed.connect(move |&(position, checked)| {
            changes_clone.lock().push((position, checked));
        });
        let activations = Arc::new(Mutex::new(Vec::new()));
        let activations_clone = activations.clone();
        dialog.item_activated.connect(move |&position| {
            activations_clone.lock().push(position);
        });

        dialog.activate_row(0);
        assert_eq!(dialog.item(0).unwrap().check(), CheckState::Checked);
        assert_eq!(dialog.item(1).unwrap().check(), CheckState::Checked);

        dialog.activate_row(1);
        assert_eq!(dialog.item(1).unwrap().check(), CheckState::Unchecked);

        dialog.activate_row(2);
        assert_eq!(dialog.item(2).unwrap().check(), CheckState::NoIndicator);

        assert_eq!(*changes.lock(), vec![(0, true), (1, false)]);
        // item_activated still fires for the indicator-less row
        assert_eq!(*activations.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_activate_row_out_of_bounds_is_ignored() {
        let dialog = DialogBuilder::new()
            .multi_choice_items(["a"], &[false])
            .build()
            .unwrap();

        let (activated, on_activated) = counter();
        dialog.item_activated.connect(move |_| on_activated());

        dialog.activate_row(1);
        dialog.activate_row(99);
        assert_eq!(activated.load(Ordering::SeqCst), 0);
        assert_eq!(dialog.checked_positions(), Vec::<usize>::new());
    }

    #[test]
    fn test_plain_list_activation_changes_no_state() {
        let dialog = DialogBuilder::new().items(["a", "b"]).build().unwrap();

        let (activated, on_activated) = counter();
        dialog.item_activated.connect(move |_| on_activated());

        dialog.activate_row(0);
        assert_eq!(activated.load(Ordering::SeqCst), 1);
        assert_eq!(dialog.item(0).unwrap().check(), CheckState::NoIndicator);
    }

    #[test]
    fn test_check_all_overrides_every_item() {
        let items = vec![
            ListItem::new("a"),
            ListItem::new("b").with_check(CheckState::Unchecked),
        ];
        let dialog = DialogBuilder::new()
            .list_items(ListStyle::MultiChoice, items)
            .build()
            .unwrap();

        dialog.check_all(true);
        assert_eq!(dialog.checked_positions(), vec![0, 1]);
        assert_eq!(dialog.checked_items().len(), 2);

        dialog.check_all(false);
        assert!(dialog.checked_positions().is_empty());
    }

    #[test]
    fn test_row_binding_without_list_is_absent() {
        let dialog = DialogBuilder::new().message("hi").build().unwrap();
        assert!(dialog.row(0, None).is_absent());
        assert_eq!(dialog.item_count(), 0);
        assert!(dialog.item(0).is_none());
    }

    #[test]
    fn test_progress_percent_rounds_down() {
        let dialog = DialogBuilder::new()
            .horizontal_progress_at(1000, 750)
            .build()
            .unwrap();
        assert_eq!(dialog.progress_percent(), Some(75));

        let dialog = DialogBuilder::new()
            .horizontal_progress_at(3, 1)
            .build()
            .unwrap();
        assert_eq!(dialog.progress_percent(), Some(33));
        assert_eq!(dialog.progress_count_text(), Some("1/3".into()));
        assert!(!dialog.is_progress_indeterminate());
    }

    #[test]
    fn test_progress_clamps_and_signals_changes() {
        let mut dialog = DialogBuilder::new()
            .horizontal_progress(10)
            .build()
            .unwrap();

        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();
        dialog.progress_changed.connect(move |&value| {
            values_clone.lock().push(value);
        });

        dialog.set_progress(4);
        dialog.set_progress(4); // unchanged, no signal
        dialog.increment_progress();
        dialog.increment_progress_by(3);
        dialog.set_progress(150); // clamps to 10
        dialog.set_progress(-2); // clamps to 0

        assert_eq!(*values.lock(), vec![4, 5, 8, 10, 0]);
        assert_eq!(dialog.progress_current(), Some(0));
        assert_eq!(dialog.progress_maximum(), Some(10));
    }

    #[test]
    fn test_progress_message_updates() {
        let mut dialog = DialogBuilder::new()
            .horizontal_progress(5)
            .progress_message("Starting")
            .build()
            .unwrap();
        assert_eq!(dialog.progress_message(), Some("Starting"));

        dialog.increment_progress_with_message(2, "Halfway");
        assert_eq!(dialog.progress_message(), Some("Halfway"));
        assert_eq!(dialog.progress_current(), Some(2));
    }

    #[test]
    fn test_spinner_ignores_bar_operations() {
        let mut dialog = DialogBuilder::new()
            .indeterminate_progress()
            .progress_message("Connecting")
            .build()
            .unwrap();

        assert!(dialog.is_progress_indeterminate());
        assert_eq!(dialog.progress_percent(), None);
        assert_eq!(dialog.progress_current(), None);
        assert_eq!(dialog.progress_count_text(), None);

        let (changed, on_changed) = counter();
        dialog.progress_changed.connect(move |_| on_changed());
        dialog.set_progress(3);
        dialog.increment_progress();
        assert_eq!(changed.load(Ordering::SeqCst), 0);

        dialog.set_progress_message("Still connecting");
        assert_eq!(dialog.progress_message(), Some("Still connecting"));
    }

    #[test]
    fn test_sweeping_bar_is_indeterminate() {
        let dialog = DialogBuilder::new()
            .indeterminate_horizontal_progress()
            .build()
            .unwrap();
        assert!(dialog.is_progress_indeterminate());
        assert_eq!(dialog.progress_maximum(), None);
    }

    #[test]
    fn test_rebuild_replaces_all_sections() {
        let mut dialog = DialogBuilder::new()
            .title("Installing")
            .message("Copying files")
            .horizontal_progress(100)
            .positive_button("Hide")
            .build()
            .unwrap();
        dialog.show();

        let new_config = DialogBuilder::new()
            .title("Done")
            .items(["View log", "Restart"])
            .into_config()
            .unwrap();
        dialog.rebuild_with(new_config);

        // Still visible, but only the new sections remain.
        assert!(dialog.is_visible());
        assert_eq!(dialog.title_bar().title.as_deref(), Some("Done"));
        assert!(dialog.message().is_none());
        assert!(dialog.progress().is_none());
        assert!(dialog.buttons().button(ButtonKind::Positive).is_none());
        assert_eq!(dialog.item_count(), 2);
    }

    #[test]
    fn test_rebuild_swaps_config_listeners() {
        let first = Arc::new(AtomicI32::new(0));
        let second = Arc::new(AtomicI32::new(0));

        let first_clone = first.clone();
        let mut dialog = DialogBuilder::new()
            .positive_button("OK")
            .on_button(move |_| {
                first_clone.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        // A direct connection that must survive the rebuild.
        let (direct, on_direct) = counter();
        dialog.button_clicked.connect(move |_| on_direct());

        dialog.click_button(ButtonKind::Positive);
        assert_eq!(first.load(Ordering::SeqCst), 1);

        let second_clone = second.clone();
        let new_config = DialogBuilder::new()
            .positive_button("OK")
            .on_button(move |_| {
                second_clone.fetch_add(1, Ordering::SeqCst);
            })
            .into_config()
            .unwrap();
        dialog.rebuild_with(new_config);

        dialog.click_button(ButtonKind::Positive);
        assert_eq!(first.load(Ordering::SeqCst), 1); // old listener gone
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(direct.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rebuild_keeps_shared_items() {
        let items = share_items(vec![ListItem::new("a")]);
        let mut dialog = DialogBuilder::new()
            .shared_items(ListStyle::List, Arc::clone(&items))
            .build()
            .unwrap();
        assert_eq!(dialog.item_count(), 1);

        items.write().push(ListItem::new("b"));
        dialog.rebuild();

        assert_eq!(dialog.item_count(), 2);
        let view = dialog.row(1, None);
        assert_eq!(view.label.as_ref().map(|l| l.text.as_str()), Some("b"));
        assert!(Arc::ptr_eq(&items, &dialog.list().unwrap().items));
    }

    #[test]
    fn test_edit_text_signals_on_change_only() {
        let mut dialog = DialogBuilder::new().edit_field("Ada").build().unwrap();

        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();
        dialog.edit_changed.connect(move |text: &String| {
            values_clone.lock().push(text.clone());
        });

        dialog.set_edit_text("Ada"); // unchanged
        dialog.set_edit_text("Grace");
        assert_eq!(dialog.edit_text(), Some("Grace"));
        assert_eq!(*values.lock(), vec!["Grace".to_string()]);

        // No edit field configured: the setter is inert.
        let mut plain = DialogBuilder::new().message("hi").build().unwrap();
        plain.set_edit_text("x");
        assert_eq!(plain.edit_text(), None);
    }

    #[test]
    fn test_checkbox_toggles_signal_on_change_only() {
        let mut dialog = DialogBuilder::new()
            .checkbox("Don't ask again", false)
            .title_checkbox("Select all", false)
            .build()
            .unwrap();

        let (body, on_body) = counter();
        dialog.checkbox_toggled.connect(move |_| on_body());
        let (title, on_title) = counter();
        dialog.title_checkbox_toggled.connect(move |_| on_title());

        dialog.set_checkbox_checked(false); // unchanged
        dialog.set_checkbox_checked(true);
        assert!(dialog.is_checkbox_checked());
        assert_eq!(body.load(Ordering::SeqCst), 1);

        dialog.set_title_checkbox_checked(true);
        dialog.set_title_checkbox_checked(true); // unchanged
        assert!(dialog.is_title_checkbox_checked());
        assert_eq!(title.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_title_bar_updates() {
        let mut dialog = DialogBuilder::new().title("Working").build().unwrap();

        dialog.set_title("Still working");
        dialog.set_subtitle("step 2 of 3");
        dialog.set_title_spinner_visible(true);

        assert_eq!(dialog.title_bar().title.as_deref(), Some("Still working"));
        assert_eq!(dialog.title_bar().subtitle.as_deref(), Some("step 2 of 3"));
        assert!(dialog.title_bar().spinner_visible);
    }

    #[test]
    fn test_shared_dialog_driven_from_posted_closures() {
        let ui = UiHandle::new();
        let dialog = DialogBuilder::new()
            .horizontal_progress(3)
            .build()
            .unwrap()
            .into_shared();

        for step in 1..=3 {
            let dialog = Arc::clone(&dialog);
            ui.post(move || {
                dialog.lock().set_progress(step);
            });
        }

        assert_eq!(dialog.lock().progress_current(), Some(0));
        ui.process_all();
        assert_eq!(dialog.lock().progress_current(), Some(3));
        assert_eq!(dialog.lock().progress_percent(), Some(100));
    }
}
