//! Dialog configuration and the fluent builder.
//!
//! A [`DialogBuilder`] accumulates every option a dialog supports and
//! validates the whole set once, when the configuration is built. The
//! resulting [`DialogConfig`] is an immutable record; a dialog populated from
//! it never re-validates at runtime. Changing a live dialog's shape means
//! building a fresh configuration and handing it to
//! [`Dialog::rebuild_with`](crate::Dialog::rebuild_with).
//!
//! # Example
//!
//! ```ignore
//! use meridian_dialog::prelude::*;
//!
//! let dialog = DialogBuilder::new()
//!     .title("Update available")
//!     .message("Version 2.4 is ready to install.")
//!     .positive_button("Install")
//!     .negative_button("Not now")
//!     .on_button(|kind| println!("clicked {kind:?}"))
//!     .build()?;
//! ```

use std::sync::Arc;

use crate::adapter::DialogTheme;
use crate::button_row::ButtonKind;
use crate::dialog::Dialog;
use crate::error::{ConfigError, Result};
use crate::icon::Icon;
use crate::item::{share_items, CheckState, ListItem, ListStyle, SharedItems};

// ============================================================================
// Listener Types
// ============================================================================

/// Listener invoked when an action button is clicked.
pub type ButtonListener = Arc<dyn Fn(ButtonKind) + Send + Sync>;

/// Listener invoked when a row is activated.
pub type ItemListener = Arc<dyn Fn(usize) + Send + Sync>;

/// Listener invoked when a multi-choice row changes state.
pub type MultiChoiceListener = Arc<dyn Fn(usize, bool) + Send + Sync>;

/// Listener invoked when a checkbox toggles.
pub type ToggleListener = Arc<dyn Fn(bool) + Send + Sync>;

/// Listener invoked when the edit field text changes.
pub type EditListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Listener invoked on a lifecycle transition (show, cancel, dismiss).
pub type LifecycleListener = Arc<dyn Fn() + Send + Sync>;

/// Every listener a configuration can carry.
///
/// Listeners are connected to the dialog's signals during populate and
/// disconnected on rebuild, so a new configuration fully replaces the old
/// callbacks.
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    pub(crate) button: Option<ButtonListener>,
    pub(crate) item_activated: Option<ItemListener>,
    pub(crate) multi_choice: Option<MultiChoiceListener>,
    pub(crate) checkbox: Option<ToggleListener>,
    pub(crate) title_checkbox: Option<ToggleListener>,
    pub(crate) edit: Option<EditListener>,
    pub(crate) show: Option<LifecycleListener>,
    pub(crate) cancel: Option<LifecycleListener>,
    pub(crate) dismiss: Option<LifecycleListener>,
}

// ============================================================================
// Section Configuration
// ============================================================================

/// Progress section configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressConfig {
    /// A spinner next to a static message.
    Indeterminate { message: Option<String> },
    /// A bar counting `current` out of `maximum`, with an optional message.
    Horizontal {
        maximum: i32,
        current: i32,
        message: Option<String>,
    },
    /// A bar in sweeping, countless mode.
    IndeterminateHorizontal { message: Option<String> },
}

impl ProgressConfig {
    /// Returns `true` when the section carries no definite counts.
    pub fn is_indeterminate(&self) -> bool {
        !matches!(self, Self::Horizontal { .. })
    }

    /// The configured message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Indeterminate { message }
            | Self::Horizontal { message, .. }
            | Self::IndeterminateHorizontal { message } => message.as_deref(),
        }
    }
}

/// Edit field configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditConfig {
    /// Initial text.
    pub text: String,
    /// Placeholder shown while the text is empty.
    pub hint: Option<String>,
}

/// Checkbox configuration, used by the body checkbox and the title bar one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxConfig {
    /// Text rendered next to the box.
    pub text: String,
    /// Initial state.
    pub checked: bool,
}

/// List section configuration: a style plus the shared item sequence.
#[derive(Clone)]
pub struct ListConfig {
    pub style: ListStyle,
    pub items: SharedItems,
}

impl std::fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListConfig")
            .field("style", &self.style)
            .field("len", &self.items.read().len())
            .finish()
    }
}

/// One configured action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonConfig {
    pub text: String,
    pub enabled: bool,
}

// ============================================================================
// Dialog Configuration
// ============================================================================

/// Immutable, validated dialog configuration.
///
/// Produced by [`DialogBuilder::into_config`] or implicitly by
/// [`DialogBuilder::build`]. Sections left unconfigured stay hidden on the
/// dialog.
#[derive(Clone)]
pub struct DialogConfig {
    pub(crate) theme: DialogTheme,
    pub(crate) icon: Option<Icon>,
    pub(crate) title: Option<String>,
    pub(crate) subtitle: Option<String>,
    pub(crate) title_checkbox: Option<CheckboxConfig>,
    pub(crate) title_spinner: bool,
    pub(crate) message: Option<String>,
    pub(crate) progress: Option<ProgressConfig>,
    pub(crate) list: Option<ListConfig>,
    pub(crate) edit: Option<EditConfig>,
    pub(crate) checkbox: Option<CheckboxConfig>,
    pub(crate) buttons: [Option<ButtonConfig>; 3],
    pub(crate) cancelable: bool,
    pub(crate) cancel_on_outside_click: bool,
    pub(crate) listeners: Listeners,
}

impl DialogConfig {
    /// Start building a configuration.
    pub fn builder() -> DialogBuilder {
        DialogBuilder::new()
    }

    /// The configured button for a kind, if any.
    pub fn button(&self, kind: ButtonKind) -> Option<&ButtonConfig> {
        self.buttons[kind.slot()].as_ref()
    }
}

impl std::fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogConfig")
            .field("theme", &self.theme)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("progress", &self.progress)
            .field("list", &self.list)
            .field("edit", &self.edit)
            .field("checkbox", &self.checkbox)
            .field("buttons", &self.buttons)
            .field("cancelable", &self.cancelable)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Progress shape accumulated by the builder; the message merges in at build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressKind {
    Indeterminate,
    Horizontal { maximum: i32, current: i32 },
    IndeterminateHorizontal,
}

/// Item sequence accumulated by the builder.
#[derive(Clone)]
enum ListSource {
    Owned(Vec<ListItem>),
    Shared(SharedItems),
}

/// Fluent accumulator for a [`DialogConfig`].
///
/// Setters can be called in any order; later calls win. Validation happens
/// once in [`into_config`](Self::into_config): a horizontal progress maximum
/// must be positive with its initial value in `0..=maximum`, a single-choice
/// preselection must be in bounds, and multi-choice flags must match the item
/// count.
#[derive(Clone)]
pub struct DialogBuilder {
    theme: DialogTheme,
    icon: Option<Icon>,
    title: Option<String>,
    subtitle: Option<String>,
    title_checkbox: Option<CheckboxConfig>,
    title_spinner: bool,
    message: Option<String>,
    progress: Option<ProgressKind>,
    progress_message: Option<String>,
    list: Option<(ListStyle, ListSource)>,
    single_choice_preselect: Option<usize>,
    multi_choice_flags: Option<Vec<bool>>,
    edit: Option<EditConfig>,
    checkbox: Option<CheckboxConfig>,
    buttons: [Option<ButtonConfig>; 3],
    cancelable: bool,
    cancel_on_outside_click: bool,
    listeners: Listeners,
}

impl DialogBuilder {
    /// Create a builder with nothing configured.
    ///
    /// Dialogs default to the light theme, cancelable, and not canceled by
    /// outside clicks.
    pub fn new() -> Self {
        Self {
            theme: DialogTheme::Light,
            icon: None,
            title: None,
            subtitle: None,
            title_checkbox: None,
            title_spinner: false,
            message: None,
            progress: None,
            progress_message: None,
            list: None,
            single_choice_preselect: None,
            multi_choice_flags: None,
            edit: None,
            checkbox: None,
            buttons: [None, None, None],
            cancelable: true,
            cancel_on_outside_click: false,
            listeners: Listeners::default(),
        }
    }

    // ------------------------------------------------------------------
    // Title bar
    // ------------------------------------------------------------------

    /// Sets the title text.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the subtitle text, rendered under the title.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the title bar icon.
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Adds a checkbox to the title bar.
    pub fn title_checkbox(mut self, text: impl Into<String>, checked: bool) -> Self {
        self.title_checkbox = Some(CheckboxConfig {
            text: text.into(),
            checked,
        });
        self
    }

    /// Shows or hides the small spinner in the title bar.
    pub fn title_spinner(mut self, visible: bool) -> Self {
        self.title_spinner = visible;
        self
    }

    // ------------------------------------------------------------------
    // Body sections
    // ------------------------------------------------------------------

    /// Sets the message text.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Shows a spinner with a static message line.
    pub fn indeterminate_progress(mut self) -> Self {
        self.progress = Some(ProgressKind::Indeterminate);
        self
    }

    /// Shows a horizontal progress bar counting up to `maximum`, starting
    /// at zero.
    pub fn horizontal_progress(self, maximum: i32) -> Self {
        self.horizontal_progress_at(maximum, 0)
    }

    /// Shows a horizontal progress bar starting at `current` of `maximum`.
    pub fn horizontal_progress_at(mut self, maximum: i32, current: i32) -> Self {
        self.progress = Some(ProgressKind::Horizontal { maximum, current });
        self
    }

    /// Shows a horizontal progress bar in sweeping, countless mode.
    pub fn indeterminate_horizontal_progress(mut self) -> Self {
        self.progress = Some(ProgressKind::IndeterminateHorizontal);
        self
    }

    /// Sets the message line rendered with the progress section.
    ///
    /// Order-independent: the message attaches to whichever progress shape
    /// the configuration ends up with.
    pub fn progress_message(mut self, message: impl Into<String>) -> Self {
        self.progress_message = Some(message.into());
        self
    }

    /// Shows a plain list built from labels.
    pub fn items<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_items(ListStyle::List, labelled(labels))
    }

    /// Shows a grid built from labels.
    pub fn grid_items<I, S>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_items(ListStyle::Grid, labelled(labels))
    }

    /// Shows a single-choice list built from labels, with an optional
    /// preselected position.
    ///
    /// The preselection is bounds-checked when the configuration is built.
    pub fn single_choice_items<I, S>(mut self, labels: I, checked: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = labelled(labels)
            .into_iter()
            .map(|item| item.with_check(CheckState::Unchecked))
            .collect();
        self = self.list_items(ListStyle::SingleChoice, items);
        self.single_choice_preselect = checked;
        self
    }

    /// Shows a multi-choice list built from labels, with one checked flag
    /// per label.
    ///
    /// The flag count is validated against the label count when the
    /// configuration is built.
    pub fn multi_choice_items<I, S>(mut self, labels: I, checked: &[bool]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self = self.list_items(ListStyle::MultiChoice, labelled(labels));
        self.multi_choice_flags = Some(checked.to_vec());
        self
    }

    /// Shows a list of fully specified items in the given style.
    pub fn list_items(mut self, style: ListStyle, items: Vec<ListItem>) -> Self {
        self.list = Some((style, ListSource::Owned(items)));
        self.single_choice_preselect = None;
        self.multi_choice_flags = None;
        self
    }

    /// Shows a list over an item sequence the caller keeps a handle to.
    ///
    /// The dialog and its adapter share the sequence; mutating it in place
    /// and rebuilding refreshes the rows without re-supplying items.
    pub fn shared_items(mut self, style: ListStyle, items: SharedItems) -> Self {
        self.list = Some((style, ListSource::Shared(items)));
        self.single_choice_preselect = None;
        self.multi_choice_flags = None;
        self
    }

    /// Shows an edit field with initial text.
    pub fn edit_field(mut self, text: impl Into<String>) -> Self {
        let hint = self.edit.take().and_then(|edit| edit.hint);
        self.edit = Some(EditConfig {
            text: text.into(),
            hint,
        });
        self
    }

    /// Sets the edit field placeholder, showing the field if it was not
    /// already configured.
    pub fn edit_hint(mut self, hint: impl Into<String>) -> Self {
        let mut edit = self.edit.take().unwrap_or_default();
        edit.hint = Some(hint.into());
        self.edit = Some(edit);
        self
    }

    /// Shows a checkbox under the body sections.
    pub fn checkbox(mut self, text: impl Into<String>, checked: bool) -> Self {
        self.checkbox = Some(CheckboxConfig {
            text: text.into(),
            checked,
        });
        self
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Configures the positive (affirmative) button.
    pub fn positive_button(self, text: impl Into<String>) -> Self {
        self.button(ButtonKind::Positive, text, true)
    }

    /// Configures the positive button with an explicit enabled flag.
    pub fn positive_button_enabled(self, text: impl Into<String>, enabled: bool) -> Self {
        self.button(ButtonKind::Positive, text, enabled)
    }

    /// Configures the neutral (alternative) button.
    pub fn neutral_button(self, text: impl Into<String>) -> Self {
        self.button(ButtonKind::Neutral, text, true)
    }

    /// Configures the neutral button with an explicit enabled flag.
    pub fn neutral_button_enabled(self, text: impl Into<String>, enabled: bool) -> Self {
        self.button(ButtonKind::Neutral, text, enabled)
    }

    /// Configures the negative (dismissive) button.
    pub fn negative_button(self, text: impl Into<String>) -> Self {
        self.button(ButtonKind::Negative, text, true)
    }

    /// Configures the negative button with an explicit enabled flag.
    pub fn negative_button_enabled(self, text: impl Into<String>, enabled: bool) -> Self {
        self.button(ButtonKind::Negative, text, enabled)
    }

    fn button(mut self, kind: ButtonKind, text: impl Into<String>, enabled: bool) -> Self {
        self.buttons[kind.slot()] = Some(ButtonConfig {
            text: text.into(),
            enabled,
        });
        self
    }

    // ------------------------------------------------------------------
    // Behavior flags
    // ------------------------------------------------------------------

    /// Whether the dialog can be canceled at all. Defaults to `true`.
    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Whether a click outside the dialog cancels it. Defaults to `false`.
    pub fn cancel_on_outside_click(mut self, cancel: bool) -> Self {
        self.cancel_on_outside_click = cancel;
        self
    }

    /// Selects the color scheme rows are bound with.
    pub fn theme(mut self, theme: DialogTheme) -> Self {
        self.theme = theme;
        self
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Called when an action button is clicked.
    pub fn on_button(mut self, listener: impl Fn(ButtonKind) + Send + Sync + 'static) -> Self {
        self.listeners.button = Some(Arc::new(listener));
        self
    }

    /// Called when a row is activated, with its position.
    pub fn on_item_activated(mut self, listener: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.listeners.item_activated = Some(Arc::new(listener));
        self
    }

    /// Called when a multi-choice row changes state, with the position and
    /// the new checked flag.
    pub fn on_multi_choice(
        mut self,
        listener: impl Fn(usize, bool) + Send + Sync + 'static,
    ) -> Self {
        self.listeners.multi_choice = Some(Arc::new(listener));
        self
    }

    /// Called when the body checkbox toggles.
    pub fn on_checkbox_toggled(mut self, listener: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.listeners.checkbox = Some(Arc::new(listener));
        self
    }

    /// Called when the title bar checkbox toggles.
    pub fn on_title_checkbox_toggled(
        mut self,
        listener: impl Fn(bool) + Send + Sync + 'static,
    ) -> Self {
        self.listeners.title_checkbox = Some(Arc::new(listener));
        self
    }

    /// Called when the edit field text changes.
    pub fn on_edit_changed(mut self, listener: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.listeners.edit = Some(Arc::new(listener));
        self
    }

    /// Called when the dialog is shown.
    pub fn on_show(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listeners.show = Some(Arc::new(listener));
        self
    }

    /// Called when the dialog is canceled.
    pub fn on_cancel(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listeners.cancel = Some(Arc::new(listener));
        self
    }

    /// Called when the dialog is dismissed.
    pub fn on_dismiss(mut self, listener: impl Fn() + Send + Sync + 'static) -> Self {
        self.listeners.dismiss = Some(Arc::new(listener));
        self
    }

    // ------------------------------------------------------------------
    // Terminal methods
    // ------------------------------------------------------------------

    /// Validate the accumulated options into a [`DialogConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a horizontal progress maximum is not
    /// positive, the initial progress is outside `0..=maximum`, a
    /// single-choice preselection is out of bounds, or multi-choice flags do
    /// not match the item count.
    pub fn into_config(self) -> Result<DialogConfig> {
        if let Some(ProgressKind::Horizontal { maximum, current }) = self.progress {
            if maximum <= 0 {
                return Err(ConfigError::ProgressMaximumNotPositive { maximum });
            }
            if current < 0 || current > maximum {
                return Err(ConfigError::ProgressOutOfRange { current, maximum });
            }
        }

        let list = match self.list {
            Some((style, ListSource::Owned(mut items))) => {
                if let Some(index) = self.single_choice_preselect {
                    if index >= items.len() {
                        return Err(ConfigError::CheckedIndexOutOfBounds {
                            index,
                            item_count: items.len(),
                        });
                    }
                    items[index].set_check(CheckState::Checked);
                }
                if let Some(flags) = &self.multi_choice_flags {
                    if flags.len() != items.len() {
                        return Err(ConfigError::MismatchedCheckedFlags {
                            flag_count: flags.len(),
                            item_count: items.len(),
                        });
                    }
                    for (item, &checked) in items.iter_mut().zip(flags) {
                        item.set_check(CheckState::from_flag(checked));
                    }
                }
                Some(ListConfig {
                    style,
                    items: share_items(items),
                })
            }
            Some((style, ListSource::Shared(items))) => Some(ListConfig { style, items }),
            None => None,
        };

        let progress = self.progress.map(|kind| match kind {
            ProgressKind::Indeterminate => ProgressConfig::Indeterminate {
                message: self.progress_message.clone(),
            },
            ProgressKind::Horizontal { maximum, current } => ProgressConfig::Horizontal {
                maximum,
                current,
                message: self.progress_message.clone(),
            },
            ProgressKind::IndeterminateHorizontal => ProgressConfig::IndeterminateHorizontal {
                message: self.progress_message.clone(),
            },
        });

        Ok(DialogConfig {
            theme: self.theme,
            icon: self.icon,
            title: self.title,
            subtitle: self.subtitle,
            title_checkbox: self.title_checkbox,
            title_spinner: self.title_spinner,
            message: self.message,
            progress,
            list,
            edit: self.edit,
            checkbox: self.checkbox,
            buttons: self.buttons,
            cancelable: self.cancelable,
            cancel_on_outside_click: self.cancel_on_outside_click,
            listeners: self.listeners,
        })
    }

    /// Validate and construct the dialog.
    ///
    /// # Errors
    ///
    /// Same conditions as [`into_config`](Self::into_config).
    pub fn build(self) -> Result<Dialog> {
        Ok(Dialog::new(self.into_config()?))
    }
}

impl Default for DialogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DialogBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogBuilder")
            .field("theme", &self.theme)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("progress", &self.progress)
            .field("buttons", &self.buttons)
            .finish_non_exhaustive()
    }
}

/// Build plain labelled items from anything string-like.
fn labelled<I, S>(labels: I) -> Vec<ListItem>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(|label| ListItem::new(label)).collect()
}
