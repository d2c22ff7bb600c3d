//! Row adapter for dialog list sections.
//!
//! The adapter maps a position in the shared item sequence to a fully
//! populated [`RowView`], reusing a previously produced view when the caller
//! offers one (recycling). It owns presentation resolution only; selection
//! semantics live on the dialog.
//!
//! # Binding Order
//!
//! Every bind applies the same fixed sequence: background, text colors,
//! icon, label, sub-label, indicator. A recycled view is fully overwritten,
//! so stale content from its previous row never leaks through.

use crate::color::Color;
use crate::icon::Icon;
use crate::item::{CheckState, ListItem, ListStyle, SharedItems};

// ============================================================================
// Theme
// ============================================================================

/// Dialog-wide color scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogTheme {
    /// Dark text on light surfaces.
    #[default]
    Light,
    /// Light text on dark surfaces.
    Dark,
}

/// Resolved colors used when binding rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowTheme {
    /// Default label color.
    pub label_color: Color,
    /// Default sub-label color.
    pub sub_label_color: Color,
    /// Fill for grid cell backgrounds.
    pub grid_cell_fill: Color,
    /// Border for grid cell backgrounds.
    pub grid_cell_border: Color,
}

impl RowTheme {
    /// Colors for the light scheme.
    pub fn light() -> Self {
        Self {
            label_color: Color::from_rgb8(33, 33, 33),
            sub_label_color: Color::from_rgb8(117, 117, 117),
            grid_cell_fill: Color::WHITE,
            grid_cell_border: Color::from_rgba8(0, 0, 0, 31),
        }
    }

    /// Colors for the dark scheme.
    pub fn dark() -> Self {
        Self {
            label_color: Color::from_rgb8(245, 245, 245),
            sub_label_color: Color::from_rgb8(189, 189, 189),
            grid_cell_fill: Color::from_rgb8(48, 48, 48),
            grid_cell_border: Color::from_rgba8(255, 255, 255, 31),
        }
    }
}

impl Default for RowTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl From<DialogTheme> for RowTheme {
    fn from(theme: DialogTheme) -> Self {
        match theme {
            DialogTheme::Light => Self::light(),
            DialogTheme::Dark => Self::dark(),
        }
    }
}

// ============================================================================
// Row View
// ============================================================================

/// Background treatment for a row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowBackground {
    /// No background of its own; the list surface shows through.
    #[default]
    Transparent,
    /// A bordered cell, used by grid style.
    GridCell { fill: Color, border: Color },
}

/// The selection indicator rendered at the end of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Indicator {
    /// No indicator rendered.
    #[default]
    None,
    /// A checkbox in the given state.
    CheckBox { checked: bool },
    /// A radio button in the given state.
    Radio { checked: bool },
}

/// A run of text with its resolved color.
#[derive(Debug, Clone, PartialEq)]
pub struct RowText {
    pub text: String,
    pub color: Color,
}

/// Fully bound per-row display state.
///
/// Produced by [`RowAdapter::row`]. `position` is `None` for the absent
/// sentinel returned when a position is out of bounds; everything else in the
/// sentinel is cleared.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowView {
    /// Background treatment.
    pub background: RowBackground,
    /// Icon, hidden when the item has none.
    pub icon: Option<Icon>,
    /// Label text, hidden when the item has none.
    pub label: Option<RowText>,
    /// Sub-label text, hidden when the item has none.
    pub sub_label: Option<RowText>,
    /// Selection indicator.
    pub indicator: Indicator,
    /// The bound position, or `None` for the absent sentinel.
    pub position: Option<usize>,
}

impl RowView {
    /// Construct the absent sentinel.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Returns `true` if this view is the absent sentinel.
    pub fn is_absent(&self) -> bool {
        self.position.is_none()
    }
}

// ============================================================================
// Row Adapter
// ============================================================================

/// Recycling row renderer over a shared item sequence.
///
/// The adapter holds the same [`SharedItems`] handle the caller and dialog
/// do, so in-place item edits show up on the next bind without re-supplying
/// the sequence.
#[derive(Clone)]
pub struct RowAdapter {
    items: SharedItems,
    style: ListStyle,
    theme: RowTheme,
}

impl RowAdapter {
    /// Create an adapter with the light theme.
    pub fn new(items: SharedItems, style: ListStyle) -> Self {
        Self::with_theme(items, style, RowTheme::light())
    }

    /// Create an adapter with an explicit theme.
    pub fn with_theme(items: SharedItems, style: ListStyle, theme: RowTheme) -> Self {
        Self {
            items,
            style,
            theme,
        }
    }

    /// Number of items in the sequence.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// The list style rows are bound for.
    pub fn style(&self) -> ListStyle {
        self.style
    }

    /// The theme rows are bound with.
    pub fn theme(&self) -> &RowTheme {
        &self.theme
    }

    /// Clone out the item at `position`, if in bounds.
    pub fn item(&self, position: usize) -> Option<ListItem> {
        self.items.read().get(position).cloned()
    }

    /// Bind the row at `position`, recycling `recycled` when given.
    ///
    /// Out-of-bounds positions yield the absent sentinel rather than failing.
    /// A recycled view is fully overwritten; there are no side effects beyond
    /// mutating it.
    pub fn row(&self, position: usize, recycled: Option<RowView>) -> RowView {
        let mut view = recycled.unwrap_or_default();

        let items = self.items.read();
        let Some(item) = items.get(position) else {
            view = RowView::absent();
            return view;
        };

        view.position = Some(position);
        view.background = self.background();
        view.icon = item.icon().cloned();
        view.label = item.label().map(|text| RowText {
            text: text.to_string(),
            color: self.label_color(item),
        });
        view.sub_label = item.sub_label().map(|text| RowText {
            text: text.to_string(),
            color: self.sub_label_color(item),
        });
        view.indicator = self.indicator(item);

        view
    }

    /// Resolve the background for the current style.
    fn background(&self) -> RowBackground {
        match self.style {
            ListStyle::Grid => RowBackground::GridCell {
                fill: self.theme.grid_cell_fill,
                border: self.theme.grid_cell_border,
            },
            _ => RowBackground::Transparent,
        }
    }

    /// Resolve the label color for an item.
    ///
    /// The item's override wins; otherwise the theme default applies.
    fn label_color(&self, item: &ListItem) -> Color {
        item.label_color().unwrap_or(self.theme.label_color)
    }

    /// Resolve the sub-label color for an item.
    fn sub_label_color(&self, item: &ListItem) -> Color {
        item.sub_label_color().unwrap_or(self.theme.sub_label_color)
    }

    /// Resolve the indicator for an item under the current style.
    ///
    /// Choice styles always render their indicator; `NoIndicator` counts as
    /// unchecked there. Plain styles render a checkbox only when the item
    /// carries an indicator state.
    fn indicator(&self, item: &ListItem) -> Indicator {
        match self.style {
            ListStyle::SingleChoice => Indicator::Radio {
                checked: item.check().is_checked(),
            },
            ListStyle::MultiChoice => Indicator::CheckBox {
                checked: item.check().is_checked(),
            },
            ListStyle::List | ListStyle::Grid => match item.check() {
                CheckState::NoIndicator => Indicator::None,
                state => Indicator::CheckBox {
                    checked: state.is_checked(),
                },
            },
        }
    }
}

impl std::fmt::Debug for RowAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowAdapter")
            .field("len", &self.len())
            .field("style", &self.style)
            .field("theme", &self.theme)
            .finish()
    }
}
