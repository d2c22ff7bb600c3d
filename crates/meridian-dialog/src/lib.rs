//! Builder-configured modal dialogs for Rust GUI applications.
//!
//! Meridian Dialog models dialog *state*: titles, messages, spinner and bar
//! progress, list selection with per-row recycling, edit fields, checkboxes,
//! and a three-button action row. Pixel rendering is the embedding toolkit's
//! job; every state change is observable through signals.
//!
//! - **Builder**: accumulate options fluently, validate once at build
//! - **Recycling adapter**: bind rows into reusable per-row view structs
//! - **Tri-state items**: checked, unchecked, or no indicator at all
//! - **Signals**: connect directly or through builder listeners
//! - **Rebuild in place**: swap the configuration while the dialog stays up
//! - **Background work**: drive updates from a worker through the UI queue
//!
//! # Example
//!
//! ```
//! use meridian_dialog::prelude::*;
//!
//! let mut dialog = DialogBuilder::new()
//!     .title("Remove 3 files?")
//!     .message("This cannot be undone.")
//!     .positive_button("Remove")
//!     .negative_button("Keep")
//!     .on_button(|kind| println!("clicked {kind:?}"))
//!     .build()
//!     .unwrap();
//!
//! dialog.show();
//! dialog.click_button(ButtonKind::Positive);
//! dialog.dismiss();
//! ```

pub mod adapter;
pub mod button_row;
pub mod color;
pub mod config;
pub mod dialog;
pub mod icon;
pub mod item;

mod error;

pub use error::ConfigError;

pub use adapter::{DialogTheme, Indicator, RowAdapter, RowBackground, RowText, RowTheme, RowView};
pub use button_row::{ButtonDividers, ButtonKind, ButtonRow, ButtonState};
pub use color::Color;
pub use config::{DialogBuilder, DialogConfig, ProgressConfig};
pub use dialog::{
    CheckField, Dialog, EditField, ListSection, ProgressSection, SharedDialog, TitleBar,
};
pub use icon::{Icon, IconSource};
pub use item::{share_items, CheckState, ListItem, ListStyle, SharedItems};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::adapter::{DialogTheme, RowAdapter, RowView};
    pub use crate::button_row::{ButtonDividers, ButtonKind};
    pub use crate::color::Color;
    pub use crate::config::{DialogBuilder, DialogConfig, ProgressConfig};
    pub use crate::dialog::{Dialog, SharedDialog};
    pub use crate::error::ConfigError;
    pub use crate::icon::Icon;
    pub use crate::item::{share_items, CheckState, ListItem, ListStyle, SharedItems};

    pub use meridian_dialog_core::{CancellationToken, Signal, UiHandle, Worker};
}
