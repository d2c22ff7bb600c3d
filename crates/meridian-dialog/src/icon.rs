//! Icon handles for dialog decoration.
//!
//! Icons here are references, not pixels. Decoding and drawing are the
//! embedding renderer's job; the dialog only carries the source so the
//! renderer knows what to resolve.

use std::path::{Path, PathBuf};

/// Source for an icon - either a theme lookup name or a file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconSource {
    /// A name resolved against the embedder's icon set (e.g. "warning").
    Named(String),
    /// A path to load the image from.
    Path(PathBuf),
}

impl IconSource {
    /// Get the lookup name if this is a named source.
    pub fn name(&self) -> Option<&str> {
        match self {
            IconSource::Named(name) => Some(name),
            IconSource::Path(_) => None,
        }
    }

    /// Get the path if this is a path source.
    pub fn path(&self) -> Option<&Path> {
        match self {
            IconSource::Named(_) => None,
            IconSource::Path(p) => Some(p),
        }
    }
}

/// An icon that can be displayed in a dialog title bar or list row.
#[derive(Clone, Debug, PartialEq)]
pub struct Icon {
    /// Where the icon comes from.
    source: IconSource,
    /// Preferred display size in logical pixels. If None, the renderer
    /// uses its slot size.
    preferred_size: Option<(f32, f32)>,
}

impl Icon {
    /// Create an icon resolved by name against the embedder's icon set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            source: IconSource::Named(name.into()),
            preferred_size: None,
        }
    }

    /// Create an icon from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: IconSource::Path(path.as_ref().to_path_buf()),
            preferred_size: None,
        }
    }

    /// Set the preferred display size (builder style).
    pub fn with_preferred_size(mut self, width: f32, height: f32) -> Self {
        self.preferred_size = Some((width, height));
        self
    }

    /// Get the icon source.
    pub fn source(&self) -> &IconSource {
        &self.source
    }

    /// Get the preferred display size, if set.
    pub fn preferred_size(&self) -> Option<(f32, f32)> {
        self.preferred_size
    }
}
