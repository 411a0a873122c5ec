// SPDX-License-Identifier: MPL-2.0
//! Construction-time configuration of a thumbnail.

use crate::surface::MediaSource;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Shape of the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectVariant {
    /// Landscape 16:9.
    #[default]
    Video,
    /// Portrait 9:16.
    Vertical,
}

impl AspectVariant {
    /// Height divided by width.
    #[must_use]
    pub fn height_ratio(self) -> f32 {
        match self {
            AspectVariant::Video => 9.0 / 16.0,
            AspectVariant::Vertical => 16.0 / 9.0,
        }
    }
}

/// Corner rounding picked by the `rounded*` class names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Corners {
    Square,
    #[default]
    Rounded,
    RoundedLarge,
}

/// Style modifiers parsed from a space separated list of class names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleClasses {
    pub corners: Corners,
    pub shadow: bool,
    pub border: bool,
}

impl StyleClasses {
    /// Parses class names. Unknown names are ignored, later names win.
    #[must_use]
    pub fn parse(class_names: &str) -> Self {
        let mut classes = Self::default();
        for name in class_names.split_whitespace() {
            match name {
                "rounded-none" => classes.corners = Corners::Square,
                "rounded" => classes.corners = Corners::Rounded,
                "rounded-lg" => classes.corners = Corners::RoundedLarge,
                "shadow" => classes.shadow = true,
                "border" => classes.border = true,
                unknown => log::debug!("Ignoring unknown style class {unknown:?}"),
            }
        }
        classes
    }
}

/// Everything a thumbnail is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailProps {
    pub source: MediaSource,
    pub title: String,
    pub aspect: AspectVariant,
    pub class_names: Option<String>,
    pub loop_on_end: bool,
    pub poster_index: Option<u32>,
}

impl ThumbnailProps {
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source: MediaSource::new(source),
            title: title.into(),
            aspect: AspectVariant::default(),
            class_names: None,
            loop_on_end: false,
            poster_index: None,
        }
    }

    #[must_use]
    pub fn with_aspect(mut self, aspect: AspectVariant) -> Self {
        self.aspect = aspect;
        self
    }

    #[must_use]
    pub fn with_class_names(mut self, class_names: impl Into<String>) -> Self {
        self.class_names = Some(class_names.into());
        self
    }

    #[must_use]
    pub fn with_loop(mut self, loop_on_end: bool) -> Self {
        self.loop_on_end = loop_on_end;
        self
    }

    #[must_use]
    pub fn with_poster_index(mut self, index: u32) -> Self {
        self.poster_index = Some(index);
        self
    }

    #[must_use]
    pub fn style_classes(&self) -> StyleClasses {
        self.class_names
            .as_deref()
            .map(StyleClasses::parse)
            .unwrap_or_default()
    }

    /// Site path of the poster, `/thumbnails/{index}.jpg`.
    #[must_use]
    pub fn poster_path(&self) -> Option<String> {
        self.poster_index
            .map(|index| format!("/thumbnails/{index}.jpg"))
    }

    /// Poster location on disk, with the leading `/` resolved against `asset_root`.
    #[must_use]
    pub fn poster_file(&self, asset_root: &Path) -> Option<PathBuf> {
        self.poster_path()
            .map(|path| asset_root.join(path.trim_start_matches('/')))
    }
}
