// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and launch flags of the gallery.

use crate::thumbnail;
use iced::widget::scrollable;
use iced::{window, Size};

/// Top-level messages consumed by [`crate::app::App::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// A message for the thumbnail at this index.
    Thumbnail(usize, thumbnail::Message),
    Scrolled(scrollable::Viewport),
    WindowOpened(window::Id, Size),
    WindowResized(window::Id, Size),
    /// Answer to a window mode query.
    WindowModeReported(window::Mode),
    EscapePressed,
    /// Spinner and placeholder pulse animation frame.
    Tick,
}

/// Runtime flags passed in from the CLI launcher.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Gallery manifest (TOML list of `[[video]]` entries).
    pub manifest: Option<String>,
    /// Poster asset root. Takes precedence over `gallery.asset_root`.
    pub assets: Option<String>,
    /// Config directory override (for settings.toml).
    /// Takes precedence over `ICED_REEL_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Sources given on the command line use the vertical aspect.
    pub vertical: bool,
    /// Sources given on the command line restart at the end.
    pub loop_on_end: bool,
    /// Video sources given on the command line.
    pub sources: Vec<String>,
}
