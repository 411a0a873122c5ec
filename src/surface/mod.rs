// SPDX-License-Identifier: MPL-2.0
//! Media and fullscreen capability ports.
//!
//! The thumbnail widget never touches a decoder or a window directly. It talks
//! to two capabilities instead:
//!
//! - [`MediaSurface`]: an opaque media element that can be given a source,
//!   loaded, played and paused, and that reports media events back.
//! - [`FullscreenSurface`]: something that can put the widget's container on
//!   the fullscreen surface and take it off again.
//!
//! The FFmpeg adapter lives in [`ffmpeg`], the Iced window adapter in
//! [`window`].
//!
//! # Design Notes
//!
//! - `play()` is the only asynchronous operation. It returns a boxed future
//!   so the widget can hand it to `Task::perform` and reconcile the outcome.
//! - `pause()` is synchronous from the widget's point of view.
//! - Media events arrive through an Iced subscription owned by the surface.

mod decoder;
pub mod ffmpeg;
pub mod subscription;
pub mod window;

pub use decoder::{AsyncDecoder, DecoderCommand, DecoderEvent};
pub use ffmpeg::FfmpegSurface;
pub use window::{FullscreenMirror, WindowFullscreen};

use crate::error::PlaybackError;
use iced::futures::future::BoxFuture;
use iced::{Subscription, Task};
use std::path::Path;
use std::sync::Arc;

/// Outcome of a play request, resolved once the surface starts (or refuses).
pub type PlayRequest = BoxFuture<'static, Result<(), PlaybackError>>;

/// Location of a video: a URL understood by FFmpeg or a local path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaSource(String);

impl MediaSource {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `scheme://` locations.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.0.contains("://")
    }

    /// Last path segment without query string, used as a fallback title.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        let without_query = self.0.split(['?', '#']).next().unwrap_or(&self.0);
        let name = if self.is_remote() {
            without_query.rsplit('/').next()
        } else {
            Path::new(without_query).file_name().and_then(|n| n.to_str())
        };
        name.filter(|n| !n.is_empty())
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded RGBA frame.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

/// Events a media surface reports about its element.
///
/// These mirror the media element callbacks the widget reconciles against,
/// independently of its own click handling.
#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// The surface started fetching the source.
    LoadStart,
    /// Enough is available to start playing.
    CanPlay,
    /// Playback stalled waiting for data.
    Waiting,
    /// Playback started, whoever asked for it.
    Playing,
    /// Playback paused, whoever asked for it.
    Paused,
    /// A frame was decoded and should be displayed.
    FrameReady(VideoFrame),
    /// The stream ended and the surface is not looping.
    Ended,
    /// The element reported a decode or network error.
    Error(String),
}

/// Imperative control over one media element.
pub trait MediaSurface {
    /// Whether a source was already assigned.
    fn has_source(&self) -> bool;

    /// Assigns the source. Does not fetch anything yet.
    fn assign_source(&mut self, source: MediaSource);

    /// Starts fetching the assigned source.
    fn load(&mut self);

    /// Asks the element to start playing.
    fn play(&mut self) -> PlayRequest;

    /// Pauses immediately.
    fn pause(&mut self);

    /// Restart at the end of the stream instead of reporting `Ended`.
    fn set_looping(&mut self, looping: bool);

    /// Media events of this element. Empty until `load()` was called.
    fn events(&self) -> Subscription<MediaEvent>;
}

/// Control over the fullscreen surface for one container.
pub trait FullscreenSurface {
    fn request_fullscreen<M: Send + 'static>(&mut self) -> Task<M>;

    fn exit_fullscreen<M: Send + 'static>(&mut self) -> Task<M>;
}
