// SPDX-License-Identifier: MPL-2.0
//! Transient state of one thumbnail and its play/pause state machine.
//!
//! Everything here is synchronous and free of I/O: inputs come in, flags
//! change, and an [`Effect`] tells the driver what to do with the media and
//! fullscreen capabilities.

use super::incidents::{IncidentKind, IncidentLog};
use super::visibility::VisibilityGate;
use crate::error::PlaybackError;

/// Phase derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Inputs of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    // ═══════════════════════════════════════════════════════════════════════
    // USER
    // ═══════════════════════════════════════════════════════════════════════
    /// Click anywhere on the thumbnail.
    Click,
    /// Fullscreen button pressed.
    ToggleFullscreen,

    // ═══════════════════════════════════════════════════════════════════════
    // MEDIA SURFACE
    // ═══════════════════════════════════════════════════════════════════════
    /// Outcome of the play request started by a click.
    PlaybackResolved(Result<(), PlaybackError>),
    LoadStarted,
    CanPlay,
    Waiting,
    MediaPlaying,
    MediaPaused,
    /// A decoded frame reached the screen.
    FrameDisplayed,
    Ended,
    MediaError(String),

    // ═══════════════════════════════════════════════════════════════════════
    // ENVIRONMENT
    // ═══════════════════════════════════════════════════════════════════════
    /// The observer reported an intersection.
    Intersected,
    PosterLoaded(Result<(), String>),
    /// The window's actual fullscreen mode.
    FullscreenChanged(bool),
}

/// What the driver has to do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Make sure the surface has a loaded source, then ask it to play.
    StartPlayback,
    /// Pause the surface now.
    Pause,
    /// Fetch the poster image.
    FetchPoster,
    RequestFullscreen,
    ExitFullscreen,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct State {
    label: String,
    has_poster: bool,
    gate: VisibilityGate,

    is_playing: bool,
    is_fullscreen: bool,
    video_loaded: bool,
    is_loading: bool,
    has_interacted: bool,
    thumbnail_loaded: bool,
    poster_requested: bool,

    incidents: IncidentLog,
}

impl State {
    /// `label` names the thumbnail in log lines.
    pub fn new(label: impl Into<String>, has_poster: bool, gate: VisibilityGate) -> Self {
        Self {
            label: label.into(),
            has_poster,
            gate,
            is_playing: false,
            is_fullscreen: false,
            video_loaded: false,
            is_loading: false,
            has_interacted: false,
            thumbnail_loaded: false,
            poster_requested: false,
            incidents: IncidentLog::default(),
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, input: Input) -> Effect {
        match input {
            Input::Click => {
                self.has_interacted = true;
                if self.is_playing {
                    self.is_playing = false;
                    Effect::Pause
                } else {
                    self.is_loading = true;
                    Effect::StartPlayback
                }
            }
            Input::ToggleFullscreen => {
                if self.is_fullscreen {
                    Effect::ExitFullscreen
                } else {
                    Effect::RequestFullscreen
                }
            }

            Input::PlaybackResolved(Ok(())) => {
                self.is_playing = true;
                self.is_loading = false;
                Effect::None
            }
            Input::PlaybackResolved(Err(e)) => {
                log::error!("Playback of {:?} failed to start: {e}", self.label);
                self.incidents
                    .record(IncidentKind::PlaybackRejected, e.to_string());
                self.is_playing = false;
                self.is_loading = false;
                Effect::None
            }
            Input::LoadStarted | Input::Waiting => {
                self.is_loading = true;
                Effect::None
            }
            Input::CanPlay => {
                self.is_loading = false;
                Effect::None
            }
            Input::MediaPlaying => {
                self.is_playing = true;
                Effect::None
            }
            Input::MediaPaused | Input::Ended => {
                self.is_playing = false;
                Effect::None
            }
            Input::FrameDisplayed => {
                if self.has_interacted {
                    self.video_loaded = true;
                }
                self.is_loading = false;
                Effect::None
            }
            Input::MediaError(message) => {
                log::error!("Media error on {:?}: {message}", self.label);
                self.incidents.record(IncidentKind::MediaError, message);
                self.is_loading = false;
                Effect::None
            }

            Input::Intersected => {
                self.gate.latch();
                if self.has_poster && !self.poster_requested {
                    self.poster_requested = true;
                    Effect::FetchPoster
                } else {
                    Effect::None
                }
            }
            Input::PosterLoaded(Ok(())) => {
                self.thumbnail_loaded = true;
                Effect::None
            }
            Input::PosterLoaded(Err(message)) => {
                log::warn!("Poster for {:?} failed to load: {message}", self.label);
                self.incidents.record(IncidentKind::PosterFailed, message);
                Effect::None
            }
            Input::FullscreenChanged(fullscreen) => {
                self.is_fullscreen = fullscreen;
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_playing {
            Phase::Playing
        } else if self.is_loading {
            Phase::Loading
        } else if self.has_interacted {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // VISUAL RULES
    // ═══════════════════════════════════════════════════════════════════════

    /// Generic panel shown until a poster loads or video plays.
    #[must_use]
    pub fn placeholder_visible(&self) -> bool {
        !self.thumbnail_loaded && !(self.video_loaded && self.is_playing)
    }

    /// Poster drawn at all: in view, requested and loaded.
    #[must_use]
    pub fn poster_visible(&self) -> bool {
        self.gate.is_in_view() && self.has_poster && self.thumbnail_loaded
    }

    /// Poster fades out while loaded video is playing.
    #[must_use]
    pub fn poster_opacity(&self) -> f32 {
        if self.video_loaded && self.is_playing {
            0.0
        } else {
            1.0
        }
    }

    /// The media element exists only after the first click.
    #[must_use]
    pub fn media_present(&self) -> bool {
        self.has_interacted
    }

    // ═══════════════════════════════════════════════════════════════════════
    // FLAGS
    // ═══════════════════════════════════════════════════════════════════════

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    #[must_use]
    pub fn is_in_view(&self) -> bool {
        self.gate.is_in_view()
    }

    /// Still registered with the intersection observer.
    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.gate.is_observing()
    }

    #[must_use]
    pub fn video_loaded(&self) -> bool {
        self.video_loaded
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    #[must_use]
    pub fn thumbnail_loaded(&self) -> bool {
        self.thumbnail_loaded
    }

    #[must_use]
    pub fn poster_requested(&self) -> bool {
        self.poster_requested
    }

    #[must_use]
    pub fn incidents(&self) -> &IncidentLog {
        &self.incidents
    }
}
