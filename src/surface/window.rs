// SPDX-License-Identifier: MPL-2.0
//! [`FullscreenSurface`] backed by the application window.
//!
//! Iced does not emit an event when the window mode changes. The owner asks
//! for the actual mode with [`WindowFullscreen::query_mode`] whenever the
//! window is resized and feeds the answer back through
//! [`WindowFullscreen::on_mode`].

use super::FullscreenSurface;
use iced::{window, Task};

/// Last window mode reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullscreenMirror {
    fullscreen: bool,
}

impl FullscreenMirror {
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Records a reported mode.
    ///
    /// Returns `Some(is_fullscreen)` when the fullscreen state changed.
    /// `Hidden` says nothing about fullscreen and is ignored.
    pub fn on_mode(&mut self, mode: window::Mode) -> Option<bool> {
        let fullscreen = match mode {
            window::Mode::Fullscreen => true,
            window::Mode::Windowed => false,
            window::Mode::Hidden => return None,
        };
        if fullscreen == self.fullscreen {
            None
        } else {
            self.fullscreen = fullscreen;
            Some(fullscreen)
        }
    }
}

/// The main window as a fullscreen surface.
#[derive(Debug, Default)]
pub struct WindowFullscreen {
    window: Option<window::Id>,
    mirror: FullscreenMirror,
}

impl WindowFullscreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the surface to a window. The first window seen wins.
    pub fn attach(&mut self, id: window::Id) {
        if self.window.is_none() {
            self.window = Some(id);
        }
    }

    #[must_use]
    pub fn window(&self) -> Option<window::Id> {
        self.window
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.mirror.is_fullscreen()
    }

    /// Asks the platform for the bound window's mode.
    #[must_use]
    pub fn query_mode(&self) -> Task<window::Mode> {
        match self.window {
            Some(id) => window::mode(id),
            None => Task::none(),
        }
    }

    /// Feeds the answer of [`Self::query_mode`], see [`FullscreenMirror::on_mode`].
    pub fn on_mode(&mut self, mode: window::Mode) -> Option<bool> {
        self.mirror.on_mode(mode)
    }

    fn set_mode<M: Send + 'static>(&self, mode: window::Mode) -> Task<M> {
        let Some(id) = self.window else {
            log::warn!("No window to change to {mode:?} mode");
            return Task::none();
        };
        window::set_mode(id, mode)
    }
}

impl FullscreenSurface for WindowFullscreen {
    fn request_fullscreen<M: Send + 'static>(&mut self) -> Task<M> {
        self.set_mode(window::Mode::Fullscreen)
    }

    fn exit_fullscreen<M: Send + 'static>(&mut self) -> Task<M> {
        self.set_mode(window::Mode::Windowed)
    }
}
