// SPDX-License-Identifier: MPL-2.0
//! Gallery application: a scrollable grid of video thumbnails.
//!
//! The [`App`] owns the intersection observer, the window fullscreen surface
//! and one [`Thumbnail`] per manifest entry. Scroll and resize events are
//! turned into intersection checks so posters load only near the viewport.

pub mod config;
pub mod layout;
pub mod manifest;
mod message;
pub mod paths;
mod subscription;
mod view;

pub use message::{Flags, Message};

use crate::surface::{FfmpegSurface, FullscreenSurface, WindowFullscreen};
use crate::thumbnail::{
    self, AspectVariant, IntersectionObserver, Mount, Thumbnail, ThumbnailKey,
};
use crate::ui::styles;
use crate::ui::widgets::animated_spinner;
use config::Config;
use iced::widget::{operation, scrollable::AbsoluteOffset, Id};
use iced::{window, Element, Rectangle, Size, Subscription, Task, Theme};
use layout::GridLayout;
use manifest::Manifest;
use std::path::{Path, PathBuf};

/// Application name shown in the window title.
const APP_TITLE: &str = "IcedReel";

/// Initial window size.
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(1280.0, 800.0);

const MIN_WINDOW_SIZE: Size = Size::new(320.0, 240.0);

/// Identifier of the gallery scrollable.
const GALLERY_SCROLLABLE: &str = "gallery-grid";

pub struct App {
    observer: IntersectionObserver,
    thumbnails: Vec<Thumbnail<FfmpegSurface>>,
    fullscreen: WindowFullscreen,
    /// Thumbnail that requested fullscreen, shown alone while fullscreen.
    fullscreen_owner: Option<usize>,
    /// Visible part of the grid, in content coordinates.
    viewport: Rectangle,
    grid: GridLayout,
    card_width: f32,
    spacing: f32,
    spinner_rotation: f32,
    pulse_phase: f32,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("thumbnails", &self.thumbnails.len())
            .field("fullscreen_owner", &self.fullscreen_owner)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
#[must_use]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: DEFAULT_WINDOW_SIZE,
        min_size: Some(MIN_WINDOW_SIZE),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a Fn boot closure; flags are consumed on the first call
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Collects the gallery entries: the manifest first, then CLI sources.
fn gallery_manifest(flags: &Flags) -> Manifest {
    let mut manifest = match flags.manifest.as_deref() {
        Some(path) => Manifest::load(Path::new(path)).unwrap_or_else(|err| {
            log::error!("Failed to load manifest {path}: {err}");
            Manifest::default()
        }),
        None => Manifest::default(),
    };

    let aspect = if flags.vertical {
        AspectVariant::Vertical
    } else {
        AspectVariant::Video
    };
    manifest.extend(Manifest::from_sources(
        &flags.sources,
        aspect,
        flags.loop_on_end,
    ));
    manifest
}

impl App {
    /// Builds the gallery from `flags` and the persisted configuration.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        match config::write_defaults_if_missing() {
            Ok(Some(path)) => log::info!("Wrote default settings to {}", path.display()),
            Ok(None) => {}
            Err(e) => log::warn!("Could not write default settings: {e}"),
        }
        let (config, config_warning) = config::load();
        if let Some(warning) = config_warning {
            log::warn!("{warning}");
        }
        Self::with_config(flags, &config)
    }

    fn with_config(flags: Flags, config: &Config) -> (Self, Task<Message>) {
        let asset_root = flags
            .assets
            .as_ref()
            .map_or_else(|| config.asset_root(), PathBuf::from);
        let props = gallery_manifest(&flags).into_props();
        log::info!(
            "Showing {} videos, posters from {}",
            props.len(),
            asset_root.display()
        );

        let observer = IntersectionObserver::new(config.observer_options());
        let mount = Mount {
            layout: config.layout_options(),
            asset_root,
        };
        // Sampled from the first window size report.
        let probe: Option<f32> = None;

        let thumbnails = props
            .into_iter()
            .enumerate()
            .map(|(index, props)| {
                Thumbnail::new(
                    ThumbnailKey(index),
                    props,
                    FfmpegSurface::default(),
                    &observer,
                    mount.clone(),
                    &probe,
                )
            })
            .collect();

        let mut app = Self {
            observer,
            thumbnails,
            fullscreen: WindowFullscreen::new(),
            fullscreen_owner: None,
            viewport: Rectangle::new(iced::Point::ORIGIN, DEFAULT_WINDOW_SIZE),
            grid: GridLayout::compute(&[], DEFAULT_WINDOW_SIZE.width, 0.0, 0.0),
            card_width: config.card_width(),
            spacing: config.spacing(),
            spinner_rotation: 0.0,
            pulse_phase: 0.0,
        };
        app.relayout();
        let task = app.observe_intersections();
        (app, task)
    }

    fn title(&self) -> String {
        match self.fullscreen_owner.and_then(|i| self.thumbnails.get(i)) {
            Some(thumbnail) if self.fullscreen.is_fullscreen() => {
                format!("{} - {APP_TITLE}", thumbnail.props().title)
            }
            _ => APP_TITLE.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create(self)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Thumbnail(index, message) => {
                if matches!(message, thumbnail::Message::FullscreenPressed)
                    && !self.fullscreen.is_fullscreen()
                {
                    self.fullscreen_owner = Some(index);
                }
                self.update_thumbnail(index, message)
            }
            Message::Scrolled(viewport) => {
                let offset = viewport.absolute_offset();
                let bounds = viewport.bounds();
                self.viewport = Rectangle {
                    x: offset.x,
                    y: offset.y,
                    width: bounds.width,
                    height: bounds.height,
                };
                self.observe_intersections()
            }
            Message::WindowOpened(id, size) => {
                self.fullscreen.attach(id);
                self.window_resized(size)
            }
            Message::WindowResized(id, size) => {
                self.fullscreen.attach(id);
                if self.fullscreen.window() == Some(id) {
                    self.window_resized(size)
                } else {
                    Task::none()
                }
            }
            Message::WindowModeReported(mode) => self.window_mode_reported(mode),
            Message::EscapePressed => {
                if self.fullscreen.is_fullscreen() {
                    self.fullscreen.exit_fullscreen()
                } else {
                    Task::none()
                }
            }
            Message::Tick => {
                self.spinner_rotation = animated_spinner::advance(self.spinner_rotation);
                self.pulse_phase = styles::container::advance_pulse(self.pulse_phase);
                Task::none()
            }
        }
    }

    fn update_thumbnail(&mut self, index: usize, message: thumbnail::Message) -> Task<Message> {
        let Some(thumbnail) = self.thumbnails.get_mut(index) else {
            log::warn!("Message for unknown thumbnail #{index}: {message:?}");
            return Task::none();
        };
        thumbnail
            .update(message, &mut self.fullscreen)
            .map(move |message| Message::Thumbnail(index, message))
    }

    fn window_resized(&mut self, size: Size) -> Task<Message> {
        let mut tasks = Vec::new();
        self.viewport.width = size.width;
        self.viewport.height = size.height;

        for index in 0..self.thumbnails.len() {
            tasks.push(self.update_thumbnail(index, thumbnail::Message::ViewportResized(size.width)));
        }

        if !self.fullscreen.is_fullscreen() {
            self.relayout();
            tasks.push(self.observe_intersections());
        }

        tasks.push(self.fullscreen.query_mode().map(Message::WindowModeReported));
        Task::batch(tasks)
    }

    /// Mirrors the actual window mode into the thumbnail that owns fullscreen.
    fn window_mode_reported(&mut self, mode: window::Mode) -> Task<Message> {
        let Some(is_fullscreen) = self.fullscreen.on_mode(mode) else {
            return Task::none();
        };
        log::debug!("Window fullscreen: {is_fullscreen}");

        let mut tasks = Vec::new();
        if let Some(owner) = self.fullscreen_owner {
            tasks.push(
                self.update_thumbnail(owner, thumbnail::Message::FullscreenChanged(is_fullscreen)),
            );
        }
        if !is_fullscreen {
            self.fullscreen_owner = None;
            self.relayout();
            tasks.push(self.observe_intersections());
            tasks.push(operation::scroll_to(
                Id::new(GALLERY_SCROLLABLE),
                AbsoluteOffset {
                    x: 0.0,
                    y: self.viewport.y,
                },
            ));
        }
        Task::batch(tasks)
    }

    /// Whether some thumbnail shows an animation: a loading spinner, or a
    /// placeholder pulse on screen.
    fn is_animating(&self) -> bool {
        self.thumbnails.iter().any(|thumbnail| {
            let state = thumbnail.state();
            state.is_loading() || (state.is_in_view() && state.placeholder_visible())
        })
    }

    fn relayout(&mut self) {
        let aspects: Vec<_> = self.thumbnails.iter().map(|t| t.props().aspect).collect();
        self.grid = GridLayout::compute(&aspects, self.viewport.width, self.card_width, self.spacing);
    }

    /// Notifies every observed thumbnail that now intersects the viewport.
    fn observe_intersections(&mut self) -> Task<Message> {
        let grid = &self.grid;
        let keys = self
            .observer
            .intersections(self.viewport, |key| grid.cell(key.0));
        if keys.is_empty() {
            return Task::none();
        }

        log::trace!("{} thumbnails entered the viewport", keys.len());
        let tasks: Vec<_> = keys
            .into_iter()
            .map(|key| self.update_thumbnail(key.0, thumbnail::Message::Intersected))
            .collect();
        Task::batch(tasks)
    }
}
