// SPDX-License-Identifier: MPL-2.0
//! Thumbnail widget: wires the state machine to a media surface, a
//! fullscreen surface and the poster loader.

use super::layout::{LayoutOptions, MobileCheck, SizeClass, ViewportProbe};
use super::poster::{self, PosterImage};
use super::props::{StyleClasses, ThumbnailProps};
use super::state::{Effect, Input, State};
use super::visibility::{IntersectionObserver, ThumbnailKey, VisibilityGate};
use crate::error::PlaybackError;
use crate::surface::{FullscreenSurface, MediaEvent, MediaSurface};
use crate::ui::widgets::VideoCanvas;
use iced::{Subscription, Task};
use std::path::PathBuf;

/// Messages of one thumbnail.
#[derive(Debug, Clone)]
pub enum Message {
    /// Click anywhere on the card.
    Clicked,
    /// Fullscreen button pressed. Never reaches [`Message::Clicked`].
    FullscreenPressed,
    HoverChanged(bool),
    PlaybackResolved(Result<(), PlaybackError>),
    Media(MediaEvent),
    /// Reported by the owner's intersection observer.
    Intersected,
    PosterLoaded(Result<PosterImage, String>),
    /// Actual fullscreen state, mirrored from the window.
    FullscreenChanged(bool),
    ViewportResized(f32),
}

/// Environment a thumbnail is mounted in.
#[derive(Debug, Clone, Default)]
pub struct Mount {
    pub layout: LayoutOptions,
    /// Directory that `/thumbnails/...` poster paths resolve against.
    pub asset_root: PathBuf,
}

pub struct Thumbnail<S> {
    key: ThumbnailKey,
    props: ThumbnailProps,
    style: StyleClasses,
    surface: S,
    state: State,
    canvas: VideoCanvas,
    poster: Option<PosterImage>,
    mobile: MobileCheck,
    hovered: bool,
    asset_root: PathBuf,
}

impl<S: std::fmt::Debug> std::fmt::Debug for Thumbnail<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("key", &self.key)
            .field("title", &self.props.title)
            .field("surface", &self.surface)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: MediaSurface> Thumbnail<S> {
    /// Mounts a thumbnail: registers it with `observer` and samples the
    /// viewport width once.
    pub fn new(
        key: ThumbnailKey,
        props: ThumbnailProps,
        surface: S,
        observer: &IntersectionObserver,
        mount: Mount,
        viewport: &impl ViewportProbe,
    ) -> Self {
        let gate = VisibilityGate::new(observer.observe(key));
        let state = State::new(props.title.clone(), props.poster_index.is_some(), gate);
        Self {
            key,
            style: props.style_classes(),
            props,
            surface,
            state,
            canvas: VideoCanvas::new(),
            poster: None,
            mobile: MobileCheck::new(mount.layout, viewport),
            hovered: false,
            asset_root: mount.asset_root,
        }
    }

    pub fn update<F: FullscreenSurface>(
        &mut self,
        message: Message,
        fullscreen: &mut F,
    ) -> Task<Message> {
        let input = match message {
            Message::Clicked => Input::Click,
            Message::FullscreenPressed => Input::ToggleFullscreen,
            Message::HoverChanged(hovered) => {
                self.hovered = hovered;
                return Task::none();
            }
            Message::ViewportResized(width) => {
                self.mobile.observe_width(width);
                return Task::none();
            }
            Message::PlaybackResolved(result) => Input::PlaybackResolved(result),
            Message::Media(event) => self.media_input(event),
            Message::Intersected => Input::Intersected,
            Message::PosterLoaded(Ok(image)) => {
                self.poster = Some(image);
                Input::PosterLoaded(Ok(()))
            }
            Message::PosterLoaded(Err(e)) => Input::PosterLoaded(Err(e)),
            Message::FullscreenChanged(is_fullscreen) => Input::FullscreenChanged(is_fullscreen),
        };

        let effect = self.state.handle(input);
        self.run_effect(effect, fullscreen)
    }

    fn media_input(&mut self, event: MediaEvent) -> Input {
        match event {
            MediaEvent::LoadStart => Input::LoadStarted,
            MediaEvent::CanPlay => Input::CanPlay,
            MediaEvent::Waiting => Input::Waiting,
            MediaEvent::Playing => Input::MediaPlaying,
            MediaEvent::Paused => Input::MediaPaused,
            MediaEvent::FrameReady(frame) => {
                if self.state.media_present() {
                    self.canvas.set_frame(frame);
                }
                Input::FrameDisplayed
            }
            MediaEvent::Ended => Input::Ended,
            MediaEvent::Error(message) => Input::MediaError(message),
        }
    }

    fn run_effect<F: FullscreenSurface>(
        &mut self,
        effect: Effect,
        fullscreen: &mut F,
    ) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::StartPlayback => {
                if !self.surface.has_source() {
                    self.surface.assign_source(self.props.source.clone());
                    self.surface.set_looping(self.props.loop_on_end);
                    self.surface.load();
                }
                Task::perform(self.surface.play(), Message::PlaybackResolved)
            }
            Effect::Pause => {
                self.surface.pause();
                Task::none()
            }
            Effect::FetchPoster => match self.props.poster_file(&self.asset_root) {
                Some(path) => {
                    log::debug!("Fetching poster {}", path.display());
                    Task::perform(poster::fetch_poster(path), |result| {
                        Message::PosterLoaded(result.map_err(|e| e.to_string()))
                    })
                }
                None => Task::none(),
            },
            Effect::RequestFullscreen => fullscreen.request_fullscreen(),
            Effect::ExitFullscreen => fullscreen.exit_fullscreen(),
        }
    }

    /// Media events, only once the media element exists.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.state.media_present() {
            self.surface.events().map(Message::Media)
        } else {
            Subscription::none()
        }
    }
}

impl<S> Thumbnail<S> {
    #[must_use]
    pub fn key(&self) -> ThumbnailKey {
        self.key
    }

    #[must_use]
    pub fn props(&self) -> &ThumbnailProps {
        &self.props
    }

    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.mobile.is_mobile()
    }

    /// Hover affordances: dim overlay, fullscreen button, title badge.
    #[must_use]
    pub fn affordances_visible(&self) -> bool {
        self.hovered && !self.mobile.is_mobile()
    }

    #[must_use]
    pub fn title_visible(&self) -> bool {
        self.affordances_visible() || self.state.is_fullscreen()
    }

    #[must_use]
    pub fn size_class(&self) -> SizeClass {
        SizeClass::lookup(self.props.aspect, self.state.is_fullscreen())
    }

    #[must_use]
    pub fn poster(&self) -> Option<&PosterImage> {
        self.poster.as_ref()
    }

    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.canvas.has_frame()
    }

    pub(super) fn style(&self) -> StyleClasses {
        self.style
    }

    pub(super) fn canvas(&self) -> &VideoCanvas {
        &self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MediaSource, PlayRequest, VideoFrame};
    use crate::thumbnail::layout::ViewportPolicy;
    use crate::thumbnail::state::Phase;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct MockSurface {
        source: Option<MediaSource>,
        loads: usize,
        plays: usize,
        pauses: usize,
        looping: bool,
    }

    impl MediaSurface for MockSurface {
        fn has_source(&self) -> bool {
            self.source.is_some()
        }

        fn assign_source(&mut self, source: MediaSource) {
            self.source = Some(source);
        }

        fn load(&mut self) {
            self.loads += 1;
        }

        fn play(&mut self) -> PlayRequest {
            self.plays += 1;
            Box::pin(async { Ok(()) })
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn set_looping(&mut self, looping: bool) {
            self.looping = looping;
        }

        fn events(&self) -> Subscription<MediaEvent> {
            Subscription::none()
        }
    }

    #[derive(Debug, Default)]
    struct MockFullscreen {
        requests: usize,
        exits: usize,
    }

    impl FullscreenSurface for MockFullscreen {
        fn request_fullscreen<M: Send + 'static>(&mut self) -> Task<M> {
            self.requests += 1;
            Task::none()
        }

        fn exit_fullscreen<M: Send + 'static>(&mut self) -> Task<M> {
            self.exits += 1;
            Task::none()
        }
    }

    fn mount(props: ThumbnailProps, observer: &IntersectionObserver) -> Thumbnail<MockSurface> {
        Thumbnail::new(
            ThumbnailKey(0),
            props,
            MockSurface::default(),
            observer,
            Mount::default(),
            &Some(1280.0),
        )
    }

    fn frame() -> VideoFrame {
        VideoFrame {
            rgba: Arc::new(vec![0; 4 * 4 * 4]),
            width: 4,
            height: 4,
        }
    }

    #[test]
    fn media_untouched_until_first_click() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(ThumbnailProps::new("a.mp4", "A"), &observer);
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::Intersected, &mut fs);
        let _ = thumb.update(Message::HoverChanged(true), &mut fs);
        assert!(!thumb.surface().has_source());
        assert_eq!(thumb.surface().loads, 0);
        assert!(!thumb.state().media_present());

        let _ = thumb.update(Message::Clicked, &mut fs);
        assert_eq!(thumb.surface().source, Some(MediaSource::new("a.mp4")));
        assert_eq!(thumb.surface().loads, 1);
        assert_eq!(thumb.surface().plays, 1);
    }

    #[test]
    fn source_is_assigned_once() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(ThumbnailProps::new("a.mp4", "A").with_loop(true), &observer);
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::Clicked, &mut fs);
        let _ = thumb.update(Message::PlaybackResolved(Ok(())), &mut fs);
        let _ = thumb.update(Message::Clicked, &mut fs);
        let _ = thumb.update(Message::Clicked, &mut fs);

        assert!(thumb.surface().looping);
        assert_eq!(thumb.surface().loads, 1);
        assert_eq!(thumb.surface().plays, 2);
        assert_eq!(thumb.surface().pauses, 1);
    }

    #[test]
    fn click_while_playing_pauses_surface() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(ThumbnailProps::new("a.mp4", "A"), &observer);
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::Clicked, &mut fs);
        let _ = thumb.update(Message::PlaybackResolved(Ok(())), &mut fs);
        assert_eq!(thumb.state().phase(), Phase::Playing);

        let _ = thumb.update(Message::Clicked, &mut fs);
        assert_eq!(thumb.surface().pauses, 1);
        assert!(!thumb.state().is_playing());
    }

    #[test]
    fn frames_before_interaction_are_dropped() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(ThumbnailProps::new("a.mp4", "A"), &observer);
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::Media(MediaEvent::FrameReady(frame())), &mut fs);
        assert!(!thumb.has_frame());

        let _ = thumb.update(Message::Clicked, &mut fs);
        let _ = thumb.update(Message::Media(MediaEvent::FrameReady(frame())), &mut fs);
        assert!(thumb.has_frame());
        assert!(thumb.state().video_loaded());
    }

    #[test]
    fn poster_fetched_only_after_intersection() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(
            ThumbnailProps::new("a.mp4", "A").with_poster_index(2),
            &observer,
        );
        let mut fs = MockFullscreen::default();
        assert!(!thumb.state().poster_requested());
        assert!(observer.is_observing(ThumbnailKey(0)));

        let _ = thumb.update(Message::Intersected, &mut fs);
        assert!(thumb.state().poster_requested());
        assert!(!observer.is_observing(ThumbnailKey(0)));
    }

    #[test]
    fn dropping_thumbnail_stops_observation() {
        let observer = IntersectionObserver::default();
        let thumb = mount(ThumbnailProps::new("a.mp4", "A"), &observer);
        assert_eq!(observer.observed_count(), 1);

        drop(thumb);
        assert_eq!(observer.observed_count(), 0);
    }

    #[test]
    fn fullscreen_button_uses_capability_and_mirror() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(ThumbnailProps::new("a.mp4", "A"), &observer);
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::FullscreenPressed, &mut fs);
        assert_eq!(fs.requests, 1);
        assert!(!thumb.state().is_fullscreen());
        assert!(!thumb.state().has_interacted());

        let _ = thumb.update(Message::FullscreenChanged(true), &mut fs);
        assert!(thumb.title_visible());
        let _ = thumb.update(Message::FullscreenPressed, &mut fs);
        assert_eq!(fs.exits, 1);

        let _ = thumb.update(Message::FullscreenChanged(false), &mut fs);
        assert!(!thumb.state().is_fullscreen());
    }

    #[test]
    fn hover_affordances_hidden_on_narrow_viewport() {
        let observer = IntersectionObserver::default();
        let mut thumb = Thumbnail::new(
            ThumbnailKey(1),
            ThumbnailProps::new("a.mp4", "A"),
            MockSurface::default(),
            &observer,
            Mount::default(),
            &Some(600.0),
        );
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::HoverChanged(true), &mut fs);
        assert!(thumb.is_mobile());
        assert!(!thumb.affordances_visible());
        assert!(!thumb.title_visible());

        // One-shot: widening the window changes nothing.
        let _ = thumb.update(Message::ViewportResized(1400.0), &mut fs);
        assert!(!thumb.affordances_visible());
    }

    #[test]
    fn reactive_layout_follows_resizes() {
        let observer = IntersectionObserver::default();
        let mount_opts = Mount {
            layout: LayoutOptions {
                viewport_policy: ViewportPolicy::Reactive,
                ..LayoutOptions::default()
            },
            ..Mount::default()
        };
        let mut thumb = Thumbnail::new(
            ThumbnailKey(1),
            ThumbnailProps::new("a.mp4", "A"),
            MockSurface::default(),
            &observer,
            mount_opts,
            &Some(600.0),
        );
        let mut fs = MockFullscreen::default();

        let _ = thumb.update(Message::HoverChanged(true), &mut fs);
        let _ = thumb.update(Message::ViewportResized(1400.0), &mut fs);
        assert!(thumb.affordances_visible());
    }

    #[test]
    fn size_class_tracks_fullscreen() {
        let observer = IntersectionObserver::default();
        let mut thumb = mount(ThumbnailProps::new("a.mp4", "A"), &observer);
        let mut fs = MockFullscreen::default();
        assert_eq!(thumb.size_class(), SizeClass::VideoWindowed);

        let _ = thumb.update(Message::FullscreenChanged(true), &mut fs);
        assert_eq!(thumb.size_class(), SizeClass::VideoFullscreen);
    }
}
