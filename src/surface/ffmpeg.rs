// SPDX-License-Identifier: MPL-2.0
//! [`MediaSurface`] backed by the FFmpeg decoder.

use super::subscription::{self, CommandInbox, MediaSessionId};
use super::{DecoderCommand, MediaEvent, MediaSource, MediaSurface, PlayRequest};
use crate::error::PlaybackError;
use iced::Subscription;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// One media element decoded with FFmpeg.
///
/// `load()` opens a new session: a command channel whose receiving end waits
/// in an inbox until the session's subscription starts the decoder.
#[derive(Debug, Default)]
pub struct FfmpegSurface {
    source: Option<MediaSource>,
    session: Option<Session>,
    looping: bool,
}

#[derive(Debug)]
struct Session {
    id: MediaSessionId,
    commands: mpsc::UnboundedSender<DecoderCommand>,
    inbox: CommandInbox,
}

impl FfmpegSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `load()` opened a session.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    fn send(&self, command: DecoderCommand) {
        if let Some(session) = &self.session {
            if session.commands.send(command).is_err() {
                log::debug!("Decoder for {:?} is no longer running", self.source);
            }
        }
    }
}

impl MediaSurface for FfmpegSurface {
    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn assign_source(&mut self, source: MediaSource) {
        if self.source.as_ref() != Some(&source) {
            self.stop_session();
            self.source = Some(source);
        }
    }

    fn load(&mut self) {
        if self.source.is_none() {
            log::warn!("load() called without a media source");
            return;
        }

        self.stop_session();

        let (commands, command_rx) = mpsc::unbounded_channel();
        // Queued before the decoder exists, applied as soon as it opens.
        let _ = commands.send(DecoderCommand::SetLooping(self.looping));

        self.session = Some(Session {
            id: MediaSessionId::next(),
            commands,
            inbox: Arc::new(Mutex::new(Some(command_rx))),
        });
    }

    fn play(&mut self) -> PlayRequest {
        let Some(session) = &self.session else {
            return Box::pin(async { Err(PlaybackError::NotLoaded) });
        };

        let (ack, response) = oneshot::channel();
        if session.commands.send(DecoderCommand::Play { ack }).is_err() {
            return Box::pin(async { Err(PlaybackError::SurfaceClosed) });
        }

        Box::pin(async move { response.await.unwrap_or(Err(PlaybackError::SurfaceClosed)) })
    }

    fn pause(&mut self) {
        self.send(DecoderCommand::Pause);
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        self.send(DecoderCommand::SetLooping(looping));
    }

    fn events(&self) -> Subscription<MediaEvent> {
        match (&self.source, &self.session) {
            (Some(source), Some(session)) => subscription::media_events(
                source.clone(),
                session.id,
                Arc::clone(&session.inbox),
            ),
            _ => Subscription::none(),
        }
    }
}

impl FfmpegSurface {
    fn stop_session(&mut self) {
        if let Some(session) = self.session.take() {
            let _ = session.commands.send(DecoderCommand::Stop);
        }
    }
}

impl Drop for FfmpegSurface {
    fn drop(&mut self) {
        self.stop_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn play_before_load_is_rejected() {
        let mut surface = FfmpegSurface::new();
        surface.assign_source(MediaSource::new("clip.mp4"));

        assert_eq!(surface.play().await, Err(PlaybackError::NotLoaded));
    }

    #[test]
    fn load_without_source_keeps_surface_unloaded() {
        let mut surface = FfmpegSurface::new();
        surface.load();
        assert!(!surface.is_loaded());
    }

    #[test]
    fn load_opens_session() {
        let mut surface = FfmpegSurface::new();
        surface.assign_source(MediaSource::new("clip.mp4"));
        assert!(surface.has_source());

        surface.load();
        assert!(surface.is_loaded());
    }

    #[tokio::test]
    async fn play_is_rejected_when_decoder_goes_away() {
        let mut surface = FfmpegSurface::new();
        surface.assign_source(MediaSource::new("clip.mp4"));
        surface.load();

        let request = surface.play();

        // Simulates the decoder task dropping its command receiver.
        if let Some(session) = &surface.session {
            session.inbox.lock().unwrap().take();
        }

        assert_eq!(request.await, Err(PlaybackError::SurfaceClosed));
    }

    #[tokio::test]
    async fn looping_is_queued_first() {
        let mut surface = FfmpegSurface::new();
        surface.set_looping(true);
        surface.assign_source(MediaSource::new("clip.mp4"));
        surface.load();

        let session = surface.session.as_ref().unwrap();
        let mut rx = session.inbox.lock().unwrap().take().unwrap();
        assert!(matches!(
            rx.recv().await,
            Some(DecoderCommand::SetLooping(true))
        ));
    }

    #[test]
    fn reassigning_same_source_keeps_session() {
        let mut surface = FfmpegSurface::new();
        surface.assign_source(MediaSource::new("clip.mp4"));
        surface.load();

        surface.assign_source(MediaSource::new("clip.mp4"));
        assert!(surface.is_loaded());

        surface.assign_source(MediaSource::new("other.mp4"));
        assert!(!surface.is_loaded());
    }
}
