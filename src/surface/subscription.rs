// SPDX-License-Identifier: MPL-2.0
//! Iced subscription that runs one decoder session and reports media events.

use super::{AsyncDecoder, DecoderCommand, DecoderEvent, MediaEvent, MediaSource};
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Subscription ID for one media session.
/// A new ID per `load()` makes Iced start a fresh decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaSessionId(u64);

impl MediaSessionId {
    /// Allocates a process-unique session ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }
}

/// Receiving end of a session's command channel, handed over to the decoder
/// when the subscription starts.
pub type CommandInbox = Arc<Mutex<Option<mpsc::UnboundedReceiver<DecoderCommand>>>>;

impl From<DecoderEvent> for MediaEvent {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::Opened => MediaEvent::CanPlay,
            DecoderEvent::Buffering => MediaEvent::Waiting,
            DecoderEvent::Playing => MediaEvent::Playing,
            DecoderEvent::Paused => MediaEvent::Paused,
            DecoderEvent::FrameReady(frame) => MediaEvent::FrameReady(frame),
            DecoderEvent::EndOfStream => MediaEvent::Ended,
            DecoderEvent::Error(message) => MediaEvent::Error(message),
        }
    }
}

/// Everything one session's stream needs. Identified by its session ID only.
#[derive(Debug, Clone)]
struct SessionSeed {
    session: MediaSessionId,
    source: MediaSource,
    inbox: CommandInbox,
}

impl Hash for SessionSeed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.session.hash(state);
    }
}

/// Runs a decoder for `source` for as long as the subscription is alive.
///
/// Commands queued in `inbox` before the subscription started (a `Play` sent
/// right after `load()`, for example) are delivered once the decoder opens.
pub fn media_events(
    source: MediaSource,
    session: MediaSessionId,
    inbox: CommandInbox,
) -> iced::Subscription<MediaEvent> {
    iced::Subscription::run_with(
        SessionSeed {
            session,
            source,
            inbox,
        },
        run_session,
    )
}

fn run_session(seed: &SessionSeed) -> impl Stream<Item = MediaEvent> {
    let source = seed.source.clone();
    let inbox = Arc::clone(&seed.inbox);

    stream::channel(32, move |mut output| async move {
        let _ = output.send(MediaEvent::LoadStart).await;

        let command_rx = inbox.lock().ok().and_then(|mut slot| slot.take());

        match command_rx {
            Some(command_rx) => match AsyncDecoder::spawn(source, command_rx) {
                Ok(mut decoder) => {
                    while let Some(event) = decoder.recv_event().await {
                        if output.send(MediaEvent::from(event)).await.is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    let _ = output.send(MediaEvent::Error(e.to_string())).await;
                }
            },
            None => {
                let _ = output
                    .send(MediaEvent::Error(
                        "media session was already started".to_string(),
                    ))
                    .await;
            }
        }

        // Keep subscription alive but idle
        std::future::pending::<()>().await;
    })
}
