// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! Decoding runs on a blocking Tokio thread. Commands come in over an
//! unbounded channel owned by the media surface, frames and state changes go
//! out over a small bounded channel.

use super::{MediaSource, VideoFrame};
use crate::error::{Error, PlaybackError, Result};
use std::path::Path;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg once per process and silences its warnings.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Video(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Commands sent to the decoder task.
#[derive(Debug)]
pub enum DecoderCommand {
    /// Start or resume playback. The acknowledgement resolves the play request.
    Play {
        ack: oneshot::Sender<std::result::Result<(), PlaybackError>>,
    },

    /// Stop sending frames, keep the position.
    Pause,

    /// Restart at the end of the stream instead of stopping.
    SetLooping(bool),

    /// Stop decoding and release the input.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// Input opened and decoder ready.
    Opened,

    /// Waiting for the next frame after a (re)start.
    Buffering,

    /// Playback started.
    Playing,

    /// Playback paused.
    Paused,

    /// A new frame is ready for display.
    FrameReady(VideoFrame),

    /// Playback reached the end and is not looping.
    EndOfStream,

    /// An error occurred during opening or decoding.
    Error(String),
}

/// Handle on a decoder running in a blocking Tokio task.
pub struct AsyncDecoder {
    /// Bounded to keep at most a couple of frames in flight.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl std::fmt::Debug for AsyncDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncDecoder").finish_non_exhaustive()
    }
}

impl AsyncDecoder {
    /// Spawns a decoder for `source`, driven by `command_rx`.
    ///
    /// Local files are checked up front. Remote sources are handed to FFmpeg
    /// as they are and fail inside the task if unreachable.
    pub fn spawn(
        source: MediaSource,
        command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    ) -> Result<Self> {
        if !source.is_remote() && !Path::new(source.as_str()).exists() {
            return Err(Error::Io(format!("Video file not found: {source}")));
        }

        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg contexts are not Send, everything lives on this thread.
        tokio::task::spawn_blocking(move || {
            let error_tx = event_tx.clone();
            if let Err(e) = Self::decoder_loop_blocking(&source, command_rx, event_tx) {
                log::error!("Decoder for {source} failed: {e}");
                let _ = error_tx.blocking_send(DecoderEvent::Error(e.to_string()));
            }
        });

        Ok(Self { event_rx })
    }

    /// Receives the next event. `None` once the decoder task has ended.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop_blocking(
        source: &MediaSource,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: mpsc::Sender<DecoderEvent>,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&source.as_str())
            .map_err(|e| Error::Video(format!("Failed to open video: {e}")))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Video("No video stream found".to_string()))?;
        let video_stream_index = input.index();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Video(format!("Failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Video(format!("Failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Video(format!("Failed to create scaler: {e}")))?;

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        if event_tx.blocking_send(DecoderEvent::Opened).is_err() {
            return Ok(());
        }

        let mut is_playing = false;
        let mut looping = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        let mut current_pts_secs: f64 = 0.0;
        // Set once the demuxer ran dry and the decoder was sent EOF
        let mut draining = false;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play { ack }) => {
                    if !is_playing && current_pts_secs > 0.0 {
                        // Resume from the paused position (AV_TIME_BASE is microseconds)
                        let timestamp = (current_pts_secs * 1_000_000.0) as i64;
                        if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                            let _ = event_tx.blocking_send(DecoderEvent::Error(format!(
                                "Resume seek failed: {e}"
                            )));
                        } else {
                            decoder.flush();
                            draining = false;
                        }
                    }
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                    let _ = ack.send(Ok(()));
                    let _ = event_tx.blocking_send(DecoderEvent::Playing);
                    let _ = event_tx.blocking_send(DecoderEvent::Buffering);
                }
                Ok(DecoderCommand::Pause) => {
                    if is_playing {
                        is_playing = false;
                        playback_start_time = None;
                        first_pts = None;
                        let _ = event_tx.blocking_send(DecoderEvent::Paused);
                    }
                }
                Ok(DecoderCommand::SetLooping(enabled)) => {
                    looping = enabled;
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut decoded_frame = ffmpeg_next::frame::Video::empty();
            let mut frame_decoded = false;
            if !draining {
                for (stream, packet) in ictx.packets() {
                    if stream.index() != video_stream_index {
                        continue;
                    }

                    if let Err(e) = decoder.send_packet(&packet) {
                        let _ = event_tx
                            .blocking_send(DecoderEvent::Error(format!("Packet send failed: {e}")));
                        continue;
                    }

                    if decoder.receive_frame(&mut decoded_frame).is_ok() {
                        frame_decoded = true;
                        break;
                    }
                }

                // Packets exhausted: flush the frames the decoder still holds
                if !frame_decoded {
                    draining = decoder.send_eof().is_ok();
                }
            }
            if draining && !frame_decoded {
                frame_decoded = decoder.receive_frame(&mut decoded_frame).is_ok();
            }

            if frame_decoded {
                let mut rgb_frame = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded_frame, &mut rgb_frame) {
                    let _ = event_tx
                        .blocking_send(DecoderEvent::Error(format!("Scaling failed: {e}")));
                    continue;
                }

                let rgba = Self::extract_rgba_data(&rgb_frame);
                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);

                // Frame pacing relative to the first frame after (re)start
                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let target_time =
                        start_time + Duration::from_secs_f64((pts_secs - first).max(0.0));
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }

                current_pts_secs = pts_secs;

                let frame = VideoFrame {
                    rgba: Arc::new(rgba),
                    width,
                    height,
                };
                if event_tx
                    .blocking_send(DecoderEvent::FrameReady(frame))
                    .is_err()
                {
                    return Ok(());
                }
                continue;
            }

            draining = false;
            if looping && ictx.seek(0, ..0).is_ok() {
                decoder.flush();
                current_pts_secs = 0.0;
                playback_start_time = Some(Instant::now());
                first_pts = None;
                continue;
            }

            is_playing = false;
            playback_start_time = None;
            first_pts = None;
            current_pts_secs = 0.0;
            // Next Play starts over from the beginning
            if ictx.seek(0, ..0).is_ok() {
                decoder.flush();
            }
            let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
        }

        Ok(())
    }

    /// Copies RGBA rows out of a frame, dropping the stride padding.
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}
