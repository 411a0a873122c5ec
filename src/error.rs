// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Manifest Error: {0}")]
    Manifest(String),
    #[error("Poster Error: {0}")]
    Poster(String),
    #[error("Video Error: {0}")]
    Video(String),
}

/// Reasons a play request can be turned down by a media surface.
///
/// Carried inside widget messages, hence `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// `play()` was called before a source was assigned and loaded.
    #[error("no media source loaded")]
    NotLoaded,

    /// The surface refused to start (decoder failure, unsupported stream).
    #[error("playback rejected: {0}")]
    Rejected(String),

    /// The decoder went away before acknowledging the request.
    #[error("media surface closed before playback started")]
    SurfaceClosed,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Poster(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
