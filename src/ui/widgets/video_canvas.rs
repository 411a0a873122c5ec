// SPDX-License-Identifier: MPL-2.0
//! Holds the latest decoded frame of a thumbnail and renders it.

use crate::surface::VideoFrame;
use iced::widget::image;
use iced::{ContentFit, Element, Length};
use std::sync::Arc;

/// Latest frame of a media surface, kept as an image handle.
///
/// A new handle is built for every frame so the renderer uploads it once.
#[derive(Debug, Default)]
pub struct VideoCanvas {
    frame_handle: Option<image::Handle>,
    width: u32,
    height: u32,
}

impl VideoCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed frame.
    pub fn set_frame(&mut self, frame: VideoFrame) {
        // Avoid copying the pixels when this is the last reference.
        let data = Arc::try_unwrap(frame.rgba).unwrap_or_else(|arc| (*arc).clone());
        self.frame_handle = Some(image::Handle::from_rgba(frame.width, frame.height, data));
        self.width = frame.width;
        self.height = frame.height;
    }

    /// Drops the current frame.
    pub fn clear(&mut self) {
        self.frame_handle = None;
        self.width = 0;
        self.height = 0;
    }

    #[must_use]
    pub fn has_frame(&self) -> bool {
        self.frame_handle.is_some()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Renders the frame covering the available area, if any.
    pub fn view<'a, Message: 'a>(&self) -> Option<Element<'a, Message>> {
        self.frame_handle.as_ref().map(|handle| {
            image::Image::new(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        })
    }
}
