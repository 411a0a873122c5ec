// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` renders lazily-loaded video thumbnails with the Iced GUI framework.
//!
//! Each thumbnail shows a poster (or a loading placeholder) until clicked,
//! then decodes and plays its video in place. It can toggle fullscreen and
//! only fetches its poster once it scrolls near the viewport.

#![doc(html_root_url = "https://docs.rs/iced_reel/0.1.0")]

pub mod app;
pub mod error;
pub mod surface;
pub mod thumbnail;
pub mod ui;

#[cfg(test)]
mod test_utils;
