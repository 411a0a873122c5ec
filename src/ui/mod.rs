// SPDX-License-Identifier: MPL-2.0
//! Shared visual infrastructure for the thumbnail widget and the gallery.
//!
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`styles`] - Button and container styles
//! - [`widgets`] - Custom Iced widgets (spinner, video canvas)

pub mod design_tokens;
pub mod styles;
pub mod widgets;
