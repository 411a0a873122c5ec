// SPDX-License-Identifier: MPL-2.0
//! Size classes of the thumbnail chrome and the narrow-viewport check.

use super::props::AspectVariant;
use crate::ui::design_tokens::{sizing, typography};
use serde::{Deserialize, Serialize};

/// Viewports narrower than this hide the hover-only affordances.
pub const DEFAULT_MOBILE_BREAKPOINT: f32 = 768.0;

/// Chrome size class, from aspect variant × fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    VideoWindowed,
    VideoFullscreen,
    VerticalWindowed,
    VerticalFullscreen,
}

/// Pixel sizes of the chrome for one size class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeMetrics {
    pub play_icon: f32,
    pub play_button: f32,
    pub corner_icon: f32,
    pub corner_button: f32,
    pub title_text: f32,
}

impl SizeClass {
    #[must_use]
    pub fn lookup(aspect: AspectVariant, fullscreen: bool) -> Self {
        match (aspect, fullscreen) {
            (AspectVariant::Video, false) => SizeClass::VideoWindowed,
            (AspectVariant::Video, true) => SizeClass::VideoFullscreen,
            (AspectVariant::Vertical, false) => SizeClass::VerticalWindowed,
            (AspectVariant::Vertical, true) => SizeClass::VerticalFullscreen,
        }
    }

    #[must_use]
    pub fn metrics(self) -> ChromeMetrics {
        match self {
            SizeClass::VideoWindowed => ChromeMetrics {
                play_icon: sizing::ICON_LG,
                play_button: 64.0,
                corner_icon: sizing::ICON_SM,
                corner_button: 32.0,
                title_text: typography::BODY,
            },
            SizeClass::VerticalWindowed => ChromeMetrics {
                play_icon: sizing::ICON_MD,
                play_button: 48.0,
                corner_icon: 14.0,
                corner_button: 28.0,
                title_text: typography::CAPTION,
            },
            SizeClass::VideoFullscreen => ChromeMetrics {
                play_icon: sizing::ICON_XXL,
                play_button: 112.0,
                corner_icon: sizing::ICON_MD,
                corner_button: 48.0,
                title_text: typography::TITLE_MD,
            },
            SizeClass::VerticalFullscreen => ChromeMetrics {
                play_icon: sizing::ICON_XL,
                play_button: 88.0,
                corner_icon: 20.0,
                corner_button: 40.0,
                title_text: 16.0,
            },
        }
    }
}

/// Source of the current viewport width.
pub trait ViewportProbe {
    /// Logical width, `None` before the first report.
    fn viewport_width(&self) -> Option<f32>;
}

impl ViewportProbe for Option<f32> {
    fn viewport_width(&self) -> Option<f32> {
        *self
    }
}

/// When the narrow-viewport check is re-evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportPolicy {
    /// Sampled once, later resizes are ignored.
    #[default]
    OneShot,
    /// Follows every resize.
    Reactive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub mobile_breakpoint: f32,
    pub viewport_policy: ViewportPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            viewport_policy: ViewportPolicy::default(),
        }
    }
}

/// Cached answer to "is the viewport narrow".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobileCheck {
    options: LayoutOptions,
    is_mobile: Option<bool>,
}

impl MobileCheck {
    /// Creates the check and samples `probe` once.
    pub fn new(options: LayoutOptions, probe: &impl ViewportProbe) -> Self {
        let mut check = Self {
            options,
            is_mobile: None,
        };
        if let Some(width) = probe.viewport_width() {
            check.observe_width(width);
        }
        check
    }

    /// Feeds a viewport width. One-shot checks keep their first sample.
    pub fn observe_width(&mut self, width: f32) {
        if self.is_mobile.is_some() && self.options.viewport_policy == ViewportPolicy::OneShot {
            return;
        }
        self.is_mobile = Some(width < self.options.mobile_breakpoint);
    }

    /// False until a width was sampled.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.is_mobile.unwrap_or(false)
    }
}
