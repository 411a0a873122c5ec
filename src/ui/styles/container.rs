// SPDX-License-Identifier: MPL-2.0
//! Container styles for the thumbnail layers.

use crate::thumbnail::props::{Corners, StyleClasses};
use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

fn corner_radius(corners: Corners) -> f32 {
    match corners {
        Corners::Square => radius::NONE,
        Corners::Rounded => radius::MD,
        Corners::RoundedLarge => radius::LG,
    }
}

/// Outer card surface. Style classes pick the radius, shadow and border.
pub fn card(classes: StyleClasses) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(palette::BLACK)),
        border: Border {
            color: palette::GRAY_700,
            width: if classes.border { 1.0 } else { 0.0 },
            radius: corner_radius(classes.corners).into(),
        },
        shadow: if classes.shadow {
            shadow::MD
        } else {
            shadow::NONE
        },
        ..Default::default()
    }
}

/// Generic loading panel shown until a poster or a playing frame is available.
///
/// `pulse` is in `[0, 1]` and drives the panel brightness.
pub fn placeholder(pulse: f32) -> impl Fn(&Theme) -> container::Style {
    let pulse = pulse.clamp(0.0, 1.0);
    move |_theme: &Theme| {
        let alpha = opacity::PULSE_MIN + (opacity::OPAQUE - opacity::PULSE_MIN) * pulse;
        container::Style {
            background: Some(Background::Color(Color {
                a: alpha,
                ..palette::GRAY_800
            })),
            ..Default::default()
        }
    }
}

/// Pulse phase added per animation tick, in radians.
pub const PULSE_STEP: f32 = 0.05;

/// Advances a pulse phase by one tick, wrapping at a full turn.
#[must_use]
pub fn advance_pulse(phase: f32) -> f32 {
    (phase + PULSE_STEP) % std::f32::consts::TAU
}

/// Placeholder brightness in `[0, 1]` for a pulse phase.
#[must_use]
pub fn pulse_level(phase: f32) -> f32 {
    (phase.sin() + 1.0) / 2.0
}

/// Dim layer drawn over the media while hovered.
pub fn dim_overlay(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Title badge in the bottom-left corner.
pub fn title_badge(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        })),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Backdrop behind a thumbnail shown fullscreen.
pub fn fullscreen_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn background_alpha(style: &container::Style) -> f32 {
        match style.background {
            Some(Background::Color(color)) => color.a,
            _ => panic!("expected color background"),
        }
    }

    #[test]
    fn placeholder_pulse_is_clamped() {
        let theme = Theme::Dark;
        let low = placeholder(-3.0)(&theme);
        let high = placeholder(7.0)(&theme);
        crate::test_utils::assert_abs_diff_eq!(background_alpha(&low), opacity::PULSE_MIN);
        crate::test_utils::assert_abs_diff_eq!(background_alpha(&high), opacity::OPAQUE);
    }

    #[test]
    fn pulse_phase_wraps_and_level_stays_in_range() {
        let mut phase = 0.0;
        for _ in 0..1000 {
            phase = advance_pulse(phase);
            assert!((0.0..std::f32::consts::TAU).contains(&phase));
            assert!((0.0..=1.0).contains(&pulse_level(phase)));
        }
        crate::test_utils::assert_abs_diff_eq!(pulse_level(0.0), 0.5);
    }

    #[test]
    fn card_applies_style_classes() {
        let theme = Theme::Dark;
        let plain = card(StyleClasses::default())(&theme);
        assert_eq!(plain.border.width, 0.0);
        assert_eq!(plain.shadow, shadow::NONE);

        let fancy = card(StyleClasses {
            corners: Corners::RoundedLarge,
            shadow: true,
            border: true,
        })(&theme);
        assert_eq!(fancy.border.width, 1.0);
        assert_eq!(fancy.border.radius, iced::border::Radius::from(radius::LG));
        assert_eq!(fancy.shadow, shadow::MD);
    }
}
