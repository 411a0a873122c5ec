// SPDX-License-Identifier: MPL-2.0
//! Integration tests to validate style and design token coherence.

#[cfg(test)]
mod tests {
    use iced::widget::button::Status;
    use iced::Theme;
    use iced_reel::thumbnail::{AspectVariant, SizeClass, StyleClasses};
    use iced_reel::ui::design_tokens::{opacity, sizing};
    use iced_reel::ui::styles::{button, container};

    #[test]
    fn all_styles_are_callable() {
        let theme = Theme::Dark;

        let _ = button::play_disc()(&theme, Status::Active);
        let _ = button::corner(opacity::OVERLAY_MEDIUM, opacity::OVERLAY_HOVER)(&theme, Status::Hovered);
        let _ = container::card(StyleClasses::parse("rounded-lg shadow border"))(&theme);
        let _ = container::placeholder(0.5)(&theme);
        let _ = container::dim_overlay(&theme);
        let _ = container::title_badge(&theme);
        let _ = container::fullscreen_backdrop(&theme);
    }

    #[test]
    fn fullscreen_chrome_is_larger() {
        for aspect in [AspectVariant::Video, AspectVariant::Vertical] {
            let windowed = SizeClass::lookup(aspect, false).metrics();
            let fullscreen = SizeClass::lookup(aspect, true).metrics();
            assert!(fullscreen.play_icon > windowed.play_icon);
            assert!(fullscreen.title_text >= windowed.title_text);
        }
    }

    #[test]
    fn chrome_stays_within_icon_scale() {
        for aspect in [AspectVariant::Video, AspectVariant::Vertical] {
            for fullscreen in [false, true] {
                let metrics = SizeClass::lookup(aspect, fullscreen).metrics();
                assert!(metrics.play_icon >= sizing::ICON_SM);
                assert!(metrics.play_icon <= sizing::ICON_XXL);
            }
        }
    }
}
