// SPDX-License-Identifier: MPL-2.0
//! Rendering of a thumbnail's visual states.
//!
//! Layers, bottom to top: decoded video, poster, placeholder, hover dim,
//! centre glyph or spinner, fullscreen button, title badge. The whole card is
//! one mouse area that toggles playback. Buttons capture their own press, so
//! the fullscreen button never toggles playback.

use super::component::{Message, Thumbnail};
use super::layout::ChromeMetrics;
use super::state::Phase;
use crate::ui::design_tokens::{opacity, palette, spacing};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, image, mouse_area, Container, Stack, Text};
use iced::{ContentFit, Element, Length};

/// Per-frame inputs shared by all thumbnails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewContext {
    pub spinner_rotation: f32,
    /// Placeholder brightness in `[0, 1]`.
    pub placeholder_pulse: f32,
}

impl<S> Thumbnail<S> {
    pub fn view(&self, ctx: ViewContext) -> Element<'_, Message> {
        let state = self.state();
        let metrics = self.size_class().metrics();

        let mut stack = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill);

        if state.media_present() {
            if let Some(video) = self.canvas().view() {
                stack = stack.push(video);
            }
        }

        if state.poster_visible() {
            if let Some(poster) = self.poster() {
                stack = stack.push(
                    image::Image::new(poster.handle.clone())
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .opacity(state.poster_opacity()),
                );
            }
        }

        if state.placeholder_visible() {
            stack = stack.push(
                Container::new(Text::new(""))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(styles::container::placeholder(ctx.placeholder_pulse)),
            );
        }

        if self.affordances_visible() {
            stack = stack.push(
                Container::new(Text::new(""))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .style(styles::container::dim_overlay),
            );
        }

        let centre: Option<Element<'_, Message>> = match state.phase() {
            Phase::Loading => Some(
                AnimatedSpinner::new(palette::WHITE, ctx.spinner_rotation, metrics.play_button)
                    .into_element(),
            ),
            Phase::Idle | Phase::Paused => Some(play_disc("▶", metrics)),
            Phase::Playing if self.affordances_visible() => Some(play_disc("⏸", metrics)),
            Phase::Playing => None,
        };
        if let Some(centre) = centre {
            stack = stack.push(
                Container::new(centre)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            );
        }

        if self.affordances_visible() || state.is_fullscreen() {
            let glyph = if state.is_fullscreen() { "✕" } else { "⛶" };
            let toggle = button(
                Container::new(Text::new(glyph).size(metrics.corner_icon))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center),
            )
            .width(Length::Fixed(metrics.corner_button))
            .height(Length::Fixed(metrics.corner_button))
            .padding(0)
            .style(styles::button::corner(
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_HOVER,
            ))
            .on_press(Message::FullscreenPressed);

            stack = stack.push(
                Container::new(toggle)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding(spacing::XS)
                    .align_x(Horizontal::Right)
                    .align_y(Vertical::Top),
            );
        }

        if self.title_visible() {
            let badge = Container::new(Text::new(&self.props().title).size(metrics.title_text))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::container::title_badge);

            stack = stack.push(
                Container::new(badge)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding(spacing::XS)
                    .align_x(Horizontal::Left)
                    .align_y(Vertical::Bottom),
            );
        }

        let clickable = mouse_area(stack)
            .on_press(Message::Clicked)
            .on_enter(Message::HoverChanged(true))
            .on_exit(Message::HoverChanged(false));

        Container::new(clickable)
            .width(Length::Fill)
            .height(Length::Fill)
            .clip(true)
            .style(styles::container::card(self.style()))
            .into()
    }
}

fn play_disc<'a>(glyph: &'a str, metrics: ChromeMetrics) -> Element<'a, Message> {
    button(
        Container::new(Text::new(glyph).size(metrics.play_icon))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center),
    )
    .width(Length::Fixed(metrics.play_button))
    .height(Length::Fixed(metrics.play_button))
    .padding(0)
    .style(styles::button::play_disc())
    .on_press(Message::Clicked)
    .into()
}
