// SPDX-License-Identifier: MPL-2.0
//! Gallery rendering: the thumbnail grid, or one thumbnail filling the
//! window while fullscreen.

use super::{App, Message, GALLERY_SCROLLABLE};
use crate::thumbnail::ViewContext;
use crate::ui::design_tokens::{palette, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{scrollable, Column, Container, Id, Row, Text};
use iced::{Element, Length, Padding};

pub fn view(app: &App) -> Element<'_, Message> {
    let ctx = ViewContext {
        spinner_rotation: app.spinner_rotation,
        placeholder_pulse: styles::container::pulse_level(app.pulse_phase),
    };

    if app.fullscreen.is_fullscreen() {
        if let Some(owner) = app.fullscreen_owner {
            if let Some(thumbnail) = app.thumbnails.get(owner) {
                return Container::new(
                    thumbnail
                        .view(ctx)
                        .map(move |message| Message::Thumbnail(owner, message)),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::fullscreen_backdrop)
                .into();
            }
        }
    }

    if app.thumbnails.is_empty() {
        return empty_state();
    }

    let grid = &app.grid;
    let mut rows = Column::new()
        .spacing(grid.spacing())
        .padding(Padding {
            top: grid.spacing(),
            bottom: grid.spacing(),
            ..Padding::ZERO
        })
        .width(Length::Fill);

    for (range, height) in grid.rows() {
        let mut row = Row::new().spacing(grid.spacing());
        for index in range {
            let (Some(thumbnail), Some(cell)) = (app.thumbnails.get(index), grid.cell(index))
            else {
                continue;
            };
            row = row.push(
                Container::new(
                    thumbnail
                        .view(ctx)
                        .map(move |message| Message::Thumbnail(index, message)),
                )
                .width(Length::Fixed(cell.width))
                .height(Length::Fixed(cell.height)),
            );
        }

        rows = rows.push(
            Container::new(row)
                .height(Length::Fixed(height))
                .padding(Padding {
                    left: grid.padding_x(),
                    ..Padding::ZERO
                }),
        );
    }

    scrollable(rows)
        .id(Id::new(GALLERY_SCROLLABLE))
        .on_scroll(Message::Scrolled)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    Container::new(
        Text::new("No videos. Pass video files or --manifest <gallery.toml>.")
            .size(typography::BODY)
            .color(palette::GRAY_400),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(Horizontal::Center)
    .align_y(Vertical::Center)
    .into()
}
