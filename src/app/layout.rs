// SPDX-License-Identifier: MPL-2.0
//! Gallery grid geometry.
//!
//! Cards are laid out row by row, centered horizontally. Every card has the
//! same width and its height follows its aspect variant, so rows take the
//! height of their tallest card. The computed rectangles are in content
//! coordinates, the same space as the scrollable's absolute offset.

use crate::thumbnail::AspectVariant;
use iced::Rectangle;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    columns: usize,
    card_width: f32,
    spacing: f32,
    padding_x: f32,
    cells: Vec<Rectangle>,
    row_heights: Vec<f32>,
    content_height: f32,
}

/// Number of cards of `card_width` that fit in `viewport_width`.
#[must_use]
pub fn calculate_columns(viewport_width: f32, card_width: f32, spacing: f32) -> usize {
    let available_width = viewport_width - 2.0 * spacing;
    let columns = ((available_width + spacing) / (card_width + spacing)).floor();
    if columns.is_finite() && columns >= 1.0 {
        columns as usize
    } else {
        1
    }
}

impl GridLayout {
    /// Lays out one card per aspect, in order.
    ///
    /// Cards shrink to fit when the viewport is narrower than one card.
    #[must_use]
    pub fn compute(
        aspects: &[AspectVariant],
        viewport_width: f32,
        card_width: f32,
        spacing: f32,
    ) -> Self {
        let card_width = card_width.min(viewport_width - 2.0 * spacing).max(1.0);
        let columns = calculate_columns(viewport_width, card_width, spacing);

        #[allow(clippy::cast_precision_loss)]
        let row_width = columns as f32 * card_width + (columns - 1) as f32 * spacing;
        let padding_x = ((viewport_width - row_width) / 2.0).max(spacing);

        let mut cells = Vec::with_capacity(aspects.len());
        let mut row_heights = Vec::new();
        let mut y = spacing;

        for row in aspects.chunks(columns) {
            let row_height = row
                .iter()
                .map(|aspect| card_width * aspect.height_ratio())
                .fold(0.0_f32, f32::max);

            #[allow(clippy::cast_precision_loss)]
            for (col, aspect) in row.iter().enumerate() {
                cells.push(Rectangle {
                    x: padding_x + col as f32 * (card_width + spacing),
                    y,
                    width: card_width,
                    height: card_width * aspect.height_ratio(),
                });
            }

            row_heights.push(row_height);
            y += row_height + spacing;
        }

        Self {
            columns,
            card_width,
            spacing,
            padding_x,
            cells,
            row_heights,
            content_height: y,
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn card_width(&self) -> f32 {
        self.card_width
    }

    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Left offset of every row.
    #[must_use]
    pub fn padding_x(&self) -> f32 {
        self.padding_x
    }

    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Rectangle> {
        self.cells.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Card index ranges of each row, with the row height.
    pub fn rows(&self) -> impl Iterator<Item = (Range<usize>, f32)> + '_ {
        self.row_heights.iter().enumerate().map(move |(row, height)| {
            let start = row * self.columns;
            let end = (start + self.columns).min(self.cells.len());
            (start..end, *height)
        })
    }
}
