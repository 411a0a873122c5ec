// SPDX-License-Identifier: MPL-2.0
//! Default values and bounds for all configuration settings.

// ==========================================================================
// Visibility Defaults
// ==========================================================================

/// Look-ahead margin around the gallery viewport (logical pixels).
pub const DEFAULT_ROOT_MARGIN_PX: f32 = crate::thumbnail::visibility::DEFAULT_ROOT_MARGIN;

/// Maximum root margin.
pub const MAX_ROOT_MARGIN_PX: f32 = 2000.0;

/// Share of a thumbnail that must be inside the grown viewport.
pub const DEFAULT_THRESHOLD: f32 = crate::thumbnail::visibility::DEFAULT_THRESHOLD;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Narrow viewport breakpoint (logical pixels).
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f32 = crate::thumbnail::layout::DEFAULT_MOBILE_BREAKPOINT;

/// Maximum narrow viewport breakpoint.
pub const MAX_MOBILE_BREAKPOINT_PX: f32 = 4096.0;

// ==========================================================================
// Gallery Defaults
// ==========================================================================

/// Card width in the gallery grid.
pub const DEFAULT_CARD_WIDTH: f32 = crate::ui::design_tokens::sizing::CARD_WIDTH;

/// Minimum card width.
pub const MIN_CARD_WIDTH: f32 = 120.0;

/// Maximum card width.
pub const MAX_CARD_WIDTH: f32 = 1280.0;

/// Gap between cards.
pub const DEFAULT_SPACING: f32 = crate::ui::design_tokens::spacing::MD;

/// Maximum gap between cards.
pub const MAX_SPACING: f32 = 128.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_bounds() {
        assert!(DEFAULT_ROOT_MARGIN_PX <= MAX_ROOT_MARGIN_PX);
        assert!((0.0..=1.0).contains(&DEFAULT_THRESHOLD));
        assert!(DEFAULT_MOBILE_BREAKPOINT_PX <= MAX_MOBILE_BREAKPOINT_PX);
        assert!((MIN_CARD_WIDTH..=MAX_CARD_WIDTH).contains(&DEFAULT_CARD_WIDTH));
        assert!(DEFAULT_SPACING <= MAX_SPACING);
    }
}
