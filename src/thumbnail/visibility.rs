// SPDX-License-Identifier: MPL-2.0
//! Visibility gate: defers work until a thumbnail is near the viewport.
//!
//! An [`IntersectionObserver`] holds the set of thumbnails still waiting to
//! be seen. Each thumbnail owns an [`ObservationHandle`] that removes it from
//! the set on drop, so unobserving happens both when the thumbnail latches
//! and when it is dropped before ever being seen.
//!
//! Intersection follows the usual rule: the root rectangle is grown by the
//! root margin on every side, and a target intersects when the visible share
//! of its area reaches the threshold.

use iced::Rectangle;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, Weak};

/// Look-ahead margin around the viewport, in logical pixels.
pub const DEFAULT_ROOT_MARGIN: f32 = 100.0;

/// Share of the target area that must be visible.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Identifies a thumbnail within one observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThumbnailKey(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: f32,
    pub threshold: f32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: DEFAULT_ROOT_MARGIN,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

type Targets = Arc<Mutex<BTreeSet<ThumbnailKey>>>;

/// Tracks which thumbnails still wait for their first intersection.
#[derive(Debug, Default)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    targets: Targets,
}

impl IntersectionObserver {
    #[must_use]
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Arc::default(),
        }
    }

    #[must_use]
    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Starts observing `key`. Observation lasts as long as the handle.
    pub fn observe(&self, key: ThumbnailKey) -> ObservationHandle {
        if let Ok(mut targets) = self.targets.lock() {
            targets.insert(key);
        }
        ObservationHandle {
            key,
            targets: Arc::downgrade(&self.targets),
        }
    }

    #[must_use]
    pub fn is_observing(&self, key: ThumbnailKey) -> bool {
        self.targets
            .lock()
            .is_ok_and(|targets| targets.contains(&key))
    }

    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.targets.lock().map_or(0, |targets| targets.len())
    }

    /// Observed targets intersecting `viewport`, in key order.
    ///
    /// `bounds_of` gives a target's bounds in the viewport's coordinate
    /// space. Targets without bounds are skipped.
    pub fn intersections(
        &self,
        viewport: Rectangle,
        bounds_of: impl Fn(ThumbnailKey) -> Option<Rectangle>,
    ) -> Vec<ThumbnailKey> {
        let Ok(targets) = self.targets.lock() else {
            return Vec::new();
        };
        targets
            .iter()
            .copied()
            .filter(|key| {
                bounds_of(*key).is_some_and(|bounds| intersects(bounds, viewport, self.options))
            })
            .collect()
    }
}

/// Keeps one thumbnail registered with an observer.
#[derive(Debug)]
pub struct ObservationHandle {
    key: ThumbnailKey,
    targets: Weak<Mutex<BTreeSet<ThumbnailKey>>>,
}

impl ObservationHandle {
    #[must_use]
    pub fn key(&self) -> ThumbnailKey {
        self.key
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        if let Some(targets) = self.targets.upgrade() {
            if let Ok(mut targets) = targets.lock() {
                targets.remove(&self.key);
            }
        }
    }
}

/// Share of `target` inside `root` grown by `margin` on every side.
///
/// Zero-area targets count as fully visible when they lie inside the grown
/// root, edges included.
#[must_use]
pub fn intersection_ratio(target: Rectangle, root: Rectangle, margin: f32) -> f32 {
    let left = root.x - margin;
    let top = root.y - margin;
    let right = root.x + root.width + margin;
    let bottom = root.y + root.height + margin;

    let overlap_w = (target.x + target.width).min(right) - target.x.max(left);
    let overlap_h = (target.y + target.height).min(bottom) - target.y.max(top);

    let target_area = target.width * target.height;
    if target_area <= 0.0 {
        return if overlap_w >= 0.0 && overlap_h >= 0.0 {
            1.0
        } else {
            0.0
        };
    }

    if overlap_w <= 0.0 || overlap_h <= 0.0 {
        return 0.0;
    }

    (overlap_w * overlap_h / target_area).min(1.0)
}

/// Whether `target` intersects `root` under `options`.
#[must_use]
pub fn intersects(target: Rectangle, root: Rectangle, options: ObserverOptions) -> bool {
    let ratio = intersection_ratio(target, root, options.root_margin);
    ratio > 0.0 && ratio >= options.threshold
}

/// One-way latch owned by a thumbnail.
#[derive(Debug, Default)]
pub struct VisibilityGate {
    in_view: bool,
    handle: Option<ObservationHandle>,
}

impl VisibilityGate {
    #[must_use]
    pub fn new(handle: ObservationHandle) -> Self {
        Self {
            in_view: false,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.handle.is_some()
    }

    /// Sets the latch and stops observing.
    ///
    /// Returns `true` only for the call that flipped the latch.
    pub fn latch(&mut self) -> bool {
        self.handle = None;
        !std::mem::replace(&mut self.in_view, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    const VIEWPORT: Rectangle = Rectangle {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn fully_visible_target_has_ratio_one() {
        assert_abs_diff_eq!(
            intersection_ratio(rect(10.0, 10.0, 100.0, 100.0), VIEWPORT, 0.0),
            1.0
        );
    }

    #[test]
    fn margin_pulls_in_targets_below_the_fold() {
        // Starts 50px below the viewport, within the 100px margin.
        let target = rect(0.0, 650.0, 200.0, 100.0);
        assert_abs_diff_eq!(intersection_ratio(target, VIEWPORT, 0.0), 0.0);
        assert_abs_diff_eq!(intersection_ratio(target, VIEWPORT, 100.0), 0.5);
        assert!(intersects(target, VIEWPORT, ObserverOptions::default()));
    }

    #[test]
    fn sliver_below_threshold_does_not_intersect() {
        // 5 of 100 rows inside the grown root.
        let target = rect(0.0, 695.0, 200.0, 100.0);
        assert_abs_diff_eq!(intersection_ratio(target, VIEWPORT, 100.0), 0.05);
        assert!(!intersects(target, VIEWPORT, ObserverOptions::default()));
    }

    #[test]
    fn far_target_does_not_intersect() {
        let target = rect(0.0, 2000.0, 200.0, 100.0);
        assert!(!intersects(target, VIEWPORT, ObserverOptions::default()));
    }

    #[test]
    fn zero_threshold_still_needs_overlap() {
        let options = ObserverOptions {
            root_margin: 0.0,
            threshold: 0.0,
        };
        assert!(!intersects(rect(0.0, 600.0, 10.0, 10.0), VIEWPORT, options));
    }

    #[test]
    fn zero_area_target_inside_root_is_visible() {
        assert_abs_diff_eq!(
            intersection_ratio(rect(10.0, 10.0, 0.0, 0.0), VIEWPORT, 0.0),
            1.0
        );
    }

    #[test]
    fn observe_and_drop_handle() {
        let observer = IntersectionObserver::default();
        let handle = observer.observe(ThumbnailKey(3));
        assert!(observer.is_observing(ThumbnailKey(3)));
        assert_eq!(handle.key(), ThumbnailKey(3));

        drop(handle);
        assert!(!observer.is_observing(ThumbnailKey(3)));
        assert_eq!(observer.observed_count(), 0);
    }

    #[test]
    fn handle_outliving_observer_is_harmless() {
        let observer = IntersectionObserver::default();
        let handle = observer.observe(ThumbnailKey(1));
        drop(observer);
        drop(handle);
    }

    #[test]
    fn intersections_skip_unobserved_and_unknown_targets() {
        let observer = IntersectionObserver::default();
        let _near = observer.observe(ThumbnailKey(0));
        let _far = observer.observe(ThumbnailKey(1));
        let _unknown = observer.observe(ThumbnailKey(2));

        let hits = observer.intersections(VIEWPORT, |key| match key.0 {
            0 => Some(rect(0.0, 0.0, 100.0, 100.0)),
            1 => Some(rect(0.0, 5000.0, 100.0, 100.0)),
            _ => None,
        });
        assert_eq!(hits, vec![ThumbnailKey(0)]);
    }

    #[test]
    fn gate_latches_once_and_releases_handle() {
        let observer = IntersectionObserver::default();
        let mut gate = VisibilityGate::new(observer.observe(ThumbnailKey(0)));
        assert!(gate.is_observing());
        assert!(!gate.is_in_view());

        assert!(gate.latch());
        assert!(gate.is_in_view());
        assert!(!gate.is_observing());
        assert!(!observer.is_observing(ThumbnailKey(0)));

        assert!(!gate.latch());
        assert!(gate.is_in_view());
    }
}
