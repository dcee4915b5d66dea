//! Scroll offset to active item mapping.

use log::debug;

/// Active index transition raised by [`FeedPositionTracker::observe`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexChange {
    pub old: Option<u16>,
    pub new: u16,
}

/// Nearest item index for a scroll offset, before clamping.
///
/// Rounds half up so an item becomes active once the scroll passes the
/// midpoint of the transition. Returns `None` for non-finite offsets or a
/// non-positive item height.
pub fn candidate_index(offset_px: f32, item_height_px: f32) -> Option<i64> {
    if !offset_px.is_finite() || !item_height_px.is_finite() || item_height_px <= 0.0 {
        return None;
    }

    let position = offset_px / item_height_px + 0.5;
    // `as` truncates toward zero; step down for negative fractional positions.
    let mut index = position as i64;
    if (index as f32) > position {
        index -= 1;
    }
    Some(index)
}

/// Tracks which single feed item is active for a uniformly paged list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedPositionTracker {
    item_height_px: f32,
    item_count: u16,
    active: Option<u16>,
}

impl FeedPositionTracker {
    pub fn new(item_count: u16, item_height_px: f32) -> Self {
        Self {
            item_height_px,
            item_count,
            active: if item_count == 0 { None } else { Some(0) },
        }
    }

    pub fn active(&self) -> Option<u16> {
        self.active
    }

    pub fn item_count(&self) -> u16 {
        self.item_count
    }

    pub fn item_height_px(&self) -> f32 {
        self.item_height_px
    }

    /// Viewport resize. Takes effect on the next scroll sample.
    pub fn set_item_height(&mut self, item_height_px: f32) {
        if item_height_px.is_finite() && item_height_px > 0.0 {
            self.item_height_px = item_height_px;
        }
    }

    /// Evaluate one scroll sample; returns the transition if the active item changed.
    pub fn observe(&mut self, offset_px: f32) -> Option<IndexChange> {
        let last = self.item_count.checked_sub(1)?;
        let candidate = candidate_index(offset_px, self.item_height_px)?;
        let clamped = candidate.clamp(0, last as i64) as u16;

        if candidate != clamped as i64 {
            debug!(
                "feed-pos: clamp candidate={} to index={} count={}",
                candidate, clamped, self.item_count
            );
        }

        if self.active == Some(clamped) {
            return None;
        }

        let change = IndexChange {
            old: self.active,
            new: clamped,
        };
        self.active = Some(clamped);
        debug!("feed-pos: active {:?} -> {}", change.old, change.new);
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 800.0;

    #[test]
    fn rounds_to_nearest_item() {
        let mut tracker = FeedPositionTracker::new(3, H);
        let offsets = [0.0, 0.4 * H, 0.6 * H, 1.4 * H, 1.6 * H];
        let mut seen = [0u16; 5];
        for (slot, offset) in seen.iter_mut().zip(offsets) {
            let _ = tracker.observe(offset);
            *slot = tracker.active().unwrap();
        }
        assert_eq!(seen, [0u16, 0, 1, 1, 2]);
    }

    #[test]
    fn midpoint_tie_breaks_forward() {
        assert_eq!(candidate_index(400.0, 800.0), Some(1));
        assert_eq!(candidate_index(399.0, 800.0), Some(0));
    }

    #[test]
    fn emits_old_and_new_index() {
        let mut tracker = FeedPositionTracker::new(4, H);
        assert_eq!(tracker.observe(0.0), None);
        assert_eq!(
            tracker.observe(2.0 * H),
            Some(IndexChange {
                old: Some(0),
                new: 2
            })
        );
        assert_eq!(tracker.observe(2.2 * H), None);
    }

    #[test]
    fn out_of_range_samples_are_clamped() {
        let mut tracker = FeedPositionTracker::new(3, H);
        let _ = tracker.observe(9.0 * H);
        assert_eq!(tracker.active(), Some(2));
        let _ = tracker.observe(-3.0 * H);
        assert_eq!(tracker.active(), Some(0));
        assert_eq!(candidate_index(-0.6 * H, H), Some(-1));
    }

    #[test]
    fn every_sample_stays_within_bounds() {
        let mut tracker = FeedPositionTracker::new(5, H);
        let mut offset = -2_000.0f32;
        while offset < 10_000.0 {
            let _ = tracker.observe(offset);
            let active = tracker.active().unwrap();
            assert!(active < 5);
            offset += 137.0;
        }
    }

    #[test]
    fn empty_feed_has_no_active_item() {
        let mut tracker = FeedPositionTracker::new(0, H);
        assert_eq!(tracker.active(), None);
        assert_eq!(tracker.observe(1_000.0), None);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn invalid_samples_are_ignored() {
        let mut tracker = FeedPositionTracker::new(3, H);
        assert_eq!(tracker.observe(f32::NAN), None);
        assert_eq!(tracker.observe(f32::INFINITY), None);
        tracker.set_item_height(0.0);
        assert_eq!(tracker.item_height_px(), H);
        assert_eq!(tracker.active(), Some(0));
    }
}
