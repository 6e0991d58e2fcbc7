use crate::answer::AnswerValue;
use crate::config::WidgetConfig;

/// Horizontal slider track. The handle's `left` offset is measured from the
/// track's centre line, so the usable span is `[-range/2, range/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderTrack {
    range: f64,
}

impl SliderTrack {
    /// `track_width` is the rendered width of the slider bar.
    pub fn new(track_width: f64, config: &WidgetConfig) -> Self {
        Self {
            range: (track_width - config.slider_handle_inset).max(0.0),
        }
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    /// Keeps a dragged handle inside its parent container.
    pub fn clamp(&self, left: f64) -> f64 {
        let half = self.range / 2.0;
        left.clamp(-half, half)
    }

    /// Answer for a handle at `left`. A degenerate track reports the midpoint.
    pub fn value_at(&self, left: f64) -> f64 {
        if self.range <= 0.0 {
            return 0.5;
        }
        (left + self.range / 2.0) / self.range
    }

    pub fn answer_at(&self, left: f64) -> AnswerValue {
        AnswerValue::Slider(self.value_at(left))
    }

    /// Handle offset that reproduces a stored value.
    pub fn position_for(&self, value: f64) -> f64 {
        value * self.range - self.range / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn track() -> SliderTrack {
        SliderTrack::new(546.0, &WidgetConfig::default())
    }

    #[test]
    fn range_excludes_handle_inset() {
        assert_eq!(track().range(), 500.0);
    }

    #[test]
    fn ends_and_centre_map_to_unit_interval() {
        let t = track();
        assert_eq!(t.value_at(-250.0), 0.0);
        assert_eq!(t.value_at(0.0), 0.5);
        assert_eq!(t.value_at(250.0), 1.0);
        assert_eq!(t.answer_at(125.0).encode(), "0.75");
    }

    #[test]
    fn clamp_holds_handle_in_parent() {
        let t = track();
        assert_eq!(t.clamp(-400.0), -250.0);
        assert_eq!(t.clamp(1000.0), 250.0);
        assert_eq!(t.clamp(10.0), 10.0);
    }

    #[test]
    fn narrow_track_does_not_divide_by_zero() {
        let t = SliderTrack::new(20.0, &WidgetConfig::default());
        assert_eq!(t.range(), 0.0);
        assert_eq!(t.value_at(0.0), 0.5);
    }

    proptest! {
        #[test]
        fn value_round_trips_through_position(left in -250.0f64..=250.0) {
            let t = track();
            let value = t.value_at(left);
            prop_assert!((0.0..=1.0).contains(&value));
            prop_assert!((t.position_for(value) - left).abs() < 1e-9);
        }

        #[test]
        fn clamped_drag_always_yields_unit_value(left in -5000.0f64..5000.0) {
            let t = track();
            let value = t.value_at(t.clamp(left));
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }
}
