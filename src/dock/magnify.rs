/// Parabolic size-vs-distance curve driving the dock magnification.
///
/// The curve peaks at `max_size` when the pointer sits exactly on an item's
/// rest center and decays to `min_size` at `max_distance`, beyond which every
/// item stays at its minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagnifyCurve {
    min_size: i32,
    max_size: i32,
    max_distance: i32,
}

impl MagnifyCurve {
    /// Preconditions: `0 < min_size <= max_size` (enforced at config load).
    pub fn new(min_size: i32, max_size: i32, spacing: i32) -> Self {
        let max_distance = (2.5 * (min_size + spacing) as f64) as i32;
        Self {
            min_size,
            max_size,
            max_distance,
        }
    }

    /// Falloff radius: pointer offsets beyond this leave an item at rest size.
    pub fn max_distance(&self) -> i32 {
        self.max_distance
    }

    /// Item size for a pointer at `distance` from the item's rest center.
    /// Even in `distance` and non-increasing in its magnitude.
    pub fn size_at(&self, distance: i32) -> i32 {
        let d = distance.abs();
        if d > self.max_distance {
            self.min_size
        } else {
            self.max_size
                - (d * d * (self.max_size - self.min_size))
                    / (self.max_distance * self.max_distance)
        }
    }
}
