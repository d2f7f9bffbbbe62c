#![forbid(unsafe_code)]

//! Last known pointer position, in surface coordinates.

/// Pointer position as reported by the host. Both coordinates are absent
/// until the first pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl PointerState {
    /// A pointer that has never moved.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { x: None, y: None }
    }

    /// Record a movement to `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = Some(x);
        self.y = Some(y);
    }

    /// Position, when both coordinates are known.
    ///
    /// A coordinate of exactly `0.0` is a real position, not "absent".
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}
