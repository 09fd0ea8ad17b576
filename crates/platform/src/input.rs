//! Touch input abstraction

/// A single touch sample in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Horizontal position, 0 at the left edge
    pub x: i16,
    /// Vertical position, 0 at the top edge
    pub y: i16,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Capacitive touch controller (GT911 on the reference board).
pub trait TouchSensor {
    /// Sample the controller once.
    ///
    /// Returns the first contact point while a finger is down, `None`
    /// otherwise. Read failures are reported as "not touched".
    fn sample(&mut self) -> impl core::future::Future<Output = Option<TouchPoint>>;
}
