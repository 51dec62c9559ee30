use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Axis direction on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry-space size in pixel-like units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` when the size has no drawable area.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Rejects negative or non-finite sizes. A zero size is allowed and
    /// simply leaves the owning domain empty.
    pub fn validate(self) -> ChartResult<Self> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidGeometry {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Axis-aligned rectangle with a top-left origin (geometry grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(self) -> PointF {
        PointF::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn with_center(self, center: PointF) -> Self {
        Self {
            x: center.x - self.width / 2.0,
            y: center.y - self.height / 2.0,
            ..self
        }
    }
}

/// Result of a conversion that may fall outside the transform's valid input.
///
/// `value` always holds a best-effort result so callers can decide to skip
/// drawing instead of aborting; `ok` tells whether it can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mapped<T> {
    pub value: T,
    pub ok: bool,
}

impl<T> Mapped<T> {
    #[must_use]
    pub fn valid(value: T) -> Self {
        Self { value, ok: true }
    }

    #[must_use]
    pub fn invalid(value: T) -> Self {
        Self { value, ok: false }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        self.ok.then_some(self.value)
    }
}
