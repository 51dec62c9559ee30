use crate::core::{Mapped, PointF};

use super::Domain;
use super::axis_scale::AxisScale;
use super::navigation::FULL_CIRCLE_DEGREES;

/// Polar primitives of a polar domain.
///
/// Renderers drawing on a polar chart use these directly: segment planning
/// needs the raw angle of each point to detect jumps across the 0°/360° seam,
/// which geometry points alone do not reveal.
#[derive(Debug, Clone, Copy)]
pub struct PolarView<'a> {
    pub(super) domain: &'a Domain,
}

impl PolarView<'_> {
    /// Angle in degrees, clockwise from 12 o'clock, for a horizontal value.
    ///
    /// Values outside the horizontal range map outside `[0, 360]`; callers use
    /// that to detect off-grid points.
    #[must_use]
    pub fn to_angular_coordinate(&self, value: f64) -> Mapped<f64> {
        self.domain.angular_coordinate(value)
    }

    /// Distance from the centre for a vertical value.
    #[must_use]
    pub fn to_radial_coordinate(&self, value: f64) -> Mapped<f64> {
        self.domain.radial_coordinate(value)
    }

    /// Geometry point for an angle (degrees) and a radial distance.
    #[must_use]
    pub fn polar_coordinate_to_point(&self, angle: f64, radius: f64) -> PointF {
        self.domain.polar_coordinate_to_point(angle, radius)
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.domain.radius()
    }

    #[must_use]
    pub fn center(&self) -> PointF {
        self.domain.center()
    }
}

impl Domain {
    pub(super) fn radius(&self) -> f64 {
        self.size.width.min(self.size.height) / 2.0
    }

    pub(super) fn center(&self) -> PointF {
        let radius = self.radius();
        PointF::new(radius, radius)
    }

    fn angular_coordinate(&self, value: f64) -> Mapped<f64> {
        match self
            .x_scale
            .fraction(value, self.bounds.min_x, self.bounds.max_x)
        {
            Some(fraction) => Mapped::valid(fraction * FULL_CIRCLE_DEGREES),
            None => Mapped::invalid(0.0),
        }
    }

    fn radial_coordinate(&self, value: f64) -> Mapped<f64> {
        let radius = self.radius();
        match self.y_scale {
            AxisScale::Linear => {
                // The outer end is left unclamped; drawing clips beyond the grid.
                let value = value.max(self.bounds.min_y);
                let fraction = (value - self.bounds.min_y) / (self.bounds.max_y - self.bounds.min_y);
                Mapped::valid(fraction * radius)
            }
            AxisScale::Log(_) => match self
                .y_scale
                .fraction(value, self.bounds.min_y, self.bounds.max_y)
            {
                Some(fraction) => Mapped::valid((fraction * radius).max(0.0)),
                None => Mapped::invalid(0.0),
            },
        }
    }

    fn polar_coordinate_to_point(&self, angle: f64, radial: f64) -> PointF {
        let center = self.center();
        let radians = angle.to_radians();
        PointF::new(
            center.x + radial * radians.sin(),
            center.y - radial * radians.cos(),
        )
    }

    pub(super) fn polar_geometry_point(&self, point: PointF) -> Mapped<PointF> {
        let angle = self.angular_coordinate(point.x);
        let radial = self.radial_coordinate(point.y);
        let geometry = self.polar_coordinate_to_point(angle.value, radial.value);
        if angle.ok && radial.ok {
            Mapped::valid(geometry)
        } else {
            Mapped::invalid(geometry)
        }
    }

    pub(super) fn polar_domain_point(&self, point: PointF) -> PointF {
        let center = self.center();
        if point == center {
            return PointF::new(self.bounds.min_x, self.bounds.min_y);
        }

        let dx = point.x - center.x;
        let dy = point.y - center.y;
        let mut angle = dx.atan2(-dy).to_degrees();
        if angle < 0.0 {
            angle += FULL_CIRCLE_DEGREES;
        }
        let distance = dx.hypot(dy);

        PointF::new(
            self.x_scale.value_at(
                angle / FULL_CIRCLE_DEGREES,
                self.bounds.min_x,
                self.bounds.max_x,
            ),
            self.y_scale
                .value_at(distance / self.radius(), self.bounds.min_y, self.bounds.max_y),
        )
    }
}
