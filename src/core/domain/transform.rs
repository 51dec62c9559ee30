#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use tracing::warn;

use crate::core::{Mapped, PointF};

use super::Domain;

impl Domain {
    /// Converts a value-space point into geometry space.
    ///
    /// Values without an image under a log axis (zero or negative) yield
    /// `ok == false`; that axis then contributes `0` before reversal so the
    /// caller still receives a finite coordinate it may choose to skip.
    /// An empty domain (zero span or zero size) maps nothing: the result is
    /// the origin with `ok == false`.
    #[must_use]
    pub fn calculate_geometry_point(&self, point: PointF) -> Mapped<PointF> {
        if self.is_empty() {
            warn!(
                x = point.x,
                y = point.y,
                "cannot map a point through an empty domain"
            );
            return Mapped::invalid(PointF::new(0.0, 0.0));
        }
        let mapped = self.project(point);
        if !mapped.ok {
            warn!(
                x = point.x,
                y = point.y,
                "point has no geometry: logarithm of a non-positive value or non-finite result"
            );
        }
        mapped
    }

    /// Converts a batch of value-space points into geometry space.
    ///
    /// All or nothing: if any point is invalid, or the domain is empty, the
    /// result is empty, so a renderer never draws a partially computed path.
    #[must_use]
    pub fn calculate_geometry_points(&self, points: &[PointF]) -> Vec<PointF> {
        if self.is_empty() {
            warn!(count = points.len(), "cannot map points through an empty domain");
            return Vec::new();
        }

        #[cfg(feature = "parallel-projection")]
        let projected: Option<Vec<PointF>> = points
            .par_iter()
            .map(|point| self.project(*point).into_option())
            .collect();

        #[cfg(not(feature = "parallel-projection"))]
        let projected: Option<Vec<PointF>> = points
            .iter()
            .map(|point| self.project(*point).into_option())
            .collect();

        projected.unwrap_or_else(|| {
            warn!(
                count = points.len(),
                "batch contains a point without geometry; empty geometry returned"
            );
            Vec::new()
        })
    }

    /// Converts a geometry-space point back into value space.
    #[must_use]
    pub fn calculate_domain_point(&self, point: PointF) -> PointF {
        if self.kind.is_polar() {
            return self.polar_domain_point(point);
        }

        let width = self.size.width;
        let height = self.size.height;
        let x = if self.reverse_x { width - point.x } else { point.x };
        let y = if self.reverse_y { point.y } else { height - point.y };

        PointF::new(
            self.x_scale
                .value_at(x / width, self.bounds.min_x, self.bounds.max_x),
            self.y_scale
                .value_at(y / height, self.bounds.min_y, self.bounds.max_y),
        )
    }

    fn project(&self, point: PointF) -> Mapped<PointF> {
        let mapped = if self.kind.is_polar() {
            self.polar_geometry_point(point)
        } else {
            self.cartesian_geometry_point(point)
        };
        if mapped.value.x.is_finite() && mapped.value.y.is_finite() {
            mapped
        } else {
            Mapped::invalid(PointF::new(0.0, 0.0))
        }
    }

    fn cartesian_geometry_point(&self, point: PointF) -> Mapped<PointF> {
        let width = self.size.width;
        let height = self.size.height;
        let fx = self
            .x_scale
            .fraction(point.x, self.bounds.min_x, self.bounds.max_x);
        let fy = self
            .y_scale
            .fraction(point.y, self.bounds.min_y, self.bounds.max_y);

        let x = fx.unwrap_or(0.0) * width;
        let y = fy.unwrap_or(0.0) * height;
        let x = if self.reverse_x { width - x } else { x };
        // Geometry grows downward, value space grows upward.
        let y = if self.reverse_y { y } else { height - y };

        let geometry = PointF::new(x, y);
        if fx.is_some() && fy.is_some() {
            Mapped::valid(geometry)
        } else {
            Mapped::invalid(geometry)
        }
    }
}
