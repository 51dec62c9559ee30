use tracing::{debug, warn};

use crate::core::RectF;

use super::Domain;

/// Angular extent of a polar domain in degrees.
pub(super) const FULL_CIRCLE_DEGREES: f64 = 360.0;

impl Domain {
    /// Zooms so that `rect` (geometry space) becomes the visible window.
    ///
    /// Polar domains read `rect` in (degrees, radial units) space.
    pub fn zoom_in(&mut self, rect: RectF) {
        if !self.can_navigate(rect) {
            return;
        }
        self.store_zoom_reset();
        let (lo_x, hi_x, lo_y, hi_y) = self.zoom_fractions(rect);
        let b = self.bounds;
        let (min_x, max_x) = self.x_scale.zoom_in(lo_x, hi_x, b.min_x, b.max_x);
        let (min_y, max_y) = self.y_scale.zoom_in(lo_y, hi_y, b.min_y, b.max_y);
        debug!(?rect, "domain zoom in");
        self.set_range(min_x, max_x, min_y, max_y);
    }

    /// Zooms out so that the current window shrinks to `rect`.
    pub fn zoom_out(&mut self, rect: RectF) {
        if !self.can_navigate(rect) {
            return;
        }
        self.store_zoom_reset();
        let (lo_x, hi_x, lo_y, hi_y) = self.zoom_fractions(rect);
        let b = self.bounds;
        let (min_x, max_x) = self.x_scale.zoom_out(lo_x, hi_x, b.min_x, b.max_x);
        let (min_y, max_y) = self.y_scale.zoom_out(lo_y, hi_y, b.min_y, b.max_y);
        debug!(?rect, "domain zoom out");
        self.set_range(min_x, max_x, min_y, max_y);
    }

    /// Pans the visible bounds by a geometry-space delta.
    ///
    /// Deltas are negated on reversed axes before conversion.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        if self.size.is_empty() {
            warn!(dx, dy, "ignoring pan on a domain without drawable size");
            return;
        }
        let dx = if self.reverse_x { -dx } else { dx };
        let dy = if self.reverse_y { -dy } else { dy };
        let (extent_x, extent_y) = self.axis_extents();
        let b = self.bounds;

        let (min_x, max_x) = if dx != 0.0 {
            self.x_scale.pan(dx / extent_x, b.min_x, b.max_x)
        } else {
            (b.min_x, b.max_x)
        };
        let (min_y, max_y) = if dy != 0.0 {
            self.y_scale.pan(dy / extent_y, b.min_y, b.max_y)
        } else {
            (b.min_y, b.max_y)
        };
        self.set_range(min_x, max_x, min_y, max_y);
    }

    /// Mirrors the rect centre across the geometry size on reversed axes.
    ///
    /// Polar domains mirror across the size as well, even though their zoom
    /// rectangles are read in (degrees, radial units).
    #[must_use]
    pub fn fix_zoom_rect(&self, rect: RectF) -> RectF {
        if !self.reverse_x && !self.reverse_y {
            return rect;
        }
        let mut center = rect.center();
        if self.reverse_x {
            center.x = self.size.width - center.x;
        }
        if self.reverse_y {
            center.y = self.size.height - center.y;
        }
        rect.with_center(center)
    }

    /// Geometry extent of each axis: the size for Cartesian domains, a full
    /// circle and the radius for polar ones.
    pub(super) fn axis_extents(&self) -> (f64, f64) {
        if self.kind.is_polar() {
            (FULL_CIRCLE_DEGREES, self.radius())
        } else {
            (self.size.width, self.size.height)
        }
    }

    /// Axis fractions covered by `rect`: `(lo_x, hi_x, lo_y, hi_y)`.
    fn zoom_fractions(&self, rect: RectF) -> (f64, f64, f64, f64) {
        let rect = self.fix_zoom_rect(rect);
        let (extent_x, extent_y) = self.axis_extents();
        (
            rect.left() / extent_x,
            rect.right() / extent_x,
            (extent_y - rect.bottom()) / extent_y,
            (extent_y - rect.top()) / extent_y,
        )
    }

    fn can_navigate(&self, rect: RectF) -> bool {
        if self.size.is_empty() {
            warn!(?rect, "ignoring zoom on a domain without drawable size");
            return false;
        }
        let degenerate = !(rect.width > 0.0 && rect.height > 0.0)
            || !rect.x.is_finite()
            || !rect.y.is_finite();
        if degenerate {
            warn!(?rect, "ignoring zoom with a degenerate rectangle");
            return false;
        }
        true
    }
}
