use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::domain::Domain;
use crate::core::PointF;
use crate::error::{ChartError, ChartResult};

/// Cached geometry of an XY series (line, scatter, spline).
///
/// The cache follows the domain: a full recompute happens on
/// [`XySeriesGeometry::handle_domain_updated`], while single point edits are
/// applied incrementally when the cache is current. Readers get `&Domain`;
/// only the owning series group mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct XySeriesGeometry {
    points: Vec<PointF>,
    geometry: Vec<PointF>,
    dirty: bool,
    valid: bool,
}

impl XySeriesGeometry {
    #[must_use]
    pub fn new(points: Vec<PointF>) -> Self {
        Self {
            points,
            geometry: Vec::new(),
            dirty: true,
            valid: true,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[PointF] {
        &self.points
    }

    /// Geometry points of the last successful projection.
    #[must_use]
    pub fn geometry_points(&self) -> &[PointF] {
        &self.geometry
    }

    /// `false` after a projection hit a value without an image (for example
    /// a non-positive value on a log axis); nothing should be drawn then.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recomputes the whole geometry. Empty domains are skipped and leave the
    /// cache dirty.
    pub fn handle_domain_updated(&mut self, domain: &Domain) {
        if domain.is_empty() {
            self.dirty = true;
            return;
        }
        self.geometry = domain.calculate_geometry_points(&self.points);
        self.valid = self.points.is_empty() || !self.geometry.is_empty();
        self.dirty = false;
        trace!(count = self.geometry.len(), valid = self.valid, "series geometry updated");
    }

    pub fn handle_point_added(
        &mut self,
        domain: &Domain,
        index: usize,
        point: PointF,
    ) -> ChartResult<()> {
        if index > self.points.len() {
            return Err(index_error(index, self.points.len()));
        }
        self.points.insert(index, point);
        if self.needs_full_update() {
            self.handle_domain_updated(domain);
            return Ok(());
        }
        match domain.calculate_geometry_point(point).into_option() {
            Some(geometry) => self.geometry.insert(index, geometry),
            None => self.invalidate(),
        }
        Ok(())
    }

    pub fn handle_point_removed(&mut self, domain: &Domain, index: usize) -> ChartResult<()> {
        if index >= self.points.len() {
            return Err(index_error(index, self.points.len()));
        }
        self.points.remove(index);
        if self.needs_full_update() {
            self.handle_domain_updated(domain);
        } else {
            self.geometry.remove(index);
        }
        Ok(())
    }

    pub fn handle_point_replaced(
        &mut self,
        domain: &Domain,
        index: usize,
        point: PointF,
    ) -> ChartResult<()> {
        if index >= self.points.len() {
            return Err(index_error(index, self.points.len()));
        }
        self.points[index] = point;
        if self.needs_full_update() {
            self.handle_domain_updated(domain);
            return Ok(());
        }
        match domain.calculate_geometry_point(point).into_option() {
            Some(geometry) => self.geometry[index] = geometry,
            None => self.invalidate(),
        }
        Ok(())
    }

    pub fn handle_points_replaced(&mut self, domain: &Domain, points: Vec<PointF>) {
        self.points = points;
        self.dirty = true;
        self.handle_domain_updated(domain);
    }

    /// Marks every point lying outside the domain bounds.
    #[must_use]
    pub fn off_grid_status(&self, domain: &Domain) -> Vec<bool> {
        let b = domain.bounds();
        self.points
            .iter()
            .map(|p| p.x < b.min_x || p.x > b.max_x || p.y < b.min_y || p.y > b.max_y)
            .collect()
    }

    /// Converts a geometry-space position (for example a click) into value
    /// space. `None` while the domain is empty.
    #[must_use]
    pub fn domain_point_at(&self, domain: &Domain, position: PointF) -> Option<PointF> {
        (!domain.is_empty()).then(|| domain.calculate_domain_point(position))
    }

    fn needs_full_update(&self) -> bool {
        self.dirty || self.geometry.is_empty()
    }

    fn invalidate(&mut self) {
        self.geometry.clear();
        self.valid = false;
    }
}

/// Deterministic geometry of an area series.
///
/// `fill_polygon` is explicitly closed: the first vertex is repeated at the
/// end so consumers need no implicit closure rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaGeometry {
    pub upper_points: Vec<PointF>,
    pub lower_points: Vec<PointF>,
    pub fill_polygon: Vec<PointF>,
}

impl AreaGeometry {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            upper_points: Vec::new(),
            lower_points: Vec::new(),
            fill_polygon: Vec::new(),
        }
    }
}

/// Builds area geometry from an upper line and an optional lower line that
/// share one domain.
///
/// Without a lower line the area closes against the baseline: the bottom
/// edge (top edge on a reversed vertical axis) for Cartesian domains, the
/// centre for polar ones. Invalid or empty upper geometry yields an empty
/// area.
#[must_use]
pub fn project_area_geometry(
    domain: &Domain,
    upper: &XySeriesGeometry,
    lower: Option<&XySeriesGeometry>,
) -> AreaGeometry {
    let upper_points = upper.geometry_points();
    if !upper.is_valid() || upper_points.is_empty() || domain.is_empty() {
        return AreaGeometry::empty();
    }

    let lower_points: Vec<PointF> = match lower {
        Some(lower) if lower.is_valid() => lower.geometry_points().to_vec(),
        _ => Vec::new(),
    };

    let mut fill_polygon = Vec::with_capacity(upper_points.len() + lower_points.len() + 3);
    fill_polygon.extend(upper_points.iter().copied());
    if !lower_points.is_empty() {
        fill_polygon.extend(lower_points.iter().rev().copied());
    } else if let Some(polar) = domain.polar() {
        fill_polygon.push(polar.center());
    } else {
        let baseline_y = if domain.is_reverse_y() {
            0.0
        } else {
            domain.size().height
        };
        let first_x = upper_points[0].x;
        let last_x = upper_points[upper_points.len() - 1].x;
        fill_polygon.push(PointF::new(last_x, baseline_y));
        fill_polygon.push(PointF::new(first_x, baseline_y));
    }
    fill_polygon.push(upper_points[0]);

    AreaGeometry {
        upper_points: upper_points.to_vec(),
        lower_points,
        fill_polygon,
    }
}

fn index_error(index: usize, len: usize) -> ChartError {
    ChartError::InvalidData(format!("point index {index} out of bounds for {len} points"))
}
