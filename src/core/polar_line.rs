//! Line path planning on polar domains.
//!
//! The domain maps each point independently, so two consecutive points more
//! than 180° apart would be joined by a chord cutting across the chart. The
//! planner routes such segments through the centre instead, and cuts segments
//! between on-grid and off-grid points at the vertical axis line.

use serde::{Deserialize, Serialize};

use crate::core::domain::Domain;
use crate::core::PointF;
use crate::error::{ChartError, ChartResult};

const HALF_CIRCLE_DEGREES: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(PointF),
    LineTo(PointF),
}

/// Plans the path of a line series on a polar domain.
///
/// Points whose horizontal value lies outside the domain range are off-grid;
/// segments joining two off-grid points are dropped. Returns an empty path
/// when the domain is empty or any point is invalid.
pub fn plan_polar_line(domain: &Domain, points: &[PointF]) -> ChartResult<Vec<PathCommand>> {
    let polar = domain.polar().ok_or_else(|| {
        ChartError::InvalidData(format!(
            "polar line planning requires a polar domain, got {:?}",
            domain.kind()
        ))
    })?;
    if domain.is_empty() || points.is_empty() {
        return Ok(Vec::new());
    }
    let geometry = domain.calculate_geometry_points(points);
    if geometry.is_empty() {
        return Ok(Vec::new());
    }

    let min_x = domain.min_x();
    let max_x = domain.max_x();
    let off_grid = |point: PointF| point.x < min_x || point.x > max_x;
    let center = polar.center();

    let mut commands = Vec::with_capacity(geometry.len() + 1);
    let mut previous_off_grid = off_grid(points[0]);
    if !previous_off_grid {
        commands.push(PathCommand::MoveTo(geometry[0]));
    }

    for i in 1..geometry.len() {
        let current = geometry[i];
        let previous = geometry[i - 1];
        let current_off_grid = off_grid(points[i]);

        if current_off_grid && previous_off_grid {
            continue;
        }

        let intersection = if current_off_grid != previous_off_grid {
            Some(axis_line_intersection(center, previous, current))
        } else {
            None
        };
        if let (true, Some(point)) = (previous_off_grid, intersection) {
            commands.push(PathCommand::MoveTo(point));
        }

        let current_angle = polar.to_angular_coordinate(points[i].x).value;
        let previous_angle = polar.to_angular_coordinate(points[i - 1].x).value;
        if (current_angle - previous_angle).abs() > HALF_CIRCLE_DEGREES {
            commands.push(PathCommand::LineTo(center));
        }

        let end = match (current_off_grid, intersection) {
            (true, Some(point)) => point,
            _ => current,
        };
        commands.push(PathCommand::LineTo(end));
        previous_off_grid = current_off_grid;
    }

    Ok(commands)
}

/// Point where the segment `previous → current` meets the vertical line
/// through the centre.
fn axis_line_intersection(center: PointF, previous: PointF, current: PointF) -> PointF {
    let y = if current.x == previous.x {
        current.y + (current.y - previous.y) / 2.0
    } else {
        let ratio = (center.x - current.x) / (current.x - previous.x);
        current.y + (current.y - previous.y) * ratio
    };
    PointF::new(center.x, y)
}
