use chart_domain::core::{
    Domain, DomainKind, PointF, SizeF, XySeriesGeometry, project_area_geometry,
};

fn domain(kind: DomainKind, bounds: (f64, f64, f64, f64)) -> Domain {
    let mut domain = Domain::new(kind);
    domain.set_range(bounds.0, bounds.1, bounds.2, bounds.3);
    domain.set_size(SizeF::new(100.0, 100.0));
    domain.take_events();
    domain
}

fn line(points: &[(f64, f64)]) -> XySeriesGeometry {
    XySeriesGeometry::new(points.iter().map(|&(x, y)| PointF::new(x, y)).collect())
}

#[test]
fn domain_update_projects_every_point() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let mut series = line(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
    assert!(series.is_dirty());

    series.handle_domain_updated(&domain);
    assert!(!series.is_dirty());
    assert!(series.is_valid());
    assert_eq!(
        series.geometry_points(),
        &[
            PointF::new(0.0, 100.0),
            PointF::new(50.0, 50.0),
            PointF::new(100.0, 0.0),
        ]
    );
}

#[test]
fn empty_domain_is_skipped() {
    let empty = Domain::new(DomainKind::XY);
    let mut series = line(&[(1.0, 1.0)]);

    series.handle_domain_updated(&empty);
    assert!(series.is_dirty());
    assert!(series.geometry_points().is_empty());
    assert_eq!(series.domain_point_at(&empty, PointF::new(1.0, 1.0)), None);
}

#[test]
fn point_edits_update_cache_incrementally() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let mut series = line(&[(0.0, 0.0), (10.0, 10.0)]);
    series.handle_domain_updated(&domain);

    series
        .handle_point_added(&domain, 1, PointF::new(2.5, 2.5))
        .expect("insert point");
    assert_eq!(series.geometry_points()[1], PointF::new(25.0, 75.0));
    assert_eq!(series.points().len(), 3);

    series
        .handle_point_replaced(&domain, 1, PointF::new(5.0, 10.0))
        .expect("replace point");
    assert_eq!(series.geometry_points()[1], PointF::new(50.0, 0.0));

    series.handle_point_removed(&domain, 0).expect("remove point");
    assert_eq!(
        series.geometry_points(),
        &[PointF::new(50.0, 0.0), PointF::new(100.0, 0.0)]
    );
}

#[test]
fn out_of_range_indices_are_rejected() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let mut series = line(&[(1.0, 1.0)]);

    assert!(series.handle_point_added(&domain, 5, PointF::new(0.0, 0.0)).is_err());
    assert!(series.handle_point_removed(&domain, 1).is_err());
    assert!(series.handle_point_replaced(&domain, 3, PointF::new(0.0, 0.0)).is_err());
    assert_eq!(series.points().len(), 1);
}

#[test]
fn invalid_log_point_invalidates_geometry() {
    let domain = domain(DomainKind::XLogY, (0.0, 10.0, 1.0, 100.0));
    let mut series = line(&[(1.0, 10.0), (2.0, 20.0)]);
    series.handle_domain_updated(&domain);
    assert_eq!(series.geometry_points().len(), 2);

    series
        .handle_point_added(&domain, 2, PointF::new(3.0, 0.0))
        .expect("insert point");
    assert!(!series.is_valid());
    assert!(series.geometry_points().is_empty());

    series.handle_points_replaced(&domain, vec![PointF::new(1.0, 1.0), PointF::new(2.0, 100.0)]);
    assert!(series.is_valid());
    assert_eq!(series.geometry_points().len(), 2);
}

#[test]
fn off_grid_status_flags_points_outside_bounds() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let series = line(&[(5.0, 5.0), (-1.0, 5.0), (5.0, 11.0), (10.0, 0.0)]);

    assert_eq!(series.off_grid_status(&domain), vec![false, true, true, false]);
}

#[test]
fn click_position_converts_to_value() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let series = line(&[]);

    let value = series
        .domain_point_at(&domain, PointF::new(25.0, 25.0))
        .expect("non-empty domain");
    assert_eq!(value, PointF::new(2.5, 7.5));
}

#[test]
fn area_without_lower_line_closes_on_baseline() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let mut upper = line(&[(0.0, 5.0), (10.0, 5.0)]);
    upper.handle_domain_updated(&domain);

    let area = project_area_geometry(&domain, &upper, None);
    assert!(area.lower_points.is_empty());
    assert_eq!(
        area.fill_polygon,
        vec![
            PointF::new(0.0, 50.0),
            PointF::new(100.0, 50.0),
            PointF::new(100.0, 100.0),
            PointF::new(0.0, 100.0),
            PointF::new(0.0, 50.0),
        ]
    );
}

#[test]
fn area_with_lower_line_walks_it_backwards() {
    let domain = domain(DomainKind::XY, (0.0, 10.0, 0.0, 10.0));
    let mut upper = line(&[(0.0, 5.0), (10.0, 5.0)]);
    let mut lower = line(&[(0.0, 1.0), (10.0, 1.0)]);
    upper.handle_domain_updated(&domain);
    lower.handle_domain_updated(&domain);

    let area = project_area_geometry(&domain, &upper, Some(&lower));
    assert_eq!(
        area.fill_polygon,
        vec![
            PointF::new(0.0, 50.0),
            PointF::new(100.0, 50.0),
            PointF::new(100.0, 90.0),
            PointF::new(0.0, 90.0),
            PointF::new(0.0, 50.0),
        ]
    );
}

#[test]
fn polar_area_closes_at_centre() {
    let domain = domain(DomainKind::XYPolar, (0.0, 360.0, 0.0, 10.0));
    let mut upper = line(&[(0.0, 10.0), (90.0, 10.0)]);
    upper.handle_domain_updated(&domain);

    let area = project_area_geometry(&domain, &upper, None);
    assert_eq!(area.fill_polygon.len(), 4);
    assert_eq!(area.fill_polygon[2], PointF::new(50.0, 50.0));
    assert_eq!(area.fill_polygon[3], area.fill_polygon[0]);
}

#[test]
fn invalid_upper_line_yields_empty_area() {
    let domain = domain(DomainKind::XLogY, (0.0, 10.0, 1.0, 100.0));
    let mut upper = line(&[(0.0, -5.0), (10.0, 5.0)]);
    upper.handle_domain_updated(&domain);

    let area = project_area_geometry(&domain, &upper, None);
    assert!(area.fill_polygon.is_empty());
    assert!(area.upper_points.is_empty());
}
