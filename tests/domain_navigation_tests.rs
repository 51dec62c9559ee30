use approx::assert_relative_eq;
use chart_domain::core::{Domain, DomainBounds, DomainEvent, DomainKind, RectF, SizeF};

fn domain(kind: DomainKind, bounds: (f64, f64, f64, f64), size: (f64, f64)) -> Domain {
    let mut domain = Domain::new(kind);
    domain.set_range(bounds.0, bounds.1, bounds.2, bounds.3);
    domain.set_size(SizeF::new(size.0, size.1));
    domain.take_events();
    domain
}

fn assert_bounds(domain: &Domain, expected: (f64, f64, f64, f64)) {
    let b = domain.bounds();
    assert_relative_eq!(b.min_x, expected.0, epsilon = 1e-9, max_relative = 1e-9);
    assert_relative_eq!(b.max_x, expected.1, epsilon = 1e-9, max_relative = 1e-9);
    assert_relative_eq!(b.min_y, expected.2, epsilon = 1e-9, max_relative = 1e-9);
    assert_relative_eq!(b.max_y, expected.3, epsilon = 1e-9, max_relative = 1e-9);
}

#[test]
fn pan_then_zoom_into_left_half() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (200.0, 200.0));

    domain.move_by(20.0, 0.0);
    assert_bounds(&domain, (10.0, 110.0, 0.0, 100.0));

    domain.zoom_in(RectF::new(0.0, 0.0, 100.0, 200.0));
    assert_bounds(&domain, (10.0, 60.0, 0.0, 100.0));
}

#[test]
fn positive_vertical_pan_raises_values() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (100.0, 100.0));
    domain.move_by(0.0, 10.0);
    assert_bounds(&domain, (0.0, 100.0, 10.0, 110.0));
}

#[test]
fn pan_is_negated_on_reversed_axis() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (200.0, 200.0));
    domain.set_reverse_x(true);
    domain.move_by(20.0, 0.0);
    assert_bounds(&domain, (-10.0, 90.0, 0.0, 100.0));
}

#[test]
fn log_pan_shifts_log_window() {
    let mut domain = domain(DomainKind::LogXY, (1.0, 100.0, 0.0, 1.0), (100.0, 100.0));
    domain.move_by(50.0, 0.0);
    assert_bounds(&domain, (10.0, 1000.0, 0.0, 1.0));
}

#[test]
fn zero_pan_leaves_domain_untouched() {
    let mut domain = domain(DomainKind::LogXLogY, (3.0, 70.0, 2.0, 9.0), (100.0, 100.0));
    domain.move_by(0.0, 0.0);
    assert!(domain.pending_events().is_empty());
}

#[test]
fn zoom_out_places_current_range_inside_rect() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (100.0, 100.0));
    domain.zoom_out(RectF::new(25.0, 25.0, 50.0, 50.0));
    assert_bounds(&domain, (-50.0, 150.0, -50.0, 150.0));
}

#[test]
fn log_zoom_in_uses_log_window() {
    let mut domain = domain(DomainKind::LogXLogY, (1.0, 1e4, 1.0, 1e4), (100.0, 100.0));
    domain.zoom_in(RectF::new(25.0, 25.0, 50.0, 50.0));
    assert_bounds(&domain, (10.0, 1000.0, 10.0, 1000.0));
}

#[test]
fn log_zoom_out_widens_around_centre() {
    let mut domain = domain(DomainKind::LogXLogY, (10.0, 1000.0, 10.0, 1000.0), (100.0, 100.0));
    domain.zoom_out(RectF::new(25.0, 25.0, 50.0, 50.0));
    assert_bounds(&domain, (1.0, 1e4, 1.0, 1e4));
}

#[test]
fn zoom_rect_is_mirrored_on_reversed_axis() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (100.0, 100.0));
    domain.set_reverse_x(true);

    let fixed = domain.fix_zoom_rect(RectF::new(0.0, 0.0, 50.0, 100.0));
    assert_eq!(fixed, RectF::new(50.0, 0.0, 50.0, 100.0));

    domain.zoom_in(RectF::new(0.0, 0.0, 50.0, 100.0));
    assert_bounds(&domain, (50.0, 100.0, 0.0, 100.0));
}

#[test]
fn zoom_reset_restores_first_snapshot() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, -20.0, 20.0), (400.0, 300.0));
    let original = domain.bounds();

    domain.zoom_in(RectF::new(10.0, 10.0, 100.0, 100.0));
    domain.zoom_in(RectF::new(50.0, 20.0, 60.0, 40.0));
    domain.zoom_out(RectF::new(0.0, 0.0, 200.0, 150.0));
    domain.move_by(-35.0, 12.0);
    assert!(domain.is_zoomed());
    assert_eq!(domain.zoom_reset_bounds(), Some(original));

    domain.zoom_reset();
    assert_eq!(domain, original);
    assert!(!domain.is_zoomed());

    // A second reset without zooming is a no-op.
    domain.take_events();
    domain.zoom_reset();
    assert!(domain.pending_events().is_empty());
}

#[test]
fn degenerate_zoom_rect_is_ignored() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (100.0, 100.0));
    domain.zoom_in(RectF::new(10.0, 10.0, 0.0, 20.0));
    domain.zoom_out(RectF::new(10.0, 10.0, 20.0, -5.0));

    assert_eq!(domain, DomainBounds::new(0.0, 100.0, 0.0, 100.0));
    assert!(!domain.is_zoomed());
}

#[test]
fn navigation_without_size_is_ignored() {
    let mut domain = Domain::new(DomainKind::XY);
    domain.set_range(0.0, 10.0, 0.0, 10.0);
    domain.take_events();

    domain.zoom_in(RectF::new(0.0, 0.0, 5.0, 5.0));
    domain.move_by(3.0, 3.0);
    assert!(domain.pending_events().is_empty());
    assert!(!domain.is_zoomed());
}

#[test]
fn zoom_emits_range_events_then_update() {
    let mut domain = domain(DomainKind::XY, (0.0, 100.0, 0.0, 100.0), (100.0, 100.0));
    domain.zoom_in(RectF::new(0.0, 0.0, 50.0, 50.0));

    assert_eq!(
        domain.take_events(),
        vec![
            DomainEvent::RangeHorizontalChanged { min: 0.0, max: 50.0 },
            DomainEvent::RangeVerticalChanged { min: 50.0, max: 100.0 },
            DomainEvent::Updated,
        ]
    );
}
