use chart_domain::ChartError;
use chart_domain::core::{
    AxisAttachment, AxisEvent, AxisId, AxisScaleType, Domain, DomainKind, Orientation, ValueAxis,
};

#[test]
fn attach_captures_reverse_flag() {
    let mut axis = ValueAxis::new(AxisId(1), Orientation::Vertical);
    axis.set_reverse(true);

    let mut domain = Domain::new(DomainKind::XY);
    assert!(domain.attach_axis(&axis));
    assert!(domain.is_reverse_y());
    assert!(!domain.is_reverse_x());
    assert_eq!(
        domain.attached_axes(),
        &[AxisAttachment {
            axis: AxisId(1),
            orientation: Orientation::Vertical
        }]
    );
    assert_eq!(domain.attached_axis(Orientation::Vertical), Some(AxisId(1)));
    assert_eq!(domain.attached_axis(Orientation::Horizontal), None);
}

#[test]
fn attaching_twice_is_rejected() {
    let axis = ValueAxis::new(AxisId(4), Orientation::Horizontal);
    let mut domain = Domain::new(DomainKind::XY);
    assert!(domain.attach_axis(&axis));
    assert!(!domain.attach_axis(&axis));
    assert_eq!(domain.attached_axes().len(), 1);
}

#[test]
fn log_axis_base_is_applied_to_log_domain() {
    let axis = ValueAxis::new_log(AxisId(2), Orientation::Horizontal, 2.0).expect("log axis");
    let mut domain = Domain::new(DomainKind::LogXY);
    domain.set_range(1.0, 64.0, 0.0, 1.0);

    domain.attach_axis(&axis);
    assert_eq!(domain.log_base_x(), Some(2.0));
}

#[test]
fn log_axis_base_is_ignored_by_linear_domain() {
    let axis = ValueAxis::new_log(AxisId(2), Orientation::Horizontal, 2.0).expect("log axis");
    let mut domain = Domain::new(DomainKind::XY);
    domain.attach_axis(&axis);
    assert_eq!(domain.log_base_x(), None);
}

#[test]
fn detach_forgets_attachment() {
    let axis = ValueAxis::new(AxisId(7), Orientation::Horizontal);
    let mut domain = Domain::new(DomainKind::XY);
    domain.attach_axis(&axis);

    assert!(domain.detach_axis(AxisId(7)));
    assert!(!domain.detach_axis(AxisId(7)));
    assert!(domain.attached_axes().is_empty());
}

#[test]
fn axis_range_edits_drive_matching_orientation() {
    let mut domain = Domain::new(DomainKind::XY);
    domain.set_range(0.0, 1.0, 0.0, 1.0);
    domain.handle_axis_range_changed(Orientation::Horizontal, -4.0, 4.0);
    domain.handle_axis_range_changed(Orientation::Vertical, 10.0, 20.0);

    assert_eq!(domain.min_x(), -4.0);
    assert_eq!(domain.max_x(), 4.0);
    assert_eq!(domain.min_y(), 10.0);
    assert_eq!(domain.max_y(), 20.0);
}

#[test]
fn axis_queues_only_real_changes() {
    let mut axis = ValueAxis::new(AxisId(0), Orientation::Horizontal);
    axis.set_range(0.0, 10.0).expect("valid range");
    axis.set_range(0.0, 10.0).expect("valid range");
    axis.set_reverse(false);
    axis.set_reverse(true);

    assert_eq!(
        axis.take_events(),
        vec![
            AxisEvent::RangeChanged { min: 0.0, max: 10.0 },
            AxisEvent::ReverseChanged(true),
        ]
    );
    assert!(axis.pending_events().is_empty());
}

#[test]
fn axis_rejects_invalid_ranges_and_bases() {
    let mut axis = ValueAxis::new(AxisId(0), Orientation::Horizontal);
    assert!(matches!(
        axis.set_range(5.0, 1.0),
        Err(ChartError::InvalidData(_))
    ));
    assert!(axis.set_base(2.0).is_err());

    axis.handle_domain_range_changed(f64::NAN, 1.0);
    assert_eq!(axis.range(), (0.0, 0.0));

    assert!(matches!(
        ValueAxis::new_log(AxisId(1), Orientation::Vertical, 0.0),
        Err(ChartError::InvalidLogBase(_))
    ));
}

#[test]
fn log_axis_reports_base_changes() {
    let mut axis = ValueAxis::new_log(AxisId(3), Orientation::Vertical, 10.0).expect("log axis");
    axis.set_base(10.0).expect("same base");
    axis.set_base(2.0).expect("new base");

    assert_eq!(axis.scale_type(), AxisScaleType::Log { base: 2.0 });
    assert_eq!(axis.take_events(), vec![AxisEvent::BaseChanged(2.0)]);
}
