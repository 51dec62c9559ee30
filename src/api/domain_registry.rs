use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisEvent, AxisId, AxisScaleKind, AxisScaleType, Domain, DomainBounds, DomainEvent,
    DomainKind, Orientation, RectF, SizeF, ValueAxis,
};
use crate::error::{ChartError, ChartResult};

/// Upper bound on sync rounds run by one [`DomainRegistry::pump`] call.
///
/// Change detection on both sides normally settles the loop in two or three
/// rounds.
pub const MAX_PUMP_ROUNDS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartType {
    #[default]
    Cartesian,
    Polar,
}

/// Owner of every series domain and axis of one chart.
///
/// Mutations queue events on domains and axes; [`DomainRegistry::pump`]
/// delivers them in both directions until nothing changes and reports which
/// series need their geometry recomputed.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    chart_type: ChartType,
    size: SizeF,
    domains: IndexMap<SeriesId, Domain>,
    axes: IndexMap<AxisId, ValueAxis>,
    next_series_id: u32,
    next_axis_id: u32,
}

impl DomainRegistry {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn size(&self) -> SizeF {
        self.size
    }

    /// Registers a series with a fresh linear domain of the chart's projection.
    pub fn add_series(&mut self) -> SeriesId {
        let id = SeriesId(self.next_series_id);
        self.next_series_id += 1;
        let polar = self.chart_type == ChartType::Polar;
        let mut domain = Domain::new(DomainKind::from_parts(
            AxisScaleKind::Value,
            AxisScaleKind::Value,
            polar,
        ));
        domain.set_size(self.size);
        domain.take_events();
        self.domains.insert(id, domain);
        debug!(series = id.0, "series added");
        id
    }

    /// Removes a series and returns its domain.
    pub fn remove_series(&mut self, series: SeriesId) -> ChartResult<Domain> {
        let domain = self
            .domains
            .shift_remove(&series)
            .ok_or(ChartError::UnknownSeries(series.0))?;
        debug!(series = series.0, "series removed");
        Ok(domain)
    }

    pub fn add_axis(
        &mut self,
        orientation: Orientation,
        scale_type: AxisScaleType,
    ) -> ChartResult<AxisId> {
        let id = AxisId(self.next_axis_id);
        let axis = match scale_type {
            AxisScaleType::Value => ValueAxis::new(id, orientation),
            AxisScaleType::Log { base } => ValueAxis::new_log(id, orientation, base)?,
        };
        self.next_axis_id += 1;
        self.axes.insert(id, axis);
        debug!(axis = id.0, ?orientation, ?scale_type, "axis added");
        Ok(id)
    }

    /// Detaches an axis from every series and removes it.
    pub fn remove_axis(&mut self, axis: AxisId) -> ChartResult<ValueAxis> {
        if !self.axes.contains_key(&axis) {
            return Err(ChartError::UnknownAxis(axis.0));
        }
        let attached: Vec<SeriesId> = self
            .domains
            .iter()
            .filter(|(_, domain)| domain.attached_axes().iter().any(|a| a.axis == axis))
            .map(|(id, _)| *id)
            .collect();
        for series in attached {
            self.detach_axis(series, axis)?;
        }
        self.axes
            .shift_remove(&axis)
            .ok_or(ChartError::UnknownAxis(axis.0))
    }

    #[must_use]
    pub fn domain(&self, series: SeriesId) -> Option<&Domain> {
        self.domains.get(&series)
    }

    pub fn domains(&self) -> impl Iterator<Item = (SeriesId, &Domain)> {
        self.domains.iter().map(|(id, domain)| (*id, domain))
    }

    #[must_use]
    pub fn axis(&self, axis: AxisId) -> Option<&ValueAxis> {
        self.axes.get(&axis)
    }

    /// Mutable access for user-driven axis edits; call [`Self::pump`] after.
    pub fn axis_mut(&mut self, axis: AxisId) -> Option<&mut ValueAxis> {
        self.axes.get_mut(&axis)
    }

    /// Sets the value range of a series, as a series does when it receives
    /// data.
    pub fn set_series_range(&mut self, series: SeriesId, bounds: DomainBounds) -> ChartResult<()> {
        let domain = self
            .domains
            .get_mut(&series)
            .ok_or(ChartError::UnknownSeries(series.0))?;
        domain.set_range(bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y);
        Ok(())
    }

    /// Attaches `axis` to `series`.
    ///
    /// The domain kind is re-selected from the scale of the attached axes; a
    /// kind change replaces the domain, keeping bounds, size and reversal.
    /// An axis with an unset range adopts the domain range, otherwise the
    /// domain adopts the axis range.
    pub fn attach_axis(&mut self, series: SeriesId, axis: AxisId) -> ChartResult<()> {
        let target = self.axes.get(&axis).ok_or(ChartError::UnknownAxis(axis.0))?;
        let orientation = target.orientation();
        let domain = self
            .domains
            .get(&series)
            .ok_or(ChartError::UnknownSeries(series.0))?;
        match domain.attached_axis(orientation) {
            Some(existing) if existing == axis => return Ok(()),
            Some(existing) => {
                return Err(ChartError::AxisOrientationTaken {
                    series: series.0,
                    orientation,
                    existing: existing.0,
                });
            }
            None => {}
        }

        let mut scales = self.attached_scales(domain);
        match orientation {
            Orientation::Horizontal => scales.0 = target.scale_type().kind(),
            Orientation::Vertical => scales.1 = target.scale_type().kind(),
        }
        self.replace_domain_kind(series, scales)?;

        let Self { domains, axes, .. } = self;
        let domain = domains
            .get_mut(&series)
            .ok_or(ChartError::UnknownSeries(series.0))?;
        let target = axes.get_mut(&axis).ok_or(ChartError::UnknownAxis(axis.0))?;

        domain.block_range_signals(true);
        domain.attach_axis(target);
        let (axis_min, axis_max) = target.range();
        if axis_min == axis_max {
            let b = domain.bounds();
            match orientation {
                Orientation::Horizontal => target.handle_domain_range_changed(b.min_x, b.max_x),
                Orientation::Vertical => target.handle_domain_range_changed(b.min_y, b.max_y),
            }
        } else {
            domain.handle_axis_range_changed(orientation, axis_min, axis_max);
        }
        domain.block_range_signals(false);
        debug!(series = series.0, axis = axis.0, kind = ?domain.kind(), "axis attached");
        Ok(())
    }

    /// Detaches `axis` from `series`; the domain kind falls back to linear on
    /// that orientation.
    pub fn detach_axis(&mut self, series: SeriesId, axis: AxisId) -> ChartResult<()> {
        if !self.axes.contains_key(&axis) {
            return Err(ChartError::UnknownAxis(axis.0));
        }
        let domain = self
            .domains
            .get_mut(&series)
            .ok_or(ChartError::UnknownSeries(series.0))?;
        if !domain.detach_axis(axis) {
            return Err(ChartError::InvalidData(format!(
                "axis {} is not attached to series {}",
                axis.0, series.0
            )));
        }
        let scales = self.attached_scales(&self.domains[&series]);
        self.replace_domain_kind(series, scales)
    }

    /// Resizes every domain.
    pub fn set_geometry_size(&mut self, size: SizeF) -> ChartResult<()> {
        size.validate()?;
        self.size = size;
        self.for_each_blocked(|domain| domain.set_size(size));
        Ok(())
    }

    /// Zooms every domain into `rect` (geometry coordinates).
    pub fn zoom_in(&mut self, rect: RectF) {
        self.for_each_blocked(|domain| domain.zoom_in(rect));
    }

    pub fn zoom_out(&mut self, rect: RectF) {
        self.for_each_blocked(|domain| domain.zoom_out(rect));
    }

    /// Pans every domain by a geometry-space offset.
    pub fn scroll(&mut self, dx: f64, dy: f64) {
        self.for_each_blocked(|domain| domain.move_by(dx, dy));
    }

    pub fn zoom_reset(&mut self) {
        self.for_each_blocked(Domain::zoom_reset);
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.domains.values().any(Domain::is_zoomed)
    }

    /// Delivers queued events between domains and axes until both sides are
    /// quiet.
    ///
    /// Returns every series whose domain reported [`DomainEvent::Updated`],
    /// in registration order of first update.
    pub fn pump(&mut self) -> Vec<SeriesId> {
        let Self { domains, axes, .. } = self;
        let mut updated = IndexSet::new();

        for round in 0..MAX_PUMP_ROUNDS {
            let mut delivered = false;

            for (series, domain) in domains.iter_mut() {
                for event in domain.take_events() {
                    delivered = true;
                    trace!(series = series.0, ?event, round, "domain event");
                    let (orientation, min, max) = match event {
                        DomainEvent::Updated => {
                            updated.insert(*series);
                            continue;
                        }
                        DomainEvent::RangeHorizontalChanged { min, max } => {
                            (Orientation::Horizontal, min, max)
                        }
                        DomainEvent::RangeVerticalChanged { min, max } => {
                            (Orientation::Vertical, min, max)
                        }
                    };
                    let Some(axis_id) = domain.attached_axis(orientation) else {
                        continue;
                    };
                    if let Some(axis) = axes.get_mut(&axis_id) {
                        axis.handle_domain_range_changed(min, max);
                    }
                }
            }

            for (axis_id, axis) in axes.iter_mut() {
                let orientation = axis.orientation();
                for event in axis.take_events() {
                    delivered = true;
                    trace!(axis = axis_id.0, ?event, round, "axis event");
                    let targets = domains
                        .values_mut()
                        .filter(|domain| domain.attached_axes().iter().any(|a| a.axis == *axis_id));
                    for domain in targets {
                        match event {
                            AxisEvent::RangeChanged { min, max } => {
                                domain.handle_axis_range_changed(orientation, min, max);
                            }
                            AxisEvent::ReverseChanged(reverse) => {
                                domain.handle_reverse_changed(orientation, reverse);
                            }
                            AxisEvent::BaseChanged(base) => {
                                if let Err(err) = domain.handle_base_changed(orientation, base) {
                                    warn!(axis = axis_id.0, error = %err, "ignored axis base change");
                                }
                            }
                        }
                    }
                }
            }

            if !delivered {
                return updated.into_iter().collect();
            }
        }

        warn!(
            rounds = MAX_PUMP_ROUNDS,
            "domain/axis sync did not settle; remaining events stay queued"
        );
        updated.into_iter().collect()
    }

    fn attached_scales(&self, domain: &Domain) -> (AxisScaleKind, AxisScaleKind) {
        let scale_of = |orientation| {
            domain
                .attached_axis(orientation)
                .and_then(|id| self.axes.get(&id))
                .map_or(AxisScaleKind::Value, |axis| axis.scale_type().kind())
        };
        (
            scale_of(Orientation::Horizontal),
            scale_of(Orientation::Vertical),
        )
    }

    fn replace_domain_kind(
        &mut self,
        series: SeriesId,
        (x_scale, y_scale): (AxisScaleKind, AxisScaleKind),
    ) -> ChartResult<()> {
        let kind = DomainKind::from_parts(x_scale, y_scale, self.chart_type == ChartType::Polar);
        let current = self
            .domains
            .get(&series)
            .ok_or(ChartError::UnknownSeries(series.0))?;
        if current.kind() == kind {
            return Ok(());
        }

        let mut replacement = current.convert_to(kind);
        for attachment in current.attached_axes() {
            if let Some(axis) = self.axes.get(&attachment.axis) {
                replacement.attach_axis(axis);
            }
        }
        debug!(series = series.0, from = ?current.kind(), to = ?kind, "domain replaced");
        self.domains.insert(series, replacement);
        Ok(())
    }

    fn for_each_blocked(&mut self, mut operation: impl FnMut(&mut Domain)) {
        for domain in self.domains.values_mut() {
            domain.block_range_signals(true);
        }
        for domain in self.domains.values_mut() {
            operation(domain);
        }
        for domain in self.domains.values_mut() {
            domain.block_range_signals(false);
        }
    }
}
