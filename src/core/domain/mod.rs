//! Live mapping between value space and geometry space.
//!
//! A [`Domain`] owns the value-space rectangle of one series/axis group, the
//! geometry size it is drawn into, a one-level zoom-reset snapshot and the
//! reversed-axis flags. All eight coordinate families share this type; the
//! [`DomainKind`] tag selects the per-axis scale (value or log) and the
//! projection (Cartesian or polar).
//!
//! Mutations never call back into other objects. Instead they queue
//! [`DomainEvent`]s in mutation order; the owner drains them with
//! [`Domain::take_events`] and forwards them to axes and renderers.

mod axis_scale;
mod navigation;
mod polar;
mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::axis::{AxisId, AxisScaleType, ValueAxis};
use crate::core::primitives::fuzzy_is_null;
use crate::core::{Orientation, SizeF};
use crate::error::ChartResult;

pub use axis_scale::{
    AxisScaleKind, DEFAULT_LOG_BASE, adjust_log_domain_ranges, validate_log_base,
};
pub use polar::PolarView;

use axis_scale::AxisScale;

/// Coordinate family of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DomainKind {
    #[default]
    XY,
    XLogY,
    LogXY,
    LogXLogY,
    XYPolar,
    XLogYPolar,
    LogXYPolar,
    LogXLogYPolar,
}

impl DomainKind {
    /// Builds the kind from the horizontal (angular) and vertical (radial)
    /// scale families.
    #[must_use]
    pub fn from_parts(x: AxisScaleKind, y: AxisScaleKind, polar: bool) -> Self {
        use AxisScaleKind::{Log, Value};
        match (x, y, polar) {
            (Value, Value, false) => Self::XY,
            (Value, Log, false) => Self::XLogY,
            (Log, Value, false) => Self::LogXY,
            (Log, Log, false) => Self::LogXLogY,
            (Value, Value, true) => Self::XYPolar,
            (Value, Log, true) => Self::XLogYPolar,
            (Log, Value, true) => Self::LogXYPolar,
            (Log, Log, true) => Self::LogXLogYPolar,
        }
    }

    #[must_use]
    pub fn x_scale(self) -> AxisScaleKind {
        match self {
            Self::LogXY | Self::LogXLogY | Self::LogXYPolar | Self::LogXLogYPolar => {
                AxisScaleKind::Log
            }
            _ => AxisScaleKind::Value,
        }
    }

    #[must_use]
    pub fn y_scale(self) -> AxisScaleKind {
        match self {
            Self::XLogY | Self::LogXLogY | Self::XLogYPolar | Self::LogXLogYPolar => {
                AxisScaleKind::Log
            }
            _ => AxisScaleKind::Value,
        }
    }

    #[must_use]
    pub fn is_polar(self) -> bool {
        matches!(
            self,
            Self::XYPolar | Self::XLogYPolar | Self::LogXYPolar | Self::LogXLogYPolar
        )
    }
}

/// Value-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl DomainBounds {
    #[must_use]
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Fuzzy equality used by domain comparison.
    #[must_use]
    pub fn fuzzy_eq(&self, other: &Self) -> bool {
        fuzzy_is_null(self.max_x - other.max_x)
            && fuzzy_is_null(self.max_y - other.max_y)
            && fuzzy_is_null(self.min_x - other.min_x)
            && fuzzy_is_null(self.min_y - other.min_y)
    }
}

/// Notification queued by a domain mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DomainEvent {
    /// Geometry must be recomputed by every reader of the domain.
    Updated,
    RangeHorizontalChanged { min: f64, max: f64 },
    RangeVerticalChanged { min: f64, max: f64 },
}

/// Axis wired to a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisAttachment {
    pub axis: AxisId,
    pub orientation: Orientation,
}

#[derive(Debug, Clone)]
pub struct Domain {
    kind: DomainKind,
    x_scale: AxisScale,
    y_scale: AxisScale,
    bounds: DomainBounds,
    size: SizeF,
    signals_blocked: bool,
    zoom_reset: Option<DomainBounds>,
    reverse_x: bool,
    reverse_y: bool,
    attached_axes: SmallVec<[AxisAttachment; 2]>,
    events: Vec<DomainEvent>,
}

impl Domain {
    /// Creates an empty domain of the given kind.
    #[must_use]
    pub fn new(kind: DomainKind) -> Self {
        Self {
            kind,
            x_scale: AxisScale::new(kind.x_scale()),
            y_scale: AxisScale::new(kind.y_scale()),
            bounds: DomainBounds::default(),
            size: SizeF::default(),
            signals_blocked: false,
            zoom_reset: None,
            reverse_x: false,
            reverse_y: false,
            attached_axes: SmallVec::new(),
            events: Vec::new(),
        }
    }

    /// Builds a domain of another kind carrying over size, bounds and
    /// reversal. Axis attachments are not copied; the owner re-attaches them.
    #[must_use]
    pub fn convert_to(&self, kind: DomainKind) -> Self {
        let mut domain = Self::new(kind);
        domain.size = self.size;
        domain.reverse_x = self.reverse_x;
        domain.reverse_y = self.reverse_y;
        for (orientation, scale) in [
            (Orientation::Horizontal, self.x_scale),
            (Orientation::Vertical, self.y_scale),
        ] {
            if let Some(base) = scale.log_base() {
                domain.scale_mut(orientation).set_base(base, 1.0, 1.0);
            }
        }
        domain.set_range(
            self.bounds.min_x,
            self.bounds.max_x,
            self.bounds.min_y,
            self.bounds.max_y,
        );
        debug!(from = ?self.kind, to = ?kind, "converted domain kind");
        domain
    }

    #[must_use]
    pub fn kind(&self) -> DomainKind {
        self.kind
    }

    pub fn set_size(&mut self, size: SizeF) {
        if self.size != size {
            debug!(width = size.width, height = size.height, "domain size changed");
            self.size = size;
            self.events.push(DomainEvent::Updated);
        }
    }

    #[must_use]
    pub fn size(&self) -> SizeF {
        self.size
    }

    /// Sets all four bounds.
    ///
    /// Log axes first clamp non-positive minimums. Axes whose bounds did not
    /// change (within tolerance) are left untouched and emit nothing, which
    /// makes repeated calls idempotent.
    pub fn set_range(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) {
        let (min_x, max_x) = self.x_scale.adjust_range(min_x, max_x);
        let (min_y, max_y) = self.y_scale.adjust_range(min_y, max_y);

        let x_changed = !self
            .x_scale
            .same_range((self.bounds.min_x, self.bounds.max_x), (min_x, max_x));
        if x_changed {
            self.bounds.min_x = min_x;
            self.bounds.max_x = max_x;
            self.x_scale.refresh(min_x, max_x);
            if !self.signals_blocked {
                self.events
                    .push(DomainEvent::RangeHorizontalChanged { min: min_x, max: max_x });
            }
        }

        let y_changed = !self
            .y_scale
            .same_range((self.bounds.min_y, self.bounds.max_y), (min_y, max_y));
        if y_changed {
            self.bounds.min_y = min_y;
            self.bounds.max_y = max_y;
            self.y_scale.refresh(min_y, max_y);
            if !self.signals_blocked {
                self.events
                    .push(DomainEvent::RangeVerticalChanged { min: min_y, max: max_y });
            }
        }

        if x_changed || y_changed {
            debug!(min_x, max_x, min_y, max_y, "domain range changed");
            self.events.push(DomainEvent::Updated);
        }
    }

    pub fn set_range_x(&mut self, min: f64, max: f64) {
        self.set_range(min, max, self.bounds.min_y, self.bounds.max_y);
    }

    pub fn set_range_y(&mut self, min: f64, max: f64) {
        self.set_range(self.bounds.min_x, self.bounds.max_x, min, max);
    }

    pub fn set_min_x(&mut self, min: f64) {
        self.set_range(min, self.bounds.max_x, self.bounds.min_y, self.bounds.max_y);
    }

    pub fn set_max_x(&mut self, max: f64) {
        self.set_range(self.bounds.min_x, max, self.bounds.min_y, self.bounds.max_y);
    }

    pub fn set_min_y(&mut self, min: f64) {
        self.set_range(self.bounds.min_x, self.bounds.max_x, min, self.bounds.max_y);
    }

    pub fn set_max_y(&mut self, max: f64) {
        self.set_range(self.bounds.min_x, self.bounds.max_x, self.bounds.min_y, max);
    }

    #[must_use]
    pub fn bounds(&self) -> DomainBounds {
        self.bounds
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.bounds.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.bounds.max_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.bounds.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.bounds.max_y
    }

    #[must_use]
    pub fn span_x(&self) -> f64 {
        debug_assert!(self.bounds.max_x >= self.bounds.min_x);
        self.bounds.max_x - self.bounds.min_x
    }

    #[must_use]
    pub fn span_y(&self) -> f64 {
        debug_assert!(self.bounds.max_y >= self.bounds.min_y);
        self.bounds.max_y - self.bounds.min_y
    }

    /// Returns `true` when there is nothing to draw: a zero span on either
    /// axis or a size without area. Transform calls must be skipped then.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        fuzzy_is_null(self.span_x()) || fuzzy_is_null(self.span_y()) || self.size.is_empty()
    }

    /// Blocks or releases outward range notifications.
    ///
    /// Releasing always re-queues the current horizontal and vertical range,
    /// even when nothing changed while blocked.
    pub fn block_range_signals(&mut self, block: bool) {
        if self.signals_blocked == block {
            return;
        }
        self.signals_blocked = block;
        if !block {
            self.events.push(DomainEvent::RangeHorizontalChanged {
                min: self.bounds.min_x,
                max: self.bounds.max_x,
            });
            self.events.push(DomainEvent::RangeVerticalChanged {
                min: self.bounds.min_y,
                max: self.bounds.max_y,
            });
        }
    }

    #[must_use]
    pub fn range_signals_blocked(&self) -> bool {
        self.signals_blocked
    }

    /// Restores the bounds saved before the first zoom since the last reset.
    pub fn zoom_reset(&mut self) {
        if let Some(saved) = self.zoom_reset.take() {
            debug!("domain zoom reset");
            self.set_range(saved.min_x, saved.max_x, saved.min_y, saved.max_y);
        }
    }

    /// Saves the current bounds unless a snapshot is already held.
    pub fn store_zoom_reset(&mut self) {
        if self.zoom_reset.is_none() {
            self.zoom_reset = Some(self.bounds);
        }
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoom_reset.is_some()
    }

    #[must_use]
    pub fn zoom_reset_bounds(&self) -> Option<DomainBounds> {
        self.zoom_reset
    }

    pub fn set_reverse_x(&mut self, reverse: bool) {
        self.reverse_x = reverse;
    }

    pub fn set_reverse_y(&mut self, reverse: bool) {
        self.reverse_y = reverse;
    }

    #[must_use]
    pub fn is_reverse_x(&self) -> bool {
        self.reverse_x
    }

    #[must_use]
    pub fn is_reverse_y(&self) -> bool {
        self.reverse_y
    }

    #[must_use]
    pub fn log_base_x(&self) -> Option<f64> {
        self.x_scale.log_base()
    }

    #[must_use]
    pub fn log_base_y(&self) -> Option<f64> {
        self.y_scale.log_base()
    }

    /// Wires `axis` to this domain and captures its reversal flag.
    ///
    /// When the axis is logarithmic and this domain maps that orientation
    /// logarithmically, the axis base replaces the domain base. Returns
    /// `false` if the axis is already attached.
    pub fn attach_axis(&mut self, axis: &ValueAxis) -> bool {
        if self.attached_axes.iter().any(|a| a.axis == axis.id()) {
            return false;
        }
        let orientation = axis.orientation();
        match orientation {
            Orientation::Horizontal => self.reverse_x = axis.is_reverse(),
            Orientation::Vertical => self.reverse_y = axis.is_reverse(),
        }
        self.attached_axes.push(AxisAttachment {
            axis: axis.id(),
            orientation,
        });
        if let AxisScaleType::Log { base } = axis.scale_type() {
            if self.scale(orientation).log_base().is_some() {
                self.apply_log_base(orientation, base);
            }
        }
        debug!(axis = axis.id().0, ?orientation, "axis attached to domain");
        true
    }

    /// Forgets the attachment of `axis`. Returns `false` if it was not attached.
    pub fn detach_axis(&mut self, axis: AxisId) -> bool {
        let before = self.attached_axes.len();
        self.attached_axes.retain(|a| a.axis != axis);
        let removed = self.attached_axes.len() != before;
        if removed {
            debug!(axis = axis.0, "axis detached from domain");
        }
        removed
    }

    #[must_use]
    pub fn attached_axes(&self) -> &[AxisAttachment] {
        &self.attached_axes
    }

    #[must_use]
    pub fn attached_axis(&self, orientation: Orientation) -> Option<AxisId> {
        self.attached_axes
            .iter()
            .find(|a| a.orientation == orientation)
            .map(|a| a.axis)
    }

    /// Inbound axis range edit for one orientation.
    pub fn handle_axis_range_changed(&mut self, orientation: Orientation, min: f64, max: f64) {
        match orientation {
            Orientation::Horizontal => self.set_range_x(min, max),
            Orientation::Vertical => self.set_range_y(min, max),
        }
    }

    /// Inbound axis reversal change. Always queues [`DomainEvent::Updated`].
    pub fn handle_reverse_changed(&mut self, orientation: Orientation, reverse: bool) {
        match orientation {
            Orientation::Horizontal => self.reverse_x = reverse,
            Orientation::Vertical => self.reverse_y = reverse,
        }
        self.events.push(DomainEvent::Updated);
    }

    /// Inbound log-axis base change.
    ///
    /// Re-derives the log window from the current bounds (which stay as they
    /// are) and queues [`DomainEvent::Updated`]. Linear orientations ignore
    /// the change.
    pub fn handle_base_changed(&mut self, orientation: Orientation, base: f64) -> ChartResult<()> {
        let base = validate_log_base(base)?;
        if self.scale(orientation).log_base().is_none() {
            debug!(?orientation, base, "ignoring log base change on linear axis");
            return Ok(());
        }
        self.apply_log_base(orientation, base);
        Ok(())
    }

    /// Drains queued notifications in the order they were produced.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn pending_events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Polar-only coordinate primitives; `None` for Cartesian domains.
    #[must_use]
    pub fn polar(&self) -> Option<PolarView<'_>> {
        self.kind.is_polar().then_some(PolarView { domain: self })
    }

    fn apply_log_base(&mut self, orientation: Orientation, base: f64) {
        let (min, max) = match orientation {
            Orientation::Horizontal => (self.bounds.min_x, self.bounds.max_x),
            Orientation::Vertical => (self.bounds.min_y, self.bounds.max_y),
        };
        // Bounds of a log axis are only positive once a range was set.
        let (min, max) = adjust_log_domain_ranges(min, max);
        self.scale_mut(orientation).set_base(base, min, max);
        debug!(?orientation, base, "domain log base changed");
        self.events.push(DomainEvent::Updated);
    }

    fn scale(&self, orientation: Orientation) -> AxisScale {
        match orientation {
            Orientation::Horizontal => self.x_scale,
            Orientation::Vertical => self.y_scale,
        }
    }

    fn scale_mut(&mut self, orientation: Orientation) -> &mut AxisScale {
        match orientation {
            Orientation::Horizontal => &mut self.x_scale,
            Orientation::Vertical => &mut self.y_scale,
        }
    }
}

/// Two domains are equal when their bounds match within tolerance; size,
/// kind and reversal are not compared.
impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.bounds.fuzzy_eq(&other.bounds)
    }
}

impl PartialEq<DomainBounds> for Domain {
    fn eq(&self, other: &DomainBounds) -> bool {
        self.bounds.fuzzy_eq(other)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Domain({}, {}, {}, {}) {}x{}",
            self.bounds.min_x,
            self.bounds.max_x,
            self.bounds.min_y,
            self.bounds.max_y,
            self.size.width,
            self.size.height
        )
    }
}
