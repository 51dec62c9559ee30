//! Range-bearing axis objects that domains synchronize with.
//!
//! An axis is the source of truth for user-driven range edits. It never
//! reaches into a domain; edits queue [`AxisEvent`]s which the owning
//! registry forwards to every attached domain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::domain::{AxisScaleKind, DEFAULT_LOG_BASE, validate_log_base};
use crate::core::primitives::fuzzy_compare;
use crate::core::Orientation;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(pub u32);

/// Scale family of an axis; log axes carry their base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisScaleType {
    Value,
    Log { base: f64 },
}

impl AxisScaleType {
    #[must_use]
    pub fn log() -> Self {
        Self::Log {
            base: DEFAULT_LOG_BASE,
        }
    }

    #[must_use]
    pub fn kind(self) -> AxisScaleKind {
        match self {
            Self::Value => AxisScaleKind::Value,
            Self::Log { .. } => AxisScaleKind::Log,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisEvent {
    RangeChanged { min: f64, max: f64 },
    ReverseChanged(bool),
    BaseChanged(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    id: AxisId,
    orientation: Orientation,
    scale_type: AxisScaleType,
    min: f64,
    max: f64,
    reverse: bool,
    events: Vec<AxisEvent>,
}

impl ValueAxis {
    #[must_use]
    pub fn new(id: AxisId, orientation: Orientation) -> Self {
        Self {
            id,
            orientation,
            scale_type: AxisScaleType::Value,
            min: 0.0,
            max: 0.0,
            reverse: false,
            events: Vec::new(),
        }
    }

    /// Creates a logarithmic axis.
    pub fn new_log(id: AxisId, orientation: Orientation, base: f64) -> ChartResult<Self> {
        let base = validate_log_base(base)?;
        Ok(Self {
            scale_type: AxisScaleType::Log { base },
            ..Self::new(id, orientation)
        })
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn scale_type(&self) -> AxisScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Sets the displayed range. Unchanged ranges queue nothing.
    pub fn set_range(&mut self, min: f64, max: f64) -> ChartResult<()> {
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(ChartError::InvalidData(format!(
                "axis range must be finite with max >= min, got [{min}, {max}]"
            )));
        }
        if fuzzy_compare(self.min, min) && fuzzy_compare(self.max, max) {
            return Ok(());
        }
        debug!(axis = self.id.0, min, max, "axis range changed");
        self.min = min;
        self.max = max;
        self.events.push(AxisEvent::RangeChanged { min, max });
        Ok(())
    }

    pub fn set_reverse(&mut self, reverse: bool) {
        if self.reverse != reverse {
            self.reverse = reverse;
            self.events.push(AxisEvent::ReverseChanged(reverse));
        }
    }

    /// Changes the base of a log axis.
    pub fn set_base(&mut self, base: f64) -> ChartResult<()> {
        let base = validate_log_base(base)?;
        match &mut self.scale_type {
            AxisScaleType::Value => Err(ChartError::InvalidData(format!(
                "axis {} is not logarithmic",
                self.id.0
            ))),
            AxisScaleType::Log { base: current } => {
                if *current != base {
                    *current = base;
                    self.events.push(AxisEvent::BaseChanged(base));
                }
                Ok(())
            }
        }
    }

    /// Accepts a range pushed by a domain. Same as [`ValueAxis::set_range`]
    /// but silently ignores ranges an axis cannot display.
    pub fn handle_domain_range_changed(&mut self, min: f64, max: f64) {
        if self.set_range(min, max).is_err() {
            debug!(axis = self.id.0, min, max, "axis ignored invalid domain range");
        }
    }

    pub fn take_events(&mut self) -> Vec<AxisEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn pending_events(&self) -> &[AxisEvent] {
        &self.events
    }
}
