use serde::{Deserialize, Serialize};

use crate::core::domain::{
    DEFAULT_LOG_BASE, Domain, DomainBounds, DomainKind, validate_log_base,
};
use crate::core::{Orientation, SizeF};
use crate::error::{ChartError, ChartResult};

/// Serializable domain setup.
///
/// Host applications persist and restore a domain through this type instead
/// of replaying the mutations that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    #[serde(default)]
    pub kind: DomainKind,
    pub size: SizeF,
    pub bounds: DomainBounds,
    #[serde(default = "default_log_base")]
    pub log_base_x: f64,
    #[serde(default = "default_log_base")]
    pub log_base_y: f64,
    #[serde(default)]
    pub reverse_x: bool,
    #[serde(default)]
    pub reverse_y: bool,
}

impl DomainConfig {
    #[must_use]
    pub fn new(kind: DomainKind, size: SizeF, bounds: DomainBounds) -> Self {
        Self {
            kind,
            size,
            bounds,
            log_base_x: default_log_base(),
            log_base_y: default_log_base(),
            reverse_x: false,
            reverse_y: false,
        }
    }

    /// Sets the logarithm bases. Ignored by linear axes.
    #[must_use]
    pub fn with_log_bases(mut self, base_x: f64, base_y: f64) -> Self {
        self.log_base_x = base_x;
        self.log_base_y = base_y;
        self
    }

    #[must_use]
    pub fn with_reverse(mut self, reverse_x: bool, reverse_y: bool) -> Self {
        self.reverse_x = reverse_x;
        self.reverse_y = reverse_y;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.size.validate()?;
        let b = self.bounds;
        let finite = [b.min_x, b.max_x, b.min_y, b.max_y]
            .iter()
            .all(|value| value.is_finite());
        if !finite || b.max_x < b.min_x || b.max_y < b.min_y {
            return Err(ChartError::InvalidData(format!(
                "domain bounds must be finite with max >= min, got {b:?}"
            )));
        }
        validate_log_base(self.log_base_x)?;
        validate_log_base(self.log_base_y)?;
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize domain config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse domain config json: {e}"))
        })?;
        config.validate()
    }
}

impl Domain {
    /// Builds a domain from a validated configuration.
    ///
    /// Construction does not leave notifications behind.
    pub fn from_config(config: &DomainConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let mut domain = Self::new(config.kind);
        domain.set_size(config.size);
        domain.set_reverse_x(config.reverse_x);
        domain.set_reverse_y(config.reverse_y);
        domain.handle_base_changed(Orientation::Horizontal, config.log_base_x)?;
        domain.handle_base_changed(Orientation::Vertical, config.log_base_y)?;
        let b = config.bounds;
        domain.set_range(b.min_x, b.max_x, b.min_y, b.max_y);
        domain.take_events();
        Ok(domain)
    }

    /// Captures the current state as a configuration.
    #[must_use]
    pub fn snapshot(&self) -> DomainConfig {
        DomainConfig {
            kind: self.kind(),
            size: self.size(),
            bounds: self.bounds(),
            log_base_x: self.log_base_x().unwrap_or(DEFAULT_LOG_BASE),
            log_base_y: self.log_base_y().unwrap_or(DEFAULT_LOG_BASE),
            reverse_x: self.is_reverse_x(),
            reverse_y: self.is_reverse_y(),
        }
    }
}

fn default_log_base() -> f64 {
    DEFAULT_LOG_BASE
}
