//! chart-domain: coordinate domains for 2D charts.
//!
//! A [`core::Domain`] maps between value space and geometry (pixel) space for
//! Cartesian and polar charts with linear or logarithmic axes. It supports
//! zoom, pan and a one-level zoom reset, and keeps attached axes in sync
//! through queued events. [`api::DomainRegistry`] owns the domains and axes
//! of a chart and runs the sync loop.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use crate::api::{ChartType, DomainRegistry, SeriesId};
pub use crate::core::{Domain, DomainConfig, DomainEvent, DomainKind};
pub use error::{ChartError, ChartResult};
