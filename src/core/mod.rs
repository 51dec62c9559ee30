pub mod axis;
pub mod domain;
pub mod domain_config;
pub mod nice_numbers;
pub mod polar_line;
pub mod primitives;
pub mod series_geometry;
pub mod types;

pub use axis::{AxisEvent, AxisId, AxisScaleType, ValueAxis};
pub use domain::{
    AxisAttachment, AxisScaleKind, Domain, DomainBounds, DomainEvent, DomainKind, PolarView,
};
pub use domain_config::DomainConfig;
pub use nice_numbers::{NiceRange, loose_nice_numbers, nice_number};
pub use polar_line::{PathCommand, plan_polar_line};
pub use series_geometry::{AreaGeometry, XySeriesGeometry, project_area_geometry};
pub use types::{Mapped, Orientation, PointF, RectF, SizeF};
