mod domain_registry;

pub use domain_registry::{ChartType, DomainRegistry, MAX_PUMP_ROUNDS, SeriesId};
