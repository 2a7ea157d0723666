// Domain layer - Pure data models and geometry
pub mod aircraft;
pub mod geo;
pub mod kpi;
pub mod snapshot;
pub mod vessel;
