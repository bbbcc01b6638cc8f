pub mod interpolate;
pub mod projections;
