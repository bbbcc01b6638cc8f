#![doc = "Areal interpolation of gridded population onto Local Administrative Units"]
mod common;
mod config;
mod country;
mod error;
mod geom;
mod interp;
mod io;
mod layer;
mod render;
mod summary;
mod types;

#[doc(inline)]
pub use config::{AdminSchema, GridSchema, Schema, Settings, DEFAULT_DATA_PATH, DEFAULT_GRAPH_PATH};

#[doc(inline)]
pub use country::Country;

#[doc(inline)]
pub use error::ConfigError;

#[doc(inline)]
pub use interp::{interpolate, InterpolationReport};

#[doc(inline)]
pub use layer::{AdminLayer, AdminUnit, GridCell, GridLayer};

#[doc(inline)]
pub use render::{Chart, SummaryRenderer, SvgChartRenderer};

#[doc(inline)]
pub use summary::{Aggregate, ClassSummary, UrbanizationSummary};

#[doc(inline)]
pub use types::{CountryCode, Dgurba, Projection};
