mod io;
mod summary;

pub use summary::{Aggregate, ClassSummary, UrbanizationSummary};
