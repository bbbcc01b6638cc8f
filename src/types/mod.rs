mod country_code;
mod dgurba;

pub use country_code::{CountryCode, Projection};
pub use dgurba::Dgurba;
