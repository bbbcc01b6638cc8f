use std::fmt;

use serde::Serialize;

/// Degree of Urbanisation class of a LAU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Dgurba(pub u8);

impl Dgurba {
    pub const CITY: Dgurba = Dgurba(1);
    pub const TOWN: Dgurba = Dgurba(2);
    pub const RURAL: Dgurba = Dgurba(3);

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Cities",
            2 => "Towns and suburbs",
            3 => "Rural areas",
            _ => "Unclassified",
        }
    }
}

impl fmt::Display for Dgurba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
