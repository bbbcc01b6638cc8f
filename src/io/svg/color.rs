//! Colors used in SVG charts.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl Rgb {
    pub(crate) const TOMATO: Rgb = Rgb { r: 255, g: 99, b: 71 };
    pub(crate) const FOREST_GREEN: Rgb = Rgb { r: 34, g: 139, b: 34 };
    pub(crate) const AXIS: Rgb = Rgb { r: 17, g: 24, b: 39 };
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}
