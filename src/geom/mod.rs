mod algorithm;
mod bbox;
mod geom;

use bbox::BoundingBox;
pub(crate) use algorithm::{build_projection, Intersection};
pub(crate) use geom::Geometries;
