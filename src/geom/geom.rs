use geo::{Area, BoundingRect, MultiPolygon};
use rstar::{RTree, AABB};

use crate::geom::BoundingBox;

/// Geometries represents an indexed collection of MultiPolygons in a single CRS.
#[derive(Debug, Clone)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
    rtree: RTree<BoundingBox>,
    epsg: Option<u32>, // EPSG code, if known
}

impl Geometries {
    /// Construct a Geometries object from a vector of MultiPolygons.
    /// Empty shapes are kept but left out of the spatial index.
    pub(crate) fn new(shapes: Vec<MultiPolygon<f64>>, epsg: Option<u32>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                    .collect()
            ),
            shapes,
            epsg,
        }
    }

    /// Get a reference to the list of MultiPolygons.
    #[inline] pub(crate) fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Get the EPSG code of the CRS the shapes are expressed in, if known.
    #[inline] pub(crate) fn epsg(&self) -> Option<u32> { self.epsg }

    /// Query the R-tree for bounding boxes intersecting the given envelope.
    #[inline]
    pub(super) fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item=&BoundingBox> {
        self.rtree.locate_in_envelope_intersecting(envelope)
    }

    /// Planar area of every MultiPolygon, in squared CRS units.
    pub(crate) fn areas(&self) -> Vec<f64> {
        self.shapes.iter().map(|shape| shape.unsigned_area()).collect()
    }
}
