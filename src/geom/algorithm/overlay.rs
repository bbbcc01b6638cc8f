use geo::{Area, BooleanOps, BoundingRect, MultiPolygon};

use crate::geom::{BoundingBox, Geometries};

/// Non-empty overlap between `self.shapes()[left]` and `other.shapes()[right]`.
#[derive(Debug, Clone)]
pub(crate) struct Intersection {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) shape: MultiPolygon<f64>,
    pub(crate) area: f64,
}

impl Geometries {
    /// Polygon overlay of two layers: every pair of shapes whose intersection has positive area.
    /// Candidate pairs come from `other`'s R-tree, so disjoint pairs are never intersected.
    /// Output is ordered by `(left, right)`.
    pub(crate) fn overlay(&self, other: &Geometries) -> Vec<Intersection> {
        let mut intersections = Vec::new();

        for (left, shape) in self.shapes().iter().enumerate() {
            let Some(rect) = shape.bounding_rect() else { continue };

            let mut candidates: Vec<usize> = other.query(&BoundingBox::envelope_of(&rect))
                .map(|bb| bb.idx())
                .collect();
            candidates.sort_unstable();

            for right in candidates {
                let overlap = shape.intersection(&other.shapes()[right]);
                let area = overlap.unsigned_area();
                if area > 0.0 {
                    intersections.push(Intersection { left, right, shape: overlap, area });
                }
            }
        }

        intersections
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use super::*;

    fn square(x: f64, y: f64, side: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x, y: y),
            (x: x + side, y: y),
            (x: x + side, y: y + side),
            (x: x, y: y + side),
            (x: x, y: y),
        ]])
    }

    #[test]
    fn overlay_keeps_only_positive_area() {
        let left = Geometries::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 1.0)], None);
        let right = Geometries::new(vec![
            square(1.0, 1.0, 2.0),  // overlaps left[0] in a 1x1 square
            square(2.0, 0.0, 1.0),  // only touches left[0] along an edge
            square(50.0, 50.0, 1.0), // disjoint
        ], None);

        let result = left.overlay(&right);
        assert_eq!(result.len(), 1);
        assert_eq!((result[0].left, result[0].right), (0, 0));
        assert!((result[0].area - 1.0).abs() < 1e-9);
        assert!((result[0].shape.unsigned_area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overlay_is_ordered() {
        let left = Geometries::new(vec![square(0.0, 0.0, 4.0)], None);
        let right = Geometries::new(
            (0..4).rev().map(|i| square(i as f64, 0.0, 1.0)).collect(),
            None,
        );

        let result = left.overlay(&right);
        let order: Vec<usize> = result.iter().map(|i| i.right).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        let total: f64 = result.iter().map(|i| i.area).sum();
        assert!((total - 4.0).abs() < 1e-9);
    }
}
