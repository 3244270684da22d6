//! Regions the rejection sampler can draw from.
//!
//! The sampler only needs three facts about a region: its bounding box, an exact
//! membership predicate, and its area (for the degeneracy pre-check). `geo`
//! supplies all three for polygons with holes and for multi-polygons.
//!
//! Boundary policy
//! - Membership is `geo::Contains`, i.e. the strict interior. A point exactly on
//!   an edge (outer ring or hole) is not inside.

use geo::{Area, BoundingRect, Contains, Coord, MultiPolygon, Point, Polygon};

use super::types::BoundingBox;

/// Read-only view of a planar region used by `sample::polygon`.
pub trait SampleRegion {
    /// Axis-aligned extent; `None` for an empty region.
    fn bounding_box(&self) -> Option<BoundingBox>;

    /// Strict-interior membership.
    fn contains_coord(&self, c: Coord<f64>) -> bool;

    /// Unsigned area, holes subtracted.
    fn area(&self) -> f64;

    /// `area / bbox_area`, the expected acceptance rate of bounding-box rejection.
    fn fill_ratio(&self) -> Option<f64> {
        let bbox = self.bounding_box()?;
        let bbox_area = bbox.area();
        if !(bbox_area.is_finite()) || bbox_area <= 0.0 {
            return None;
        }
        Some(self.area() / bbox_area)
    }
}

impl SampleRegion for Polygon<f64> {
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_rect().map(BoundingBox::from)
    }
    #[inline]
    fn contains_coord(&self, c: Coord<f64>) -> bool {
        self.contains(&Point::from(c))
    }
    fn area(&self) -> f64 {
        self.unsigned_area()
    }
}

impl SampleRegion for MultiPolygon<f64> {
    fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_rect().map(BoundingBox::from)
    }
    #[inline]
    fn contains_coord(&self, c: Coord<f64>) -> bool {
        let p = Point::from(c);
        self.0.iter().any(|poly| poly.contains(&p))
    }
    fn area(&self) -> f64 {
        self.unsigned_area()
    }
}
