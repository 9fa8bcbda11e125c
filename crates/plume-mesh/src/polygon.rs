//! Boundary polygons and point containment.

use plume_core::LatLon;

/// A simple polygon given by its boundary vertices.
///
/// Vertices are stored in ring order (either winding); the closing edge
/// from the last vertex back to the first is implicit.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<LatLon>,
}

impl Polygon {
    /// Create a polygon from its boundary vertices.
    ///
    /// Returns `None` for fewer than three vertices — such a boundary
    /// encloses nothing.
    pub fn new(vertices: Vec<LatLon>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self { vertices })
    }

    /// The boundary vertices in ring order.
    pub fn vertices(&self) -> &[LatLon] {
        &self.vertices
    }

    /// Even-odd ray-casting containment test.
    ///
    /// Casts a ray in the +lat direction and counts boundary crossings.
    /// Points exactly on an edge may land on either side; receptors on
    /// a shared tile boundary are allowed to belong to both tiles.
    pub fn contains(&self, point: &LatLon) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let vi = &self.vertices[i];
            let vj = &self.vertices[j];
            if (vi.lon > point.lon) != (vj.lon > point.lon) {
                let crossing_lat =
                    (vj.lat - vi.lat) * (point.lon - vi.lon) / (vj.lon - vi.lon) + vi.lat;
                if point.lat < crossing_lat {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            LatLon::new(0.0, 0.0),
            LatLon::new(0.0, 1.0),
            LatLon::new(1.0, 1.0),
            LatLon::new(1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn too_few_vertices_is_rejected() {
        assert!(Polygon::new(vec![LatLon::new(0.0, 0.0), LatLon::new(1.0, 1.0)]).is_none());
    }

    #[test]
    fn square_contains_interior_point() {
        assert!(unit_square().contains(&LatLon::new(0.5, 0.5)));
    }

    #[test]
    fn square_excludes_exterior_points() {
        let square = unit_square();
        assert!(!square.contains(&LatLon::new(1.5, 0.5)));
        assert!(!square.contains(&LatLon::new(0.5, -0.1)));
        assert!(!square.contains(&LatLon::new(-2.0, -2.0)));
    }

    #[test]
    fn concave_polygon_notch_is_outside() {
        // L-shape: unit square with the top-right quadrant removed.
        let ell = Polygon::new(vec![
            LatLon::new(0.0, 0.0),
            LatLon::new(0.0, 1.0),
            LatLon::new(0.5, 1.0),
            LatLon::new(0.5, 0.5),
            LatLon::new(1.0, 0.5),
            LatLon::new(1.0, 0.0),
        ])
        .unwrap();
        assert!(ell.contains(&LatLon::new(0.25, 0.75)));
        assert!(!ell.contains(&LatLon::new(0.75, 0.75)));
        assert!(ell.contains(&LatLon::new(0.75, 0.25)));
    }

    proptest! {
        #[test]
        fn points_outside_bounding_rectangle_are_never_contained(
            lat in -10.0f64..10.0,
            lon in -10.0f64..10.0,
        ) {
            prop_assume!(!(0.0..=1.0).contains(&lat) || !(0.0..=1.0).contains(&lon));
            prop_assert!(!unit_square().contains(&LatLon::new(lat, lon)));
        }

        #[test]
        fn strict_interior_points_are_contained(
            lat in 0.01f64..0.99,
            lon in 0.01f64..0.99,
        ) {
            prop_assert!(unit_square().contains(&LatLon::new(lat, lon)));
        }
    }
}
