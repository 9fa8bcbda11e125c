//! Geographic primitives: points, links, link geometry, bounding boxes.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::id::NodeId;

/// A `(lat, lon)` point in degrees.
///
/// Equality and hashing use the exact bit patterns of the coordinates,
/// so a `LatLon` can key estimate maps the way the raw coordinate pairs
/// key the upstream store. [`total_cmp`](LatLon::total_cmp) gives the
/// total `(lat, lon)` order used to fix receptor ordering.
#[derive(Clone, Copy, Debug)]
pub struct LatLon {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLon {
    /// Create a point from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// The coordinates as a `[lat, lon]` array.
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }

    /// Total order by `(lat, lon)`, using `f64::total_cmp` per axis.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.lat
            .total_cmp(&other.lat)
            .then(self.lon.total_cmp(&other.lon))
    }
}

impl PartialEq for LatLon {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for LatLon {}

impl Hash for LatLon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A traffic-network edge between two nodes.
///
/// The stored endpoint order is whatever the domain metadata carries:
/// geometry lookups use this original orientation, while traffic-volume
/// series key by the [`canonical`](Link::canonical) sorted form. Both
/// refer to the same physical link, so the assembler resolves each link
/// through both keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    /// First endpoint as stored.
    pub a: NodeId,
    /// Second endpoint as stored.
    pub b: NodeId,
}

impl Link {
    /// Create a link between two endpoints, preserving their order.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    /// The canonical form: endpoints sorted ascending.
    pub fn canonical(self) -> Self {
        if self.b < self.a {
            Link {
                a: self.b,
                b: self.a,
            }
        } else {
            self
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// Start and end coordinates of a link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkGeometry {
    /// Coordinate of the link's start node.
    pub start: LatLon,
    /// Coordinate of the link's end node.
    pub end: LatLon,
}

/// Axis-aligned geographic bounding box of the modeled area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// South-west corner (minimum latitude and longitude).
    pub south_west: LatLon,
    /// North-east corner (maximum latitude and longitude).
    pub north_east: LatLon,
}

impl BoundingBox {
    /// Create a box from two opposite corners.
    pub fn new(south_west: LatLon, north_east: LatLon) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// The corner coordinates the coordinate statistic is computed over.
    pub fn corners(&self) -> [LatLon; 2] {
        [self.south_west, self.north_east]
    }

    /// The box outline as a closed rectangle, counter-clockwise.
    ///
    /// Used as the tile boundary when the whole area is treated as a
    /// single-tile mesh.
    pub fn boundary(&self) -> Vec<LatLon> {
        vec![
            self.south_west,
            LatLon::new(self.south_west.lat, self.north_east.lon),
            self.north_east,
            LatLon::new(self.north_east.lat, self.south_west.lon),
        ]
    }
}
