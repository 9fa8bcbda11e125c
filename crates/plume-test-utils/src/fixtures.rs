//! Canonical fixture data for pipeline tests.

use indexmap::IndexMap;

use plume_core::{
    BoundingBox, DomainMetadata, LatLon, Link, LinkGeometry, NodeId, SubDomainId, SubDomainSpec,
    WeatherSample,
};

/// The link used by the canonical one-tile fixture, stored in reversed
/// (non-canonical) endpoint order.
pub fn fixture_link() -> Link {
    Link::new(NodeId(2), NodeId(1))
}

/// The receptor inside the canonical one-tile fixture.
pub fn fixture_receptor() -> LatLon {
    LatLon::new(1.0, 1.0)
}

/// A plain weather sample.
pub fn weather_sample() -> WeatherSample {
    WeatherSample {
        wind_dir: 10.0,
        wind_speed: 2.0,
        wind_dir_std: 0.5,
        temperature: 15.0,
    }
}

/// Metadata with a single sub-domain (ID 6) spanning a 2×2 square,
/// holding [`fixture_link`] with geometry inside the square.
pub fn one_tile_metadata() -> DomainMetadata {
    let link = fixture_link();
    let mut sub_domains = IndexMap::new();
    sub_domains.insert(
        SubDomainId(6),
        SubDomainSpec {
            boundary: vec![
                LatLon::new(0.0, 0.0),
                LatLon::new(0.0, 2.0),
                LatLon::new(2.0, 2.0),
                LatLon::new(2.0, 0.0),
            ],
            links: vec![link],
        },
    );
    let mut link_geometry = IndexMap::new();
    link_geometry.insert(
        link,
        LinkGeometry {
            start: LatLon::new(0.5, 0.5),
            end: LatLon::new(1.5, 1.5),
        },
    );
    DomainMetadata {
        bounding_box: BoundingBox::new(LatLon::new(0.0, 0.0), LatLon::new(2.0, 2.0)),
        sub_domains,
        link_geometry,
    }
}
