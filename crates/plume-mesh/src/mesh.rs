//! The run mesh: sub-domain tiles in deterministic iteration order.

use indexmap::IndexMap;
use smallvec::SmallVec;

use plume_core::{BoundingBox, DomainMetadata, Link, SubDomainId};

use crate::error::MeshError;
use crate::polygon::Polygon;

/// One mesh tile: a boundary polygon and the traffic links inside it.
#[derive(Clone, Debug)]
pub struct SubDomain {
    /// Boundary of the tile.
    pub boundary: Polygon,
    /// Links inside the tile, endpoint order as stored in the metadata.
    ///
    /// Inline up to the 20-link cap the feature layout pads to.
    pub links: SmallVec<[Link; 20]>,
}

/// The set of tiles a run is processed over.
///
/// Tiles iterate in insertion order, which is the metadata store order
/// (or the single synthetic tile). Record emission order within a
/// timestamp follows this order, so it must be stable across runs on
/// the same metadata.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    tiles: IndexMap<SubDomainId, SubDomain>,
}

impl Mesh {
    /// Build a mesh from the metadata's sub-domain decomposition,
    /// restricted to the given selection.
    ///
    /// Sub-domains absent from `selection` are dropped; the surviving
    /// tiles keep the metadata's relative order. An empty result is not
    /// an error here — the caller decides whether to skip the run.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateBoundary`] if a selected
    /// sub-domain's boundary has fewer than three vertices.
    pub fn from_metadata(
        metadata: &DomainMetadata,
        selection: &[SubDomainId],
    ) -> Result<Self, MeshError> {
        let mut tiles = IndexMap::new();
        for (&id, spec) in &metadata.sub_domains {
            if !selection.contains(&id) {
                continue;
            }
            let boundary = Polygon::new(spec.boundary.clone()).ok_or_else(|| {
                MeshError::DegenerateBoundary {
                    sub_domain: id,
                    vertex_count: spec.boundary.len(),
                }
            })?;
            tiles.insert(
                id,
                SubDomain {
                    boundary,
                    links: spec.links.iter().copied().collect(),
                },
            );
        }
        Ok(Self { tiles })
    }

    /// Build a one-tile mesh covering the whole bounding box.
    ///
    /// The single tile gets ID 1 and carries all the given links.
    pub fn single_tile(
        bounding_box: &BoundingBox,
        links: impl IntoIterator<Item = Link>,
    ) -> Self {
        let boundary = Polygon::new(bounding_box.boundary())
            .expect("bounding box outline always has four vertices");
        let mut tiles = IndexMap::new();
        tiles.insert(
            SubDomainId(1),
            SubDomain {
                boundary,
                links: links.into_iter().collect(),
            },
        );
        Self { tiles }
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the mesh has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile for a sub-domain, if selected.
    pub fn get(&self, id: SubDomainId) -> Option<&SubDomain> {
        self.tiles.get(&id)
    }

    /// Iterate tiles in deterministic mesh order.
    pub fn iter(&self) -> impl Iterator<Item = (SubDomainId, &SubDomain)> {
        self.tiles.iter().map(|(id, tile)| (*id, tile))
    }

    /// Sub-domain IDs in mesh order.
    pub fn ids(&self) -> impl Iterator<Item = SubDomainId> + '_ {
        self.tiles.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use plume_core::{LatLon, NodeId, SubDomainSpec};

    fn square(offset: f64) -> Vec<LatLon> {
        vec![
            LatLon::new(offset, 0.0),
            LatLon::new(offset, 1.0),
            LatLon::new(offset + 1.0, 1.0),
            LatLon::new(offset + 1.0, 0.0),
        ]
    }

    fn metadata() -> DomainMetadata {
        let mut sub_domains = IndexMap::new();
        sub_domains.insert(
            SubDomainId(6),
            SubDomainSpec {
                boundary: square(0.0),
                links: vec![Link::new(NodeId(2), NodeId(1))],
            },
        );
        sub_domains.insert(
            SubDomainId(7),
            SubDomainSpec {
                boundary: square(1.0),
                links: vec![],
            },
        );
        DomainMetadata {
            bounding_box: BoundingBox::new(LatLon::new(0.0, 0.0), LatLon::new(2.0, 1.0)),
            sub_domains,
            link_geometry: IndexMap::new(),
        }
    }

    #[test]
    fn selection_filters_and_keeps_store_order() {
        let meta = metadata();
        let mesh = Mesh::from_metadata(&meta, &[SubDomainId(7), SubDomainId(6)]).unwrap();
        let ids: Vec<SubDomainId> = mesh.ids().collect();
        // Store order wins, not selection order.
        assert_eq!(ids, [SubDomainId(6), SubDomainId(7)]);
    }

    #[test]
    fn unselected_sub_domains_are_dropped() {
        let mesh = Mesh::from_metadata(&metadata(), &[SubDomainId(7)]).unwrap();
        assert_eq!(mesh.len(), 1);
        assert!(mesh.get(SubDomainId(6)).is_none());
    }

    #[test]
    fn empty_selection_gives_empty_mesh() {
        let mesh = Mesh::from_metadata(&metadata(), &[]).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn degenerate_boundary_is_an_error() {
        let mut meta = metadata();
        meta.sub_domains[&SubDomainId(6)].boundary.truncate(2);
        let err = Mesh::from_metadata(&meta, &[SubDomainId(6)]).unwrap_err();
        assert_eq!(
            err,
            MeshError::DegenerateBoundary {
                sub_domain: SubDomainId(6),
                vertex_count: 2,
            }
        );
    }

    #[test]
    fn single_tile_covers_the_bounding_box() {
        let meta = metadata();
        let link = Link::new(NodeId(1), NodeId(2));
        let mesh = Mesh::single_tile(&meta.bounding_box, [link]);
        assert_eq!(mesh.len(), 1);
        let tile = mesh.get(SubDomainId(1)).unwrap();
        assert_eq!(tile.links.as_slice(), [link]);
        assert!(tile.boundary.contains(&LatLon::new(1.0, 0.5)));
    }
}
