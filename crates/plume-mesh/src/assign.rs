//! Receptor-to-tile assignment.

use indexmap::IndexMap;

use plume_core::{LatLon, SubDomainId};

use crate::mesh::Mesh;

/// Assign every receptor to every tile whose boundary contains it.
///
/// Membership is zero-or-more: no exclusivity is enforced, so a
/// receptor sitting on a shared tile boundary can appear in several
/// tiles' lists. Every tile gets an entry, possibly empty, and each
/// list is sorted ascending by `(lat, lon)` — this ordering fixes the
/// receptor-block layout of every feature vector built for the tile.
///
/// Recomputed once per run; two calls on the same inputs yield
/// identical orderings.
pub fn assign_receptors(
    mesh: &Mesh,
    receptors: &[LatLon],
) -> IndexMap<SubDomainId, Vec<LatLon>> {
    let mut assigned = IndexMap::new();
    for (id, tile) in mesh.iter() {
        let mut inside: Vec<LatLon> = receptors
            .iter()
            .filter(|receptor| tile.boundary.contains(receptor))
            .copied()
            .collect();
        inside.sort_by(|a, b| a.total_cmp(b));
        assigned.insert(id, inside);
    }
    assigned
}
