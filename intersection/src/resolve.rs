use geom::{LonLat, PlanarOffset};

use crate::path::accumulate;
use crate::{LaneError, LaneIndex, LaneSpec, NodeListKind};

/// Reconstructs a lane's path in the planar frame of the intersection, in centimeters from the
/// reference point.
///
/// Computed lanes replay the nodes of their reference lane and shift every resulting point by the
/// same constant offset. A lane without any node list resolves to an empty path. Coordinates that
/// don't fit in 64 bits are an error for just this lane.
pub fn resolve_planar(lane: &LaneSpec, index: &LaneIndex) -> Result<Vec<PlanarOffset>, LaneError> {
    let overflow = LaneError::Overflow { lane: lane.id };
    match lane.node_list {
        None => Ok(Vec::new()),
        Some(NodeListKind::Direct(ref nodes)) => accumulate(nodes).ok_or(overflow),
        Some(NodeListKind::Computed(computed)) => {
            let reference =
                index
                    .get(computed.reference_lane)
                    .ok_or(LaneError::MissingReferenceLane {
                        lane: lane.id,
                        reference: computed.reference_lane,
                    })?;
            let nodes = match reference.node_list {
                Some(NodeListKind::Direct(ref nodes)) => nodes,
                _ => {
                    return Err(LaneError::ReferenceWithoutNodes {
                        lane: lane.id,
                        reference: computed.reference_lane,
                    });
                }
            };
            accumulate(nodes)
                .and_then(|pts| {
                    pts.into_iter()
                        .map(|pt| pt.checked_add(computed.offset))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or(overflow)
        }
    }
}

/// Reconstructs a lane's path in GPS coordinates.
pub fn resolve_lane(
    lane: &LaneSpec,
    index: &LaneIndex,
    ref_pt: LonLat,
) -> Result<Vec<LonLat>, LaneError> {
    Ok(resolve_planar(lane, index)?
        .into_iter()
        .map(|pt| ref_pt.offset_by(pt))
        .collect())
}
