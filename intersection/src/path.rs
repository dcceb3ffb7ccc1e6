use geom::PlanarOffset;

use crate::RawNode;

/// Replays a node list from the origin, returning the running position at every emitted node.
///
/// Every node's delta is added to the running sum. A node is only emitted if its delta is
/// nonzero or it carries attributes; a bare zero-delta node is a no-op that just doesn't show up.
/// Returns None if the running sum overflows.
pub fn accumulate(nodes: &[RawNode]) -> Option<Vec<PlanarOffset>> {
    let (_, pts) = nodes.iter().try_fold(
        (PlanarOffset::ZERO, Vec::with_capacity(nodes.len())),
        |(running, mut pts), node| {
            let delta = node.delta.delta();
            let running = running.checked_add(delta)?;
            if !delta.is_zero() || node.has_attributes() {
                pts.push(running);
            }
            Some((running, pts))
        },
    )?;
    Some(pts)
}
