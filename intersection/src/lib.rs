//! Reconstructs the lanes of an intersection from a decoded J2735 MAP message.
//!
//! A MAP message describes each lane as a list of node offsets in centimeters, each relative to the
//! previous node, starting from the intersection's reference point. Some lanes don't list their
//! own nodes and instead copy another lane's path, shifted by a constant offset. This crate
//! resolves all of that into GPS paths, classifies every lane, and can export the result as
//! GeoJSON.
//!
//! Decoding is pure: everything comes from the message and `DecodeOptions`, nothing touches the
//! filesystem, and decoding the same message twice produces the same output.

#[macro_use]
extern crate log;

use anyhow::Result;
use serde_json::Value;

pub use crate::assemble::{
    assemble, assemble_lanes, DecodedIntersection, DropReason, LaneFeature, LaneGeometry,
    LaneOutcome, LaneReport, PointFeature, ReferenceMarker, Summary,
};
pub use crate::classify::{
    classify, describe_vehicle_types, parse_hex_mask, vehicle_type_labels, LaneClass,
    LaneDirection, DEFAULT_CATEGORY,
};
pub use crate::export::{LAYER_LANE_LINES, LAYER_LANE_POINTS, LAYER_REF_POINT};
pub use crate::lane::{ComputedLane, LaneError, LaneID, LaneIndex, LaneSet, LaneSpec, NodeListKind};
pub use crate::message::{IntersectionGeometry, IntersectionReferenceID, MapData, Position3D};
pub use crate::node::{NodeOffset, OffsetTag, RawNode};
pub use crate::options::{DecodeOptions, LanePalette};
pub use crate::path::accumulate;
pub use crate::resolve::{resolve_lane, resolve_planar};

mod assemble;
mod classify;
mod export;
mod lane;
mod message;
mod node;
mod options;
mod path;
mod resolve;

/// Decodes an already-parsed MAP message. `file_name` only shows up in the summary.
pub fn decode(message: &Value, file_name: &str, opts: &DecodeOptions) -> Result<DecodedIntersection> {
    let map_data = MapData::from_message(message)?;
    assemble(&map_data, file_name, opts)
}

/// Decodes a MAP message from JSON text.
pub fn decode_bytes(
    bytes: &[u8],
    file_name: &str,
    opts: &DecodeOptions,
) -> Result<DecodedIntersection> {
    let map_data = MapData::from_json_bytes(bytes)?;
    assemble(&map_data, file_name, opts)
}
