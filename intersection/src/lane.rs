use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use geom::PlanarOffset;

use crate::RawNode;

/// A lane is identified by its `laneID`, unique within one intersection's lane set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneID(pub i32);

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane #{}", self.0)
    }
}

/// How a lane's waypoints are encoded.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeListKind {
    /// The lane's own nodes, each a delta from the previous one.
    Direct(Vec<RawNode>),
    /// Another lane's path, shifted by a constant offset.
    Computed(ComputedLane),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputedLane {
    pub reference_lane: LaneID,
    /// Added to every point of the reference lane's path.
    pub offset: PlanarOffset,
}

/// One lane of an intersection, as far as geometry and classification are concerned.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneSpec {
    pub id: LaneID,
    pub name: Option<String>,
    pub is_ingress: bool,
    pub is_egress: bool,
    /// The vehicle type bitmask as received, in hexadecimal. Parsed by the classifier.
    pub vehicle_type: Option<String>,
    /// Display only.
    pub maneuvers: Option<String>,
    /// None when the lane has neither direct nor computed nodes.
    pub node_list: Option<NodeListKind>,
}

impl LaneSpec {
    /// A lane with nothing but nodes, mostly useful for tests.
    pub fn direct(id: i32, nodes: Vec<RawNode>) -> LaneSpec {
        LaneSpec {
            id: LaneID(id),
            name: None,
            is_ingress: false,
            is_egress: false,
            vehicle_type: None,
            maneuvers: None,
            node_list: Some(NodeListKind::Direct(nodes)),
        }
    }

    pub fn computed(id: i32, reference_lane: i32, offset: PlanarOffset) -> LaneSpec {
        LaneSpec {
            node_list: Some(NodeListKind::Computed(ComputedLane {
                reference_lane: LaneID(reference_lane),
                offset,
            })),
            ..LaneSpec::direct(id, Vec::new())
        }
    }

    /// Parses one entry of a J2735 `laneSet`.
    pub fn from_json(value: &Value) -> Result<LaneSpec, LaneError> {
        let raw = RawLane::deserialize(value).map_err(|err| LaneError::Malformed {
            lane: value
                .get("laneID")
                .and_then(Value::as_i64)
                .and_then(|id| i32::try_from(id).ok())
                .map(LaneID),
            reason: err.to_string(),
        })?;
        Ok(raw.into_spec())
    }

    /// The vehicle type bitmask, if present and parseable.
    pub fn vehicle_type_mask(&self) -> Option<u32> {
        self.vehicle_type
            .as_ref()
            .and_then(|text| crate::classify::parse_hex_mask(text))
    }
}

/// Why a single lane couldn't be resolved. These never abort decoding the rest of the lane set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LaneError {
    /// The lane record itself doesn't have the expected shape.
    Malformed {
        lane: Option<LaneID>,
        reason: String,
    },
    /// A computed lane refers to a lane that isn't in the same lane set.
    MissingReferenceLane { lane: LaneID, reference: LaneID },
    /// A computed lane refers to a lane that isn't defined by its own nodes.
    ReferenceWithoutNodes { lane: LaneID, reference: LaneID },
    /// The lane's coordinates don't fit in 64 bits.
    Overflow { lane: LaneID },
}

impl LaneError {
    pub fn lane(&self) -> Option<LaneID> {
        match self {
            LaneError::Malformed { lane, .. } => *lane,
            LaneError::MissingReferenceLane { lane, .. }
            | LaneError::ReferenceWithoutNodes { lane, .. }
            | LaneError::Overflow { lane } => Some(*lane),
        }
    }
}

impl fmt::Display for LaneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LaneError::Malformed {
                lane: Some(lane),
                reason,
            } => write!(f, "{} is malformed: {}", lane, reason),
            LaneError::Malformed { lane: None, reason } => {
                write!(f, "lane without a usable laneID is malformed: {}", reason)
            }
            LaneError::MissingReferenceLane { lane, reference } => write!(
                f,
                "{} is computed from {}, which isn't in the lane set",
                lane, reference
            ),
            LaneError::ReferenceWithoutNodes { lane, reference } => write!(
                f,
                "{} is computed from {}, which doesn't have its own nodes",
                lane, reference
            ),
            LaneError::Overflow { lane } => {
                write!(f, "{} has coordinates too large to add up", lane)
            }
        }
    }
}

impl std::error::Error for LaneError {}

/// All lanes of one intersection, in input order. Lanes that failed to parse keep their slot, so
/// reporting stays in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneSet {
    entries: Vec<Result<LaneSpec, LaneError>>,
}

impl LaneSet {
    pub fn from_json(values: &[Value]) -> LaneSet {
        LaneSet {
            entries: values.iter().map(LaneSpec::from_json).collect(),
        }
    }

    pub fn from_lanes(lanes: Vec<LaneSpec>) -> LaneSet {
        LaneSet {
            entries: lanes.into_iter().map(Ok).collect(),
        }
    }

    pub fn entries(&self) -> &[Result<LaneSpec, LaneError>] {
        &self.entries
    }

    /// Only the lanes that parsed.
    pub fn lanes(&self) -> impl Iterator<Item = &LaneSpec> {
        self.entries.iter().filter_map(|entry| entry.as_ref().ok())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> LaneIndex {
        LaneIndex::new(self.lanes())
    }
}

/// Looks up lanes by ID, for resolving computed lanes. If an ID is duplicated, the first lane
/// with it wins.
pub struct LaneIndex<'a> {
    lanes: HashMap<LaneID, &'a LaneSpec>,
}

impl<'a> LaneIndex<'a> {
    pub fn new<I: IntoIterator<Item = &'a LaneSpec>>(lanes: I) -> LaneIndex<'a> {
        let mut index = HashMap::new();
        for lane in lanes {
            index.entry(lane.id).or_insert(lane);
        }
        LaneIndex { lanes: index }
    }

    pub fn get(&self, id: LaneID) -> Option<&'a LaneSpec> {
        self.lanes.get(&id).copied()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLane {
    #[serde(rename = "laneID")]
    lane_id: i32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    ingress_approach: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    egress_approach: Option<Value>,
    #[serde(default)]
    lane_attributes: Option<RawLaneAttributes>,
    #[serde(default)]
    maneuvers: Option<Value>,
    #[serde(default)]
    node_list: Option<RawNodeList>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLaneAttributes {
    #[serde(default)]
    lane_type: Option<Value>,
}

#[derive(Deserialize)]
struct RawNodeList {
    #[serde(default)]
    nodes: Option<Vec<RawNode>>,
    #[serde(default)]
    computed: Option<RawComputed>,
}

#[derive(Deserialize)]
struct RawComputed {
    #[serde(default, rename = "referenceLaneId")]
    reference_lane_id: Option<i32>,
    #[serde(default, rename = "offsetXaxis")]
    offset_x_axis: Option<RawOffsetAxis>,
    #[serde(default, rename = "offsetYaxis")]
    offset_y_axis: Option<RawOffsetAxis>,
}

/// `OffsetXaxis` and `OffsetYaxis` are a choice between a small and a large encoding.
#[derive(Deserialize)]
struct RawOffsetAxis {
    #[serde(default)]
    small: Option<i64>,
    #[serde(default)]
    large: Option<i64>,
}

impl RawOffsetAxis {
    fn value(axis: Option<RawOffsetAxis>) -> i64 {
        axis.and_then(|axis| axis.small.or(axis.large)).unwrap_or(0)
    }
}

/// An optional field that counts as set when the key is present, even if its value is `null`.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

impl RawLane {
    fn into_spec(self) -> LaneSpec {
        let vehicle_type = self
            .lane_attributes
            .and_then(|attribs| attribs.lane_type)
            .and_then(|lane_type| lane_type.get("vehicle").and_then(bitstring_text));

        // Direct nodes take precedence if both are somehow present
        let node_list = self.node_list.and_then(|list| match (list.nodes, list.computed) {
            (Some(nodes), _) => Some(NodeListKind::Direct(nodes)),
            (None, Some(computed)) => computed.reference_lane_id.map(|id| {
                NodeListKind::Computed(ComputedLane {
                    reference_lane: LaneID(id),
                    offset: PlanarOffset::new(
                        RawOffsetAxis::value(computed.offset_x_axis),
                        RawOffsetAxis::value(computed.offset_y_axis),
                    ),
                })
            }),
            (None, None) => None,
        });

        LaneSpec {
            id: LaneID(self.lane_id),
            name: self.name,
            is_ingress: self.ingress_approach.is_some(),
            is_egress: self.egress_approach.is_some(),
            vehicle_type,
            maneuvers: self.maneuvers.as_ref().and_then(bitstring_text),
            node_list,
        }
    }
}

/// Bit strings show up either as a bare string or as `{"value": "...", "length": n}`.
fn bitstring_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(obj) => match obj.get("value") {
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        },
        Value::Null => None,
        x => Some(x.to_string()),
    }
}
