use anyhow::Result;
use serde::Serialize;

use geom::{speed_to_kmh, LonLat};

use crate::classify::classify;
use crate::resolve::resolve_lane;
use crate::{DecodeOptions, LaneError, LaneID, LanePalette, LaneSet, LaneSpec, MapData};

/// A lane reconstructed in GPS coordinates, along with its attributes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneFeature {
    pub lane_id: LaneID,
    pub name: Option<String>,
    pub category: String,
    pub is_ingress: bool,
    pub is_egress: bool,
    pub color: String,
    pub maneuvers: Option<String>,
    /// Always has at least 2 points.
    pub path: Vec<LonLat>,
}

impl LaneFeature {
    pub fn length_meters(&self) -> f64 {
        LonLat::path_length_meters(&self.path)
    }

    pub fn description(&self) -> String {
        format!(
            "Lane ID: {}, name: {}, type: {}",
            self.lane_id.0,
            self.name.as_deref().unwrap_or("none"),
            self.category
        )
    }
}

/// One vertex of a lane's path.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointFeature {
    pub lane_id: LaneID,
    pub lane_name: Option<String>,
    /// Position within the lane's path, starting at 0.
    pub index: usize,
    pub color: String,
    pub pt: LonLat,
}

impl PointFeature {
    pub fn description(&self) -> String {
        format!("Lane ID: {} - Point [{}]", self.lane_id.0, self.index)
    }
}

/// Marks the intersection's reference point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceMarker {
    pub pt: LonLat,
    pub label: String,
    pub description: String,
}

/// Metadata about the decoded message, for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub file_name: String,
    pub layer_type: Option<String>,
    pub msg_issue_revision: Option<i64>,
    pub timestamp: Option<i64>,
    pub id: Option<i64>,
    pub region: Option<i64>,
    pub lane_set_count: usize,
    pub ref_point: LonLat,
    pub revision: Option<i64>,
    pub speed_limit_display: String,
}

/// Why a lane was left out, even though nothing was wrong with it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum DropReason {
    /// The lane has neither direct nor computed nodes.
    NoNodes,
    /// The path had fewer than 2 points.
    TooFewPoints(usize),
}

/// What happened to one lane of the input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LaneOutcome {
    Emitted { lane: LaneID, points: usize },
    Dropped { lane: LaneID, reason: DropReason },
    Failed(LaneError),
}

/// One outcome per input lane, in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LaneReport {
    pub outcomes: Vec<LaneOutcome>,
}

impl LaneReport {
    pub fn num_emitted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|x| matches!(x, LaneOutcome::Emitted { .. }))
            .count()
    }

    pub fn num_dropped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|x| matches!(x, LaneOutcome::Dropped { .. }))
            .count()
    }

    pub fn errors(&self) -> Vec<&LaneError> {
        self.outcomes
            .iter()
            .filter_map(|x| match x {
                LaneOutcome::Failed(err) => Some(err),
                _ => None,
            })
            .collect()
    }
}

/// The geometry and attributes of every usable lane.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneGeometry {
    pub lane_features: Vec<LaneFeature>,
    pub point_features: Vec<PointFeature>,
    pub report: LaneReport,
}

/// Everything decoded from one MAP message. Each decode produces a fresh one; nothing carries
/// over from previous messages.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedIntersection {
    pub reference_marker: ReferenceMarker,
    pub lane_features: Vec<LaneFeature>,
    pub point_features: Vec<PointFeature>,
    pub summary: Summary,
    pub report: LaneReport,
}

/// Resolves and classifies every lane, in input order. Lanes that fail are reported and skipped;
/// lanes with fewer than 2 points are silently dropped.
pub fn assemble_lanes(lanes: &LaneSet, ref_pt: LonLat, palette: &LanePalette) -> LaneGeometry {
    let index = lanes.index();
    let mut result = LaneGeometry::default();

    for entry in lanes.entries() {
        let outcome = match entry {
            Ok(lane) => match resolve_lane(lane, &index, ref_pt) {
                Ok(path) => assemble_lane(lane, path, palette, &mut result),
                Err(err) => LaneOutcome::Failed(err),
            },
            Err(err) => LaneOutcome::Failed(err.clone()),
        };
        match &outcome {
            LaneOutcome::Failed(err) => {
                warn!("Skipping lane: {}", err);
            }
            LaneOutcome::Dropped { lane, reason } => {
                debug!("Dropping {}: {:?}", lane, reason);
            }
            LaneOutcome::Emitted { .. } => {}
        }
        result.report.outcomes.push(outcome);
    }

    result
}

fn assemble_lane(
    lane: &LaneSpec,
    path: Vec<LonLat>,
    palette: &LanePalette,
    result: &mut LaneGeometry,
) -> LaneOutcome {
    if lane.node_list.is_none() {
        return LaneOutcome::Dropped {
            lane: lane.id,
            reason: DropReason::NoNodes,
        };
    }
    if path.len() < 2 {
        return LaneOutcome::Dropped {
            lane: lane.id,
            reason: DropReason::TooFewPoints(path.len()),
        };
    }

    let class = classify(lane, palette);
    for (index, pt) in path.iter().enumerate() {
        result.point_features.push(PointFeature {
            lane_id: lane.id,
            lane_name: lane.name.clone(),
            index,
            color: class.color.clone(),
            pt: *pt,
        });
    }
    let points = path.len();
    result.lane_features.push(LaneFeature {
        lane_id: lane.id,
        name: lane.name.clone(),
        category: class.category,
        is_ingress: lane.is_ingress,
        is_egress: lane.is_egress,
        color: class.color,
        maneuvers: lane.maneuvers.clone(),
        path,
    });
    LaneOutcome::Emitted {
        lane: lane.id,
        points,
    }
}

/// Decodes one intersection of a MAP message. Structural problems with the message fail the whole
/// decode; problems with individual lanes only show up in the report.
pub fn assemble(
    map_data: &MapData,
    file_name: &str,
    opts: &DecodeOptions,
) -> Result<DecodedIntersection> {
    let intersection = map_data.intersection(opts.intersection_idx)?;
    let ref_pt = intersection.ref_point()?;

    let lanes = LaneSet::from_json(intersection.lanes());
    let geometry = assemble_lanes(&lanes, ref_pt, &opts.palette);

    let label = intersection
        .id
        .map(|id| id.label())
        .unwrap_or_else(|| "unknown".to_string());
    let reference_marker = ReferenceMarker {
        pt: ref_pt,
        description: match intersection.id {
            Some(id) => format!(
                "Intersection reference point ID: {}, region: {}",
                id.id,
                id.region
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string())
            ),
            None => "Intersection reference point".to_string(),
        },
        label,
    };

    let summary = Summary {
        file_name: file_name.to_string(),
        layer_type: map_data.layer_type_name(),
        msg_issue_revision: map_data.msg_issue_revision,
        timestamp: map_data.time_stamp,
        id: intersection.id.map(|id| id.id),
        region: intersection.id.and_then(|id| id.region),
        lane_set_count: lanes.len(),
        ref_point: ref_pt,
        revision: intersection.revision,
        speed_limit_display: speed_to_kmh(intersection.speed_limit_code()),
    };

    info!(
        "Decoded {} ({}): {} of {} lanes, {} points, {} failed",
        file_name,
        reference_marker.label,
        geometry.report.num_emitted(),
        lanes.len(),
        geometry.point_features.len(),
        geometry.report.errors().len()
    );

    Ok(DecodedIntersection {
        reference_marker,
        lane_features: geometry.lane_features,
        point_features: geometry.point_features,
        summary,
        report: geometry.report,
    })
}
