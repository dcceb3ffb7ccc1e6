use serde::{Deserialize, Serialize};

use crate::{LanePalette, LaneSpec};

/// Used when a lane has no recognized vehicle type bits.
pub const DEFAULT_CATEGORY: &str = "general lane";

/// The vehicle type bits understood, in the order their labels are listed.
const VEHICLE_TYPES: [(u32, &str); 6] = [
    (0x01, "general"),
    (0x02, "taxi"),
    (0x04, "bus"),
    (0x08, "emergency"),
    (0x10, "high-occupancy"),
    (0x20, "freight"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    /// Leads into the intersection
    Ingress,
    /// Leads out of the intersection
    Egress,
    /// Internal or anything else
    Other,
}

impl LaneDirection {
    /// A lane marked as both ingress and egress counts as ingress.
    pub fn new(is_ingress: bool, is_egress: bool) -> LaneDirection {
        if is_ingress {
            LaneDirection::Ingress
        } else if is_egress {
            LaneDirection::Egress
        } else {
            LaneDirection::Other
        }
    }
}

/// Everything about a lane that isn't geometry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LaneClass {
    pub direction: LaneDirection,
    pub category: String,
    pub color: String,
}

pub fn classify(lane: &LaneSpec, palette: &LanePalette) -> LaneClass {
    let direction = LaneDirection::new(lane.is_ingress, lane.is_egress);

    let mask = lane.vehicle_type_mask();
    if let (None, Some(text)) = (mask, &lane.vehicle_type) {
        warn!("{} has an unparseable vehicle type {:?}", lane.id, text);
    }

    LaneClass {
        direction,
        category: describe_vehicle_types(mask.unwrap_or(0)),
        color: palette.color(direction).to_string(),
    }
}

/// Labels for every recognized bit of the mask, in bit order.
pub fn vehicle_type_labels(mask: u32) -> Vec<&'static str> {
    VEHICLE_TYPES
        .iter()
        .filter(|(bit, _)| mask & bit != 0)
        .map(|(_, label)| *label)
        .collect()
}

/// Comma-separated labels, or the default category if no recognized bit is set.
pub fn describe_vehicle_types(mask: u32) -> String {
    let labels = vehicle_type_labels(mask);
    if labels.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        labels.join(", ")
    }
}

/// Leniently parses hexadecimal: surrounding whitespace and a `0x` prefix are allowed, and
/// parsing stops at the first non-hex character. Returns None if there are no leading hex digits
/// or the value doesn't fit in 32 bits.
pub fn parse_hex_mask(text: &str) -> Option<u32> {
    let text = text.trim();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let end = text
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    u32::from_str_radix(&text[..end], 16).ok()
}
