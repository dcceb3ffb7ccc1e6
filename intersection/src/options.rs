use serde::{Deserialize, Serialize};
use structopt::StructOpt;

use crate::classify::LaneDirection;

/// Tunes how a MAP message is decoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, StructOpt)]
pub struct DecodeOptions {
    /// Which entry of `MapData.intersections` to decode. Almost every message has exactly one.
    #[structopt(long, default_value = "0")]
    #[serde(default)]
    pub intersection_idx: usize,
    /// Colors assigned to lanes. Not a flag; the CLI loads this from a JSON file.
    #[structopt(skip)]
    #[serde(default)]
    pub palette: LanePalette,
}

impl Default for DecodeOptions {
    fn default() -> DecodeOptions {
        DecodeOptions {
            intersection_idx: 0,
            palette: LanePalette::default(),
        }
    }
}

/// Hex colors for each kind of lane. Any omitted entry falls back to the default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanePalette {
    pub ingress: String,
    pub egress: String,
    pub other: String,
}

impl Default for LanePalette {
    fn default() -> LanePalette {
        LanePalette {
            ingress: "#0088FF".to_string(),
            egress: "#FF5500".to_string(),
            other: "#FFCC00".to_string(),
        }
    }
}

impl LanePalette {
    pub fn color(&self, direction: LaneDirection) -> &str {
        match direction {
            LaneDirection::Ingress => &self.ingress,
            LaneDirection::Egress => &self.egress,
            LaneDirection::Other => &self.other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_palette() {
        let palette: LanePalette = serde_json::from_str(r#"{"egress": "red"}"#).unwrap();
        assert_eq!(palette.egress, "red");
        assert_eq!(palette.ingress, "#0088FF");
        assert_eq!(palette.color(LaneDirection::Other), "#FFCC00");
    }

    #[test]
    fn empty_options() {
        let opts: DecodeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, DecodeOptions::default());
    }
}
