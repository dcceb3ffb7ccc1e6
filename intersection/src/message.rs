//! The parts of a decoded J2735 `MapData` message that matter here. Lanes are kept as raw JSON
//! until they're decoded one at a time, so that one broken lane doesn't prevent reading the rest.
//!
//! Only the requested intersection and its `refPoint` must be well-formed. Everything else is
//! metadata for display, so a value of the wrong type just reads as absent.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use geom::LonLat;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapData {
    #[serde(default)]
    pub layer_type: Option<Value>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub msg_issue_revision: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub time_stamp: Option<i64>,
    /// Each entry is only parsed when it's requested.
    #[serde(default)]
    pub intersections: Option<Vec<Value>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionGeometry {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<IntersectionReferenceID>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub revision: Option<i64>,
    #[serde(default)]
    pub ref_point: Option<Position3D>,
    #[serde(default, deserialize_with = "lenient")]
    pub speed_limits: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub lane_set: Option<Vec<Value>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionReferenceID {
    #[serde(default, deserialize_with = "lenient_number")]
    pub region: Option<i64>,
    pub id: i64,
}

impl IntersectionReferenceID {
    /// Like "3_1205", or just the ID when there's no region.
    pub fn label(&self) -> String {
        match self.region {
            Some(region) => format!("{}_{}", region, self.id),
            None => self.id.to_string(),
        }
    }
}

/// Latitude and longitude in 1/10 microdegrees. Elevation isn't used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Position3D {
    pub lat: i64,
    pub long: i64,
}

impl Position3D {
    pub fn to_lon_lat(self) -> LonLat {
        LonLat::from_fixed_point(self.lat, self.long)
    }
}

/// JSON numbers sometimes come through as floats. Accept them if they're whole.
pub(crate) fn whole_number(value: &Value) -> Option<i64> {
    if let Some(x) = value.as_i64() {
        return Some(x);
    }
    let x = value.as_f64()?;
    if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x as i64)
    } else {
        None
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(whole_number(&Value::deserialize(d)?))
}

fn lenient<'de, D: Deserializer<'de>, T: DeserializeOwned>(d: D) -> Result<Option<T>, D::Error> {
    Ok(T::deserialize(Value::deserialize(d)?).ok())
}

impl MapData {
    /// Extracts `MapData` from a decoded message. The message is usually `{"MapData": ...}`, but
    /// some tools wrap it once more as `{"value": {"MapData": ...}}`.
    pub fn from_message(message: &Value) -> Result<MapData> {
        let root = match message.get("value") {
            Some(inner) if inner.is_object() => inner,
            _ => message,
        };
        let raw = match root.get("MapData") {
            Some(raw) => raw,
            None => bail!("Invalid intersection data format: no MapData"),
        };
        MapData::deserialize(raw).context("Invalid intersection data format")
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<MapData> {
        let message: Value = serde_json::from_slice(bytes).context("MAP message isn't JSON")?;
        MapData::from_message(&message)
    }

    /// Parses one intersection. The others aren't looked at, even if they're malformed.
    pub fn intersection(&self, idx: usize) -> Result<IntersectionGeometry> {
        let intersections = match self.intersections {
            Some(ref list) if !list.is_empty() => list,
            _ => bail!("Invalid intersection data format: no intersections"),
        };
        match intersections.get(idx) {
            Some(raw) => IntersectionGeometry::deserialize(raw).with_context(|| {
                format!("Invalid intersection data format in intersection {}", idx)
            }),
            None => bail!(
                "Intersection {} requested, but the message only has {}",
                idx,
                intersections.len()
            ),
        }
    }

    /// `layerType` is an enumeration, usually rendered as its name.
    pub fn layer_type_name(&self) -> Option<String> {
        self.layer_type.as_ref().map(|value| match value {
            Value::String(name) => name.clone(),
            x => x.to_string(),
        })
    }
}

impl IntersectionGeometry {
    pub fn ref_point(&self) -> Result<LonLat> {
        match self.ref_point {
            Some(pos) => Ok(pos.to_lon_lat()),
            None => bail!("Intersection has no refPoint"),
        }
    }

    /// The first speed limit's raw code, if it's usable.
    pub fn speed_limit_code(&self) -> Option<i32> {
        self.speed_limits
            .as_ref()
            .and_then(|limits| limits.first())
            .and_then(|limit| limit.get("speed"))
            .and_then(whole_number)
            .and_then(|code| i32::try_from(code).ok())
    }

    pub fn lanes(&self) -> &[Value] {
        self.lane_set.as_deref().unwrap_or(&[])
    }
}
