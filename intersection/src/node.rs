use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use geom::PlanarOffset;

use crate::message::whole_number;

/// Which `NodeOffsetPointXY` choice carried a node's delta. The J2735 variants only differ in how
/// many bits encode the offset; the value itself is always centimeters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OffsetTag {
    NodeXY1,
    NodeXY2,
    NodeXY3,
    NodeXY4,
    NodeXY5,
    NodeXY6,
    /// Some other key that happened to hold an `{x, y}` object.
    Other(String),
}

impl OffsetTag {
    fn from_key(key: &str) -> OffsetTag {
        match key {
            "node-XY1" => OffsetTag::NodeXY1,
            "node-XY2" => OffsetTag::NodeXY2,
            "node-XY3" => OffsetTag::NodeXY3,
            "node-XY4" => OffsetTag::NodeXY4,
            "node-XY5" => OffsetTag::NodeXY5,
            "node-XY6" => OffsetTag::NodeXY6,
            x => OffsetTag::Other(x.to_string()),
        }
    }
}

/// The delta of one node, resolved from the sibling-key encoding into a single variant.
///
/// A delta container holds mutually exclusive keys, and at most one should carry an object with
/// numeric `x` and `y`. When malformed input has several, the first one in document order wins.
/// Keys without that shape (`node-LatLon`, `regional`, ...) are ignored. Offsets are whole
/// centimeters; `100.0` is accepted, but `100.5` or `"100"` doesn't count as numeric.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum NodeOffset {
    XY {
        tag: OffsetTag,
        delta: PlanarOffset,
    },
    /// Nothing held an `{x, y}` object, or there was no delta at all.
    #[default]
    Unresolved,
}

impl NodeOffset {
    /// The offset from the previous node, or zero if unresolved.
    pub fn delta(&self) -> PlanarOffset {
        match self {
            NodeOffset::XY { delta, .. } => *delta,
            NodeOffset::Unresolved => PlanarOffset::ZERO,
        }
    }

    fn from_pairs<'a, I: IntoIterator<Item = (&'a str, &'a Value)>>(pairs: I) -> NodeOffset {
        for (key, value) in pairs {
            if let Some(delta) = xy_pair(value) {
                return NodeOffset::XY {
                    tag: OffsetTag::from_key(key),
                    delta,
                };
            }
        }
        NodeOffset::Unresolved
    }
}

fn xy_pair(value: &Value) -> Option<PlanarOffset> {
    let obj = value.as_object()?;
    let x = whole_number(obj.get("x")?)?;
    let y = whole_number(obj.get("y")?)?;
    Some(PlanarOffset::new(x, y))
}

impl<'de> Deserialize<'de> for NodeOffset {
    fn deserialize<D>(d: D) -> Result<NodeOffset, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(NodeOffsetVisitor)
    }
}

struct NodeOffsetVisitor;

impl<'de> Visitor<'de> for NodeOffsetVisitor {
    type Value = NodeOffset;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a node offset choice, like {\"node-XY1\": {\"x\": 10, \"y\": -5}}")
    }

    fn visit_unit<E>(self) -> Result<NodeOffset, E>
    where
        E: de::Error,
    {
        Ok(NodeOffset::Unresolved)
    }

    fn visit_none<E>(self) -> Result<NodeOffset, E>
    where
        E: de::Error,
    {
        Ok(NodeOffset::Unresolved)
    }

    fn visit_map<A>(self, mut map: A) -> Result<NodeOffset, A::Error>
    where
        A: MapAccess<'de>,
    {
        // Drain every entry, even after a match
        let mut entries: Vec<(String, Value)> = Vec::new();
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(NodeOffset::from_pairs(
            entries.iter().map(|(k, v)| (k.as_str(), v)),
        ))
    }
}

/// One waypoint of a lane, as received.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub delta: NodeOffset,
    /// Only presence matters; `null` counts as absent.
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl RawNode {
    pub fn new(delta: PlanarOffset, attributes: Option<Value>) -> RawNode {
        RawNode {
            delta: NodeOffset::XY {
                tag: OffsetTag::NodeXY1,
                delta,
            },
            attributes,
        }
    }

    pub fn has_attributes(&self) -> bool {
        self.attributes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> NodeOffset {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_variant() {
        assert_eq!(
            parse(json!({"node-XY3": {"x": 120, "y": -45}})),
            NodeOffset::XY {
                tag: OffsetTag::NodeXY3,
                delta: PlanarOffset::new(120, -45)
            }
        );
    }

    #[test]
    fn unknown_keys_with_the_right_shape() {
        let offset = parse(json!({"node-XY7": {"x": 1, "y": 2}}));
        assert_eq!(
            offset,
            NodeOffset::XY {
                tag: OffsetTag::Other("node-XY7".to_string()),
                delta: PlanarOffset::new(1, 2)
            }
        );
    }

    #[test]
    fn first_match_wins() {
        // Parsed from text, so the keys keep their document order
        let offset: NodeOffset = serde_json::from_str(
            r#"{"node-XY6": {"x": 7, "y": 8}, "node-XY1": {"x": 1, "y": 2}}"#,
        )
        .unwrap();
        assert_eq!(offset.delta(), PlanarOffset::new(7, 8));

        // Non-matching keys before the match are skipped
        let offset: NodeOffset = serde_json::from_str(
            r#"{"node-LatLon": {"lon": 1, "lat": 2}, "regional": [], "node-XY2": {"x": -3, "y": 4}}"#,
        )
        .unwrap();
        assert_eq!(
            offset,
            NodeOffset::XY {
                tag: OffsetTag::NodeXY2,
                delta: PlanarOffset::new(-3, 4)
            }
        );
    }

    #[test]
    fn whole_float_offsets() {
        assert_eq!(
            parse(json!({"node-XY2": {"x": 100.0, "y": -25.0}})),
            NodeOffset::XY {
                tag: OffsetTag::NodeXY2,
                delta: PlanarOffset::new(100, -25)
            }
        );
    }

    #[test]
    fn nothing_matches() {
        assert_eq!(parse(json!({})), NodeOffset::Unresolved);
        assert_eq!(parse(json!(null)), NodeOffset::Unresolved);
        assert_eq!(
            parse(json!({"node-XY1": {"x": 5}})),
            NodeOffset::Unresolved
        );
        assert_eq!(
            parse(json!({"node-XY1": {"x": "5", "y": "6"}})),
            NodeOffset::Unresolved
        );
        assert_eq!(
            parse(json!({"node-XY1": {"x": 100.5, "y": 0}})),
            NodeOffset::Unresolved
        );
        assert_eq!(NodeOffset::Unresolved.delta(), PlanarOffset::ZERO);
    }

    #[test]
    fn not_an_object() {
        assert!(serde_json::from_value::<NodeOffset>(json!(5)).is_err());
        assert!(serde_json::from_value::<NodeOffset>(json!([1, 2])).is_err());
    }

    #[test]
    fn raw_nodes() {
        let node: RawNode = serde_json::from_value(json!({
            "delta": {"node-XY1": {"x": 0, "y": 0}},
            "attributes": {"localNode": [{"stopLine": null}]}
        }))
        .unwrap();
        assert!(node.has_attributes());
        assert_eq!(node.delta.delta(), PlanarOffset::ZERO);

        let node: RawNode = serde_json::from_value(json!({"attributes": null})).unwrap();
        assert!(!node.has_attributes());
        assert_eq!(node.delta, NodeOffset::Unresolved);
    }
}
