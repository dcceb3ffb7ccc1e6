use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use geom::LonLat;

use crate::{DecodedIntersection, LaneFeature, PointFeature, ReferenceMarker};

/// The `layer` property of each feature, so a renderer can split the collection apart again.
pub const LAYER_REF_POINT: &str = "ref-point";
pub const LAYER_LANE_LINES: &str = "lane-lines";
pub const LAYER_LANE_POINTS: &str = "lane-points";

impl DecodedIntersection {
    /// The reference marker, then every lane, then every lane point.
    pub fn to_geojson(&self) -> FeatureCollection {
        let mut features = vec![marker_feature(&self.reference_marker)];
        features.extend(self.lane_features.iter().map(lane_feature));
        features.extend(self.point_features.iter().map(point_feature));
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(&self) -> String {
        GeoJson::from(self.to_geojson()).to_string()
    }
}

fn new_feature(value: Value, layer: &str) -> Feature {
    let mut feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("layer", layer);
    feature
}

fn marker_feature(marker: &ReferenceMarker) -> Feature {
    let mut feature = new_feature(Value::from(&marker.pt.to_geo_point()), LAYER_REF_POINT);
    feature.set_property("name", marker.label.clone());
    feature.set_property("description", marker.description.clone());
    feature
}

fn lane_feature(lane: &LaneFeature) -> Feature {
    let mut feature = new_feature(
        Value::from(&LonLat::to_geo_line_string(&lane.path)),
        LAYER_LANE_LINES,
    );
    feature.set_property("id", lane.lane_id.0);
    feature.set_property("name", lane.name.clone().unwrap_or_default());
    feature.set_property("laneType", lane.category.clone());
    feature.set_property("isIngress", lane.is_ingress);
    feature.set_property("isEgress", lane.is_egress);
    feature.set_property("color", lane.color.clone());
    feature.set_property("maneuvers", lane.maneuvers.clone());
    feature.set_property("lengthMeters", lane.length_meters());
    feature.set_property("description", lane.description());
    feature
}

fn point_feature(pt: &PointFeature) -> Feature {
    let mut feature = new_feature(Value::from(&pt.pt.to_geo_point()), LAYER_LANE_POINTS);
    feature.set_property("laneID", pt.lane_id.0);
    feature.set_property("laneName", pt.lane_name.clone().unwrap_or_default());
    feature.set_property("pointIndex", pt.index);
    feature.set_property("color", pt.color.clone());
    feature.set_property("description", pt.description());
    feature
}
