use geom::{LonLat, PlanarOffset};
use intersection::{
    DecodeOptions, DropReason, LaneError, LaneID, LaneOutcome, LanePalette, DEFAULT_CATEGORY,
    LAYER_LANE_LINES, LAYER_LANE_POINTS, LAYER_REF_POINT,
};
use tests::decode_input;

fn ref_pt() -> LonLat {
    LonLat::from_fixed_point(371994080, 1268316950)
}

#[test]
fn test_simple_direct_lane() {
    let decoded = decode_input("simple_direct", &DecodeOptions::default()).unwrap();

    assert_eq!(decoded.lane_features.len(), 1);
    let lane = &decoded.lane_features[0];
    assert_eq!(lane.category, DEFAULT_CATEGORY);
    assert_eq!(lane.color, "#FFCC00");
    assert_eq!(
        lane.path,
        vec![
            ref_pt().offset_by(PlanarOffset::new(100, 0)),
            ref_pt().offset_by(PlanarOffset::new(100, 100)),
        ]
    );
    assert_eq!(
        decoded
            .point_features
            .iter()
            .map(|pt| (pt.lane_id, pt.index))
            .collect::<Vec<_>>(),
        vec![(LaneID(1), 0), (LaneID(1), 1)]
    );

    assert_eq!(decoded.reference_marker.label, "0_1");
    assert_eq!(decoded.summary.file_name, "simple_direct.json");
    assert_eq!(decoded.summary.msg_issue_revision, Some(1));
    assert_eq!(decoded.summary.speed_limit_display, "N/A");
}

#[test]
fn test_computed_lanes() {
    let decoded = decode_input("computed_lanes", &DecodeOptions::default()).unwrap();

    let summary = &decoded.summary;
    assert_eq!(summary.layer_type.as_deref(), Some("intersectionData"));
    assert_eq!(summary.msg_issue_revision, Some(3));
    assert_eq!(summary.timestamp, Some(482310));
    assert_eq!(summary.id, Some(1205));
    assert_eq!(summary.region, Some(0));
    assert_eq!(summary.revision, Some(2));
    assert_eq!(summary.lane_set_count, 3);
    assert_eq!(summary.ref_point, ref_pt());
    assert_eq!(summary.speed_limit_display, "50.0 km/h");
    assert_eq!(decoded.reference_marker.label, "0_1205");

    let lanes = &decoded.lane_features;
    assert_eq!(
        lanes.iter().map(|l| l.lane_id).collect::<Vec<_>>(),
        vec![LaneID(1), LaneID(2), LaneID(3)]
    );

    // The zero delta without attributes doesn't produce a point, but the one with does
    assert_eq!(lanes[0].path.len(), 3);
    assert_eq!(lanes[0].category, "general, bus");
    assert_eq!(lanes[0].color, "#0088FF");
    assert_eq!(lanes[0].name.as_deref(), Some("eastbound through"));
    assert_eq!(lanes[0].maneuvers.as_deref(), Some("8000"));

    // The computed lane follows lane 1, shifted 3.5m south
    assert_eq!(
        lanes[1].path,
        vec![
            ref_pt().offset_by(PlanarOffset::new(-1500, -525)),
            ref_pt().offset_by(PlanarOffset::new(-3500, -525)),
            ref_pt().offset_by(PlanarOffset::new(-6000, -515)),
        ]
    );
    assert_eq!(lanes[1].category, DEFAULT_CATEGORY);
    assert!(lanes[1].is_ingress);

    assert_eq!(lanes[2].category, "freight");
    assert_eq!(lanes[2].color, "#FF5500");
    assert!((lanes[2].length_meters() - 45.0).abs() < 0.1);

    assert_eq!(decoded.point_features.len(), 8);
    assert_eq!(decoded.report.num_emitted(), 3);
    assert!(decoded.report.errors().is_empty());
}

#[test]
fn test_broken_lanes_dont_stop_decoding() {
    let decoded = decode_input("broken_lanes", &DecodeOptions::default()).unwrap();
    let report = &decoded.report;

    assert_eq!(report.outcomes.len(), 9);
    assert_eq!(
        report.outcomes[0],
        LaneOutcome::Emitted {
            lane: LaneID(1),
            points: 2
        }
    );
    assert_eq!(
        report.outcomes[1],
        LaneOutcome::Failed(LaneError::MissingReferenceLane {
            lane: LaneID(2),
            reference: LaneID(40)
        })
    );
    assert!(matches!(
        report.outcomes[2],
        LaneOutcome::Failed(LaneError::Malformed {
            lane: Some(LaneID(3)),
            ..
        })
    ));
    assert_eq!(
        report.outcomes[3],
        LaneOutcome::Dropped {
            lane: LaneID(4),
            reason: DropReason::TooFewPoints(1)
        }
    );
    assert_eq!(
        report.outcomes[4],
        LaneOutcome::Dropped {
            lane: LaneID(5),
            reason: DropReason::TooFewPoints(0)
        }
    );
    assert_eq!(
        report.outcomes[5],
        LaneOutcome::Dropped {
            lane: LaneID(6),
            reason: DropReason::NoNodes
        }
    );
    assert_eq!(report.num_emitted(), 4);
    assert_eq!(report.num_dropped(), 3);
    assert_eq!(report.errors().len(), 2);

    // Lane 7 is computed from the first lane with ID 1
    let origin = LonLat::from_fixed_point(473000000, -1223000000);
    let lane7 = decoded
        .lane_features
        .iter()
        .find(|l| l.lane_id == LaneID(7))
        .unwrap();
    assert_eq!(
        lane7.path,
        vec![
            origin.offset_by(PlanarOffset::new(200, 300)),
            origin.offset_by(PlanarOffset::new(400, 300)),
        ]
    );

    // An unparseable vehicle type falls back to the default
    let lane8 = decoded.lane_features.last().unwrap();
    assert_eq!(lane8.lane_id, LaneID(8));
    assert_eq!(lane8.category, DEFAULT_CATEGORY);

    assert_eq!(decoded.reference_marker.label, "77");
    assert_eq!(decoded.summary.lane_set_count, 9);
}

#[test]
fn test_structural_errors() {
    assert!(decode_input("no_ref_point", &DecodeOptions::default()).is_err());
    assert!(decode_input("not_map_data", &DecodeOptions::default()).is_err());

    let opts = DecodeOptions {
        intersection_idx: 1,
        ..Default::default()
    };
    assert!(decode_input("simple_direct", &opts).is_err());
}

#[test]
fn test_decoding_twice_is_identical() {
    for name in ["simple_direct", "computed_lanes", "broken_lanes"] {
        let first = decode_input(name, &DecodeOptions::default()).unwrap();
        let second = decode_input(name, &DecodeOptions::default()).unwrap();
        assert_eq!(first, second, "decoding {} twice differed", name);
    }
}

#[test]
fn test_custom_palette() {
    let opts = DecodeOptions {
        palette: LanePalette {
            ingress: "#00FF00".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    let decoded = decode_input("computed_lanes", &opts).unwrap();
    assert_eq!(decoded.lane_features[0].color, "#00FF00");
    assert_eq!(decoded.lane_features[2].color, "#FF5500");
    assert!(decoded
        .point_features
        .iter()
        .filter(|pt| pt.lane_id == LaneID(2))
        .all(|pt| pt.color == "#00FF00"));
}

#[test]
fn test_geojson_export() {
    let decoded = decode_input("computed_lanes", &DecodeOptions::default()).unwrap();
    let collection = decoded.to_geojson();
    assert_eq!(collection.features.len(), 1 + 3 + 8);

    let count = |layer: &str| {
        collection
            .features
            .iter()
            .filter(|f| f.property("layer").and_then(|x| x.as_str()) == Some(layer))
            .count()
    };
    assert_eq!(count(LAYER_REF_POINT), 1);
    assert_eq!(count(LAYER_LANE_LINES), 3);
    assert_eq!(count(LAYER_LANE_POINTS), 8);

    let text = decoded.to_geojson_string();
    let parsed: geojson::GeoJson = text.parse().unwrap();
    match parsed {
        geojson::GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 12),
        x => panic!("expected a FeatureCollection, got {:?}", x),
    }
}
