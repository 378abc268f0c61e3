use wx_boxchart::api::{
    DEFAULT_BAR_IMAGE, Graph, GraphConfig, GraphDefaults, KnownTitle, PlanSnapshot,
    TextOverrides,
};
use wx_boxchart::core::UnitMode;
use wx_boxchart::render::Fill;

#[test]
fn graph_config_json_roundtrip() {
    let config = GraphConfig::new(480, 240)
        .with_line_color("#333333")
        .with_unit_mode(UnitMode::FixedPoint)
        .with_time24(true)
        .with_negative_bars(true)
        .with_deferred(true);

    let json = config
        .to_json_pretty()
        .expect("config should serialize to json");
    let restored = GraphConfig::from_json_str(&json).expect("config should deserialize");
    assert_eq!(restored, config);
}

#[test]
fn missing_config_fields_take_defaults() {
    let config = GraphConfig::from_json_str(r#"{ "width": 320, "wind": true }"#)
        .expect("partial config should deserialize");

    assert_eq!(config.width, 320);
    assert_eq!(config.height, 0);
    assert!(config.wind);
    assert_eq!(config.line_color, "#000000");
    assert_eq!(config.unit_mode, UnitMode::Standard);
    assert!(!config.external);
}

#[test]
fn documented_defaults() {
    let defaults = GraphDefaults::default();

    assert_eq!(defaults.title_style.font, "Verdana,Arial,Helvetica");
    assert_eq!(defaults.title_style.size_px, 10);
    assert_eq!(defaults.axis_style.font, "Arial,Helvetica");
    assert_eq!(defaults.axis_style.size_px, 10);
    assert!(defaults.wind.compass_labels);
    assert!(defaults.wind.tick_bars);
    assert_eq!(defaults.wind.tick_height_px, 2);
    assert_eq!(
        defaults.wind.bar_image,
        Some(Fill::Image(DEFAULT_BAR_IMAGE.to_owned()))
    );
    assert!(!defaults.line_overlay.enabled);
    assert_eq!(defaults.line_overlay.width_px, 1);
    assert!(!defaults.negative_bars);
    assert!(!defaults.table_borders);
}

#[test]
fn empty_defaults_json_matches_default_struct() {
    let defaults = GraphDefaults::from_json_str("{}").expect("empty object should deserialize");
    assert_eq!(defaults, GraphDefaults::default());
}

#[test]
fn defaults_json_roundtrip_keeps_override_order() {
    let defaults = GraphDefaults {
        negative_bars: true,
        forced_height: Some(180),
        text_overrides: TextOverrides::new()
            .with_title(KnownTitle::Rainfall, "Rain")
            .with_axis_label(KnownTitle::Barometer, "hPa"),
        ..GraphDefaults::default()
    };

    let json = defaults
        .to_json_pretty()
        .expect("defaults should serialize to json");
    let rainfall = json.find("Rainfall").expect("rainfall key");
    let barometer = json.find("Barometer").expect("barometer key");
    assert!(rainfall < barometer);

    let restored = GraphDefaults::from_json_str(&json).expect("defaults should deserialize");
    assert_eq!(restored, defaults);
}

#[test]
fn plan_snapshot_contract_roundtrip() {
    let mut graph = Graph::new(
        GraphConfig::new(200, 80).with_negative_bars(true),
        &GraphDefaults::default(),
    );
    graph.append_row(&[5.0, 1.0]).expect("row");
    graph.append_row(&[-3.0, 2.0]).expect("row");
    graph.set_max_min(true);

    let snapshot = graph
        .plan_snapshot()
        .expect("snapshot")
        .expect("non-empty chart");
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract should serialize");
    assert!(json.contains("\"schema_version\": 1"));
    assert!(json.contains("\"paxis_height\""));

    let restored = PlanSnapshot::from_json_contract_v1_str(&json).expect("contract should parse");
    assert_eq!(restored, snapshot);

    let pretty = graph.plan_snapshot_json_pretty().expect("snapshot json");
    assert!(pretty.contains("\"max_min\": true"));
}

#[test]
fn snapshot_of_empty_chart_is_an_error() {
    let graph = Graph::new(GraphConfig::new(200, 80), &GraphDefaults::default());
    assert!(graph.plan_snapshot().expect("snapshot").is_none());
    assert!(graph.plan_snapshot_json_pretty().is_err());
}

#[test]
fn unsupported_snapshot_schema_is_rejected() {
    let graph = {
        let mut graph = Graph::new(GraphConfig::new(200, 80), &GraphDefaults::default());
        graph.append_row(&[1.0]).expect("row");
        graph
    };
    let json = graph
        .plan_snapshot()
        .expect("snapshot")
        .expect("non-empty chart")
        .to_json_contract_v1_pretty()
        .expect("contract")
        .replace("\"schema_version\": 1", "\"schema_version\": 9");

    assert!(PlanSnapshot::from_json_contract_v1_str(&json).is_err());
}
