use chart_prep::api::{
    CHART_OPTIONS_SCHEMA_V1, ChartOptions, LineFormat, ReferenceAxis, ResolvedOptions,
    StackingMode,
};
use chart_prep::core::{AxisType, ChartKind};
use chart_prep::ChartError;

#[test]
fn legacy_percent_stacking_turns_on_percent_values() {
    let resolved = ResolvedOptions::from_json_str(r#"{"series":{"stacking":"percent"}}"#)
        .expect("valid options");
    assert_eq!(resolved.series.stacking, Some(StackingMode::Stack));
    assert!(resolved.percent_values());
    assert!(resolved.is_stacked());
}

#[test]
fn legacy_normal_stacking_clears_percent_values() {
    let resolved = ResolvedOptions::from_json_str(
        r#"{"series":{"stacking":"normal","percentValues":true}}"#,
    )
    .expect("valid options");
    assert_eq!(resolved.series.stacking, Some(StackingMode::Stack));
    assert!(!resolved.percent_values());
}

#[test]
fn empty_object_resolves_to_documented_defaults() {
    let resolved = ResolvedOptions::from_json_str("{}").expect("valid options");
    assert_eq!(resolved.kind(), ChartKind::Column);
    assert!(resolved.sort_x);
    assert!(!resolved.reverse_x);
    assert!(resolved.missing_values_as_zero);
    assert_eq!(resolved.default_y(), Some(0.0));
    assert_eq!(resolved.number_format, "0,0[.]00000");
    assert_eq!(resolved.percent_format, "0[.]00%");
    assert_eq!(resolved.date_time_format, "DD/MM/YYYY HH:mm");
    assert_eq!(resolved.y_axis.len(), 2);
    assert_eq!(resolved.series.stacking, None);
    assert!(!resolved.show_data_labels());
    assert_eq!(resolved.constant_line.len(), 1);
    assert!(!resolved.constant_line[0].is_configured());
}

#[test]
fn pie_shows_data_labels_unless_disabled() {
    let pie = ChartOptions::new(ChartKind::Pie).resolve();
    assert!(pie.show_data_labels());

    let quiet = ResolvedOptions::from_json_str(
        r#"{"globalSeriesType":"pie","showDataLabels":false}"#,
    )
    .expect("valid options");
    assert!(!quiet.show_data_labels());
}

#[test]
fn line_charts_get_marker_size() {
    let resolved = ChartOptions::new(ChartKind::Line).resolve();
    assert_eq!(resolved.marker_size, Some(6));
    assert_eq!(ChartOptions::default().resolve().marker_size, None);
}

#[test]
fn partial_y_axis_list_is_padded() {
    let resolved = ResolvedOptions::from_json_str(r#"{"yAxis":[{"type":"logarithmic"}]}"#)
        .expect("valid options");
    assert_eq!(resolved.y_axis.len(), 2);
    assert_eq!(resolved.y_axis(false).axis_type, AxisType::Logarithmic);
    assert!(resolved.y_axis(true).opposite);
}

#[test]
fn unknown_keys_pass_through() {
    let options = ChartOptions::from_json_str(r#"{"futureFlag":{"depth":3},"sortX":false}"#)
        .expect("valid options");
    assert!(!options.sort_x);
    assert_eq!(
        options.extra.get("futureFlag"),
        Some(&serde_json::json!({"depth": 3}))
    );

    let json = options.to_json_pretty().expect("serialize");
    assert!(json.contains("futureFlag"));
    let reparsed = ChartOptions::from_json_str(&json).expect("reparse");
    assert_eq!(reparsed, options);
}

#[test]
fn reference_lines_accept_legacy_format_key() {
    let options = ChartOptions::from_json_str(
        r##"{"constantLine":[
            {"name":"Goal","reference":1,"value":12.5,"format":"blodSolid","color":"#123456"},
            {"name":"Draft","reference":0,"value":null,"format":"dashdot"}
        ]}"##,
    )
    .expect("valid options");
    let goal = &options.constant_line[0];
    assert_eq!(goal.reference, ReferenceAxis::Y);
    assert_eq!(goal.value, Some(12.5));
    assert_eq!(goal.format, LineFormat::BoldSolid);
    assert_eq!(goal.color, "#123456");

    let draft = &options.constant_line[1];
    assert_eq!(draft.reference, ReferenceAxis::X);
    assert!(!draft.is_configured());
    assert_eq!(draft.format, LineFormat::Solid);
}

#[test]
fn malformed_json_is_rejected() {
    let err = ChartOptions::from_json_str("{not json").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidOptions(_)));
}

#[test]
fn json_contract_accepts_envelope_and_bare_object() {
    let options = ChartOptions::new(ChartKind::Area).with_sort_x(false);
    let envelope = options.to_json_contract_v1_pretty().expect("serialize");
    assert!(envelope.contains(&format!("\"schema_version\": {CHART_OPTIONS_SCHEMA_V1}")));
    assert_eq!(
        ChartOptions::from_json_compat_str(&envelope).expect("envelope"),
        options
    );

    let bare = ChartOptions::from_json_compat_str(r#"{"globalSeriesType":"area","sortX":false}"#)
        .expect("bare");
    assert_eq!(bare.global_series_type, ChartKind::Area);
    assert!(!bare.sort_x);
}

#[test]
fn json_contract_rejects_unknown_schema_version() {
    let err = ChartOptions::from_json_compat_str(r#"{"schema_version":7,"options":{}}"#)
        .expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidOptions(message) if message.contains('7')));
}

#[test]
fn nested_unknown_keys_survive_a_round_trip() {
    let options = ChartOptions::from_json_str(
        r#"{
            "xAxis": {"type": "datetime", "dateTimeFormat": "YYYY"},
            "yAxis": [{"type": "linear", "rangeMin": 0}],
            "legend": {"enabled": false, "itemWidth": 40},
            "series": {"stacking": null, "error_y": {"type": "data", "visible": true}},
            "seriesOptions": {"a": {"type": "line", "index": 3}}
        }"#,
    )
    .expect("valid options");
    assert_eq!(options.x_axis.axis_type, AxisType::Datetime);
    assert_eq!(
        options.x_axis.extra.get("dateTimeFormat"),
        Some(&serde_json::json!("YYYY"))
    );
    assert_eq!(options.y_axis[0].extra.get("rangeMin"), Some(&serde_json::json!(0)));
    assert_eq!(options.legend.extra.get("itemWidth"), Some(&serde_json::json!(40)));
    assert_eq!(
        options.series.extra.get("error_y"),
        Some(&serde_json::json!({"type": "data", "visible": true}))
    );
    assert_eq!(
        options.series_options["a"].extra.get("index"),
        Some(&serde_json::json!(3))
    );

    let json = options.to_json_pretty().expect("serialize");
    let reparsed = ChartOptions::from_json_str(&json).expect("reparse");
    assert_eq!(reparsed, options);
}

#[test]
fn stacking_is_read_by_truthiness() {
    let cases = [
        (r#"{"series":{"stacking":""}}"#, None),
        (r#"{"series":{"stacking":false}}"#, None),
        (r#"{"series":{"stacking":null}}"#, None),
        (r#"{"series":{"stacking":"stack"}}"#, Some(StackingMode::Stack)),
        (r#"{"series":{"stacking":"overlay"}}"#, Some(StackingMode::Stack)),
        (r#"{"series":{"stacking":true}}"#, Some(StackingMode::Stack)),
    ];
    for (input, expected) in cases {
        let options = ChartOptions::from_json_str(input).expect("stacking never fails parsing");
        assert_eq!(options.series.stacking, expected, "{input}");
    }

    let resolved = ResolvedOptions::from_json_str(r#"{"series":{"stacking":"","percentValues":true}}"#)
        .expect("valid options");
    assert!(!resolved.is_stacked());
    assert!(resolved.percent_values());
}

#[test]
fn bold_reference_lines_keep_the_saved_key() {
    let options = ChartOptions::from_json_str(
        r#"{"constantLine":[{"name":"Goal","value":1,"format":"boldSolid"}]}"#,
    )
    .expect("valid options");
    assert_eq!(options.constant_line[0].format, LineFormat::BoldSolid);

    let json = options.to_json_pretty().expect("serialize");
    assert!(json.contains("\"blodSolid\""));
    assert!(!json.contains("\"boldSolid\""));
    let reparsed = ChartOptions::from_json_str(&json).expect("reparse");
    assert_eq!(reparsed.constant_line[0].format, LineFormat::BoldSolid);
}
