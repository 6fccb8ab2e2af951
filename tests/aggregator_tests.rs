use approx::assert_relative_eq;
use chart_prep::ChartError;
use chart_prep::core::{
    Aggregator, Count, PivotNumberFormat, Row, RunningStat, StatMode, Sum, aggregator_by_name,
    row_from_json,
};
use serde_json::json;

fn records() -> Vec<Row> {
    [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
        .into_iter()
        .map(|value| row_from_json(json!({ "v": value })))
        .collect()
}

fn feed(aggregator: &mut dyn Aggregator, rows: &[Row]) {
    for row in rows {
        aggregator.push(row);
    }
}

#[test]
fn unknown_stat_mode_is_an_error() {
    let err = "median".parse::<StatMode>().expect_err("unsupported");
    assert!(matches!(err, ChartError::UnsupportedAggregation(mode) if mode == "median"));

    let err = RunningStat::from_mode_name("v", "mode", 1, PivotNumberFormat::default())
        .expect_err("unsupported");
    assert_eq!(err.to_string(), "unsupported aggregation mode: mode");
}

#[test]
fn unknown_aggregator_name_is_an_error() {
    assert!(matches!(
        aggregator_by_name("Median", "v"),
        Err(ChartError::UnsupportedAggregation(_))
    ));
}

#[test]
fn count_and_sum() {
    let rows = records();
    let mut count = Count::new(PivotNumberFormat::integer());
    let mut sum = Sum::new("v", PivotNumberFormat::default());
    feed(&mut count, &rows);
    feed(&mut sum, &rows);
    sum.push(&row_from_json(json!({"v": "12abc"})));
    sum.push(&row_from_json(json!({"v": "abc"})));

    assert_eq!(count.formatted_value(), "8");
    assert_relative_eq!(sum.value(), 52.0);
    assert_eq!(sum.formatted_value(), "52.00");
}

#[test]
fn running_statistics_match_closed_form() {
    let rows = records();
    let mut mean = RunningStat::average("v", PivotNumberFormat::default());
    let mut population = RunningStat::new("v", StatMode::Var, 0, PivotNumberFormat::default());
    let mut sample = RunningStat::new("v", StatMode::Stdev, 1, PivotNumberFormat::default());
    feed(&mut mean, &rows);
    feed(&mut population, &rows);
    feed(&mut sample, &rows);

    assert_relative_eq!(mean.value(), 5.0, epsilon = 1e-12);
    assert_relative_eq!(population.value(), 4.0, epsilon = 1e-12);
    assert_relative_eq!(sample.value(), (32.0f64 / 7.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn degenerate_statistics_are_neutral() {
    let empty = RunningStat::average("v", PivotNumberFormat::default());
    assert!(empty.value().is_nan());
    assert_eq!(empty.formatted_value(), "");

    let mut single = RunningStat::new("v", StatMode::Var, 1, PivotNumberFormat::default());
    single.push(&row_from_json(json!({"v": 3})));
    assert_eq!(single.value(), 0.0);
}

#[test]
fn pivot_format_applies_scaler_and_affixes() {
    let format = PivotNumberFormat {
        digits_after_decimal: 1,
        scaler: 100.0,
        thousands_sep: " ".to_owned(),
        decimal_sep: ",".to_owned(),
        prefix: "~".to_owned(),
        suffix: "%".to_owned(),
    };
    assert_eq!(format.format(12.3456), "~1 234,6%");
    assert_eq!(format.format(f64::INFINITY), "");
}

#[test]
fn pivot_format_rounds_halves_away_from_zero() {
    assert_eq!(PivotNumberFormat::integer().format(2.5), "3");
    assert_eq!(PivotNumberFormat::integer().format(-2.5), "-3");
    assert_eq!(PivotNumberFormat::default().format(0.125), "0.13");
    assert_eq!(PivotNumberFormat::default().format(1234.5), "1,234.50");
}

#[test]
fn registry_builds_named_aggregators() {
    let rows = records();
    let mut average = aggregator_by_name("Average", "v").expect("known");
    feed(average.as_mut(), &rows);
    assert_eq!(average.formatted_value(), "5.00");

    let mut count = aggregator_by_name("Count", "").expect("known");
    feed(count.as_mut(), &rows);
    assert_eq!(count.formatted_value(), "8");
}
