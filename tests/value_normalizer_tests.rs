use chart_prep::core::{
    AxisType, CellValue, MACHINE_DATE_TIME_FORMAT, XKey, normalize_value, parse_instant,
};
use chrono::{TimeZone, Utc};

#[test]
fn datetime_axis_formats_text_timestamps() {
    let value = CellValue::from("2024-03-05T10:20:30Z");
    assert_eq!(
        normalize_value(&value, Some(&AxisType::Datetime), "YYYY-MM-DD"),
        CellValue::from("2024-03-05")
    );
}

#[test]
fn datetime_axis_reads_numbers_as_epoch_millis() {
    let value = CellValue::from(86_400_000.0);
    assert_eq!(
        normalize_value(&value, Some(&AxisType::Datetime), MACHINE_DATE_TIME_FORMAT),
        CellValue::from("1970-01-02 00:00:00")
    );
}

#[test]
fn unparsable_text_on_datetime_axis_is_unchanged() {
    let value = CellValue::from("not a date");
    assert_eq!(
        normalize_value(&value, Some(&AxisType::Datetime), "YYYY"),
        value
    );
}

#[test]
fn datetime_cells_are_formatted_on_any_axis() {
    let instant = Utc
        .with_ymd_and_hms(2024, 3, 5, 10, 20, 30)
        .single()
        .expect("valid instant");
    let value = CellValue::from(instant);
    assert_eq!(
        normalize_value(&value, Some(&AxisType::Category), MACHINE_DATE_TIME_FORMAT),
        CellValue::from("2024-03-05 10:20:30")
    );
    assert_eq!(
        normalize_value(&value, None, "DD/MM/YYYY HH:mm"),
        CellValue::from("05/03/2024 10:20")
    );
}

#[test]
fn other_values_pass_through() {
    for value in [
        CellValue::from(42.0),
        CellValue::from("Oslo"),
        CellValue::Null,
        CellValue::Bool(true),
    ] {
        assert_eq!(
            normalize_value(&value, Some(&AxisType::Linear), MACHINE_DATE_TIME_FORMAT),
            value
        );
        assert_eq!(normalize_value(&value, None, MACHINE_DATE_TIME_FORMAT), value);
    }
}

#[test]
fn machine_format_keys_sort_chronologically() {
    let mut keys: Vec<XKey> = ["2024-11-02", "2023-12-31", "2024-02-10"]
        .into_iter()
        .map(|text| {
            XKey::from_cell(&normalize_value(
                &CellValue::from(text),
                Some(&AxisType::Datetime),
                MACHINE_DATE_TIME_FORMAT,
            ))
        })
        .collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            XKey::text("2023-12-31 00:00:00"),
            XKey::text("2024-02-10 00:00:00"),
            XKey::text("2024-11-02 00:00:00"),
        ]
    );
}

#[test]
fn parse_instant_ignores_non_temporal_cells() {
    assert!(parse_instant(&CellValue::Null).is_none());
    assert!(parse_instant(&CellValue::Bool(false)).is_none());
    assert!(parse_instant(&CellValue::from(f64::NAN)).is_none());
}
