use chart_prep::api::{
    ChartOptions, SIZE_FIELD, TextFormatter, TextItem, Y_ERROR_FIELD, Y_FIELD, Y_PERCENT_FIELD,
    default_series_text, update_data,
};
use chart_prep::core::{ChartKind, Series, SourcePoint, XKey};

fn item(pairs: &[(&str, &str)]) -> TextItem {
    TextItem {
        fields: pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect(),
        raw_y: None,
    }
}

#[test]
fn default_text_composes_present_fields() {
    assert_eq!(default_series_text(&item(&[(Y_FIELD, "12")])), "12");
    assert_eq!(
        default_series_text(&item(&[
            (Y_FIELD, "12"),
            (Y_ERROR_FIELD, "2"),
            (Y_PERCENT_FIELD, "40%"),
            (SIZE_FIELD, "7"),
        ])),
        "40% (12 \u{00B1} 2): 7"
    );
}

#[test]
fn formatter_choice_follows_options() {
    assert_eq!(
        TextFormatter::from_options(&ChartOptions::default().resolve()),
        TextFormatter::Default
    );
    assert_eq!(
        TextFormatter::from_options(&ChartOptions::new(ChartKind::Pie).resolve()),
        TextFormatter::PieDefault
    );
    assert_eq!(
        TextFormatter::from_options(&ChartOptions::default().with_text_format("{{ @@y }}").resolve()),
        TextFormatter::Template("{{ @@y }}".to_owned())
    );
    assert!(matches!(
        TextFormatter::from_options(&ChartOptions::default().with_show_total_labels(true).resolve()),
        TextFormatter::RawTotal(_)
    ));
}

#[test]
fn scatter_y_is_shown_unformatted() {
    let options = ChartOptions::new(ChartKind::Scatter).resolve();
    let mut list = vec![
        Series::from_points("s", [SourcePoint::new(XKey::number(1.0), Some(1234.5))])
            .with_kind(ChartKind::Scatter),
    ];

    update_data(&mut list, &options);

    assert_eq!(list[0].text, vec!["1234.5"]);
}

#[test]
fn bubble_size_is_appended() {
    let options = ChartOptions::new(ChartKind::Bubble).resolve();
    let mut list = vec![
        Series::from_points(
            "b",
            [SourcePoint::new(XKey::number(1.0), Some(2.0)).with_size(3.0)],
        )
        .with_kind(ChartKind::Bubble),
    ];

    update_data(&mut list, &options);

    assert_eq!(list[0].text, vec!["2: 3"]);
}
