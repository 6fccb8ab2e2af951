use chart_prep::format::{NumberFormatter, TemplateFields, format_template, has_placeholder};

#[test]
fn non_finite_values_render_empty() {
    let formatter = NumberFormatter::new("0,0[.]00000");
    assert_eq!(formatter.format(f64::NAN), "");
    assert_eq!(formatter.format(f64::INFINITY), "");
    assert_eq!(formatter.format_opt(None), "");
}

#[test]
fn default_number_pattern_drops_zero_decimals() {
    let formatter = NumberFormatter::new("0,0[.]00000");
    assert_eq!(formatter.format(1_234_567.0), "1,234,567");
    assert_eq!(formatter.format(1.5), "1.50000");
    assert_eq!(formatter.format(-42.0), "-42");
}

#[test]
fn percent_pattern_scales_by_hundred() {
    let formatter = NumberFormatter::new("0[.]00%");
    assert_eq!(formatter.format(0.5), "50%");
    assert_eq!(formatter.format(0.1234), "12.34%");
    assert_eq!(NumberFormatter::new("0.0 %").format(0.25), "25.0 %");
}

#[test]
fn fixed_decimals_round_half_away_from_zero() {
    let formatter = NumberFormatter::new("0.00");
    assert_eq!(formatter.format(-3.14159), "-3.14");
    assert_eq!(formatter.format(2.125), "2.13");
    assert_eq!(formatter.format(-0.001), "0.00");
}

#[test]
fn literals_parentheses_and_signs() {
    assert_eq!(NumberFormatter::new("$0,0").format(1000.0), "$1,000");
    assert_eq!(NumberFormatter::new("(0,0.00)").format(-1234.5), "(1,234.50)");
    assert_eq!(NumberFormatter::new("(0,0.00)").format(1234.5), "1,234.50");
    assert_eq!(NumberFormatter::new("+0").format(5.0), "+5");
    assert_eq!(NumberFormatter::new("0 USD").format(7.0), "7 USD");
}

#[test]
fn abbreviations_pick_largest_unit() {
    let formatter = NumberFormatter::new("0.0a");
    assert_eq!(formatter.format(1_500_000.0), "1.5m");
    assert_eq!(formatter.format(2_000.0), "2.0k");
    assert_eq!(formatter.format(999.0), "999.0");
    assert_eq!(NumberFormatter::new("0 a").format(3e9), "3 b");
}

#[test]
fn empty_pattern_prints_plain_numbers() {
    let formatter = NumberFormatter::new("");
    assert_eq!(formatter.format(2.5), "2.5");
    assert_eq!(formatter.format(10.0), "10");
}

#[test]
fn template_substitutes_fields() {
    let mut fields = TemplateFields::new();
    fields.insert("@@name".to_owned(), "Revenue".to_owned());
    fields.insert("@@y".to_owned(), "1,200".to_owned());
    assert_eq!(
        format_template("{{ @@name }}: {{@@y}} ({{ @@size }})", &fields),
        "Revenue: 1,200 ({{ @@size }})"
    );
    assert!(has_placeholder("{{ @@name }}", "@@name"));
    assert!(!has_placeholder("@@name", "@@name"));
}
