use gpui_circle_packing::utils::value_formatter::validate_specifier;
use gpui_circle_packing::ValueFormat;

fn fmt(spec: &str, value: f64) -> String {
    ValueFormat::parse(spec).unwrap().format(value)
}

#[test]
fn test_valid_specs() {
    for spec in ["", "$,.2f", "+.1%", ".2g", "x", "08d", ">8d", "*^10,.1f", ".3~s", "(,d"] {
        assert!(validate_specifier(spec).is_ok(), "{spec:?} should be accepted");
    }
    assert_eq!(ValueFormat::parse(",d").unwrap().specifier(), Some(",d"));
}

#[test]
fn test_invalid_specs() {
    assert!(validate_specifier(".f").is_err());
    assert!(validate_specifier("q").is_err());
    assert!(validate_specifier(".2fz").is_err());
    assert!(ValueFormat::parse("??").is_err());
}

#[test]
fn test_fixed_and_integer() {
    assert_eq!(fmt(".2f", 3.14159), "3.14");
    assert_eq!(fmt(",.1f", 1234567.89), "1,234,567.9");
    assert_eq!(fmt("d", 41.6), "42");
    assert_eq!(fmt(",d", 1000.0), "1,000");
    assert_eq!(fmt("8d", 42.0), "      42");
}

#[test]
fn test_currency_and_sign() {
    assert_eq!(fmt("$,.2f", -1234.5), "-$1,234.50");
    assert_eq!(fmt("$.0f", 9.0), "$9");
    assert_eq!(fmt("+d", 42.0), "+42");
}

#[test]
fn test_percent() {
    assert_eq!(fmt(".0%", 0.5), "50%");
    assert_eq!(fmt(".1%", 0.255), "25.5%");
    assert_eq!(fmt("+.1%", 0.255), "+25.5%");
}

#[test]
fn test_exponent() {
    assert_eq!(fmt(".2e", 1234.0), "1.23e3");
    assert_eq!(fmt(".2e", 0.00123), "1.23e-3");
}

#[test]
fn test_si_prefix() {
    assert_eq!(fmt(".2s", 1234.0), "1.23k");
    assert_eq!(fmt(".2s", 1234567.0), "1.23M");
    assert_eq!(fmt(".2s", 0.00123), "1.23m");
}

#[test]
fn test_si_prefix_near_unit_boundary() {
    assert_eq!(fmt(".3s", 999.9), "999.900");
    assert_eq!(fmt(".3s", 999999.0), "999.999k");
}

#[test]
fn test_general_and_integer_types() {
    assert_eq!(fmt(".2g", 3.14159), "3.14");
    assert_eq!(fmt("x", 255.0), "ff");
    assert_eq!(fmt("b", 10.0), "1010");
    assert_eq!(fmt("", 12.5), "12.5");
}

#[test]
fn test_custom_formatter() {
    let format = ValueFormat::custom(|v| format!("{v} items"));
    assert_eq!(format.format(3.0), "3 items");
    assert_eq!(format.specifier(), None);
}
