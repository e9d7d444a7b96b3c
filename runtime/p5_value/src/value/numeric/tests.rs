use super::*;
use pretty_assertions::assert_eq;

fn read(text: &str) -> (Number, bool, bool) {
    let prefix = parse_numeric_prefix(text);
    (prefix.number, prefix.found, prefix.complete)
}

#[test]
fn test_plain_integers() {
    assert_eq!(read("42"), (Number::Int(42), true, true));
    assert_eq!(read("-17"), (Number::Int(-17), true, true));
    assert_eq!(read("+8"), (Number::Int(8), true, true));
}

#[test]
fn test_leading_whitespace_and_trailing_blank() {
    assert_eq!(read("  \t12\n"), (Number::Int(12), true, true));
}

#[test]
fn test_fraction_and_exponent() {
    assert_eq!(read("3.25"), (Number::Float(3.25), true, true));
    assert_eq!(read(".5"), (Number::Float(0.5), true, true));
    assert_eq!(read("1."), (Number::Float(1.0), true, true));
    assert_eq!(read("1e3"), (Number::Float(1000.0), true, true));
    assert_eq!(read("2.5E-1"), (Number::Float(0.25), true, true));
}

#[test]
fn test_longest_prefix_wins() {
    assert_eq!(read("12abc"), (Number::Int(12), true, false));
    assert_eq!(read("1e"), (Number::Int(1), true, false));
    assert_eq!(read("0x1F"), (Number::Int(0), true, false));
    assert_eq!(read("3.14.15"), (Number::Float(3.14), true, false));
}

#[test]
fn test_no_numeral() {
    assert_eq!(read("abc"), (Number::Int(0), false, false));
    assert_eq!(read(""), (Number::Int(0), false, false));
    assert_eq!(read("."), (Number::Int(0), false, false));
    assert_eq!(read("-"), (Number::Int(0), false, false));
    assert!(parse_numeric_prefix("abc").is_lossy());
    assert!(!parse_numeric_prefix("7").is_lossy());
}

#[test]
fn test_special_words() {
    let prefix = parse_numeric_prefix("Inf");
    assert_eq!(prefix.number, Number::Float(f64::INFINITY));
    let prefix = parse_numeric_prefix("-infinity");
    assert_eq!(prefix.number, Number::Float(f64::NEG_INFINITY));
    let prefix = parse_numeric_prefix("nan");
    assert!(matches!(prefix.number, Number::Float(f) if f.is_nan()));
}

#[test]
fn test_wide_integer_falls_back_to_float() {
    let prefix = parse_numeric_prefix("123456789012345678901234");
    assert!(matches!(prefix.number, Number::Float(f) if f > 1e23));
}

#[test]
fn test_float_to_int_truncates_and_saturates() {
    assert_eq!(float_to_int(3.9), 3);
    assert_eq!(float_to_int(-3.9), -3);
    assert_eq!(float_to_int(1e300), i64::MAX);
    assert_eq!(float_to_int(-1e300), i64::MIN);
    assert_eq!(float_to_int(f64::NAN), 0);
}

#[test]
fn test_format_float_fixed() {
    assert_eq!(format_float(0.1), "0.1");
    assert_eq!(format_float(2.5), "2.5");
    assert_eq!(format_float(1.0), "1");
    assert_eq!(format_float(-0.0), "0");
    assert_eq!(format_float(1.0 / 3.0), "0.333333333333333");
    assert_eq!(format_float(123_456_789_012_345.0), "123456789012345");
    assert_eq!(format_float(0.0001), "0.0001");
}

#[test]
fn test_format_float_scientific() {
    assert_eq!(format_float(1e15), "1e+15");
    assert_eq!(format_float(1e20), "1e+20");
    assert_eq!(format_float(1.5e-7), "1.5e-07");
    assert_eq!(format_float(-2.25e100), "-2.25e+100");
}

#[test]
fn test_format_float_specials() {
    assert_eq!(format_float(f64::INFINITY), "Inf");
    assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
    assert_eq!(format_float(f64::NAN), "NaN");
}

#[test]
fn test_number_zero() {
    assert!(Number::Int(0).is_zero());
    assert!(Number::Float(-0.0).is_zero());
    assert!(!Number::Float(f64::NAN).is_zero());
    assert_eq!(Number::Float(2.9).as_i64(), 2);
    assert_eq!(Number::Int(4).as_f64(), 4.0);
}
