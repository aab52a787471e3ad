use wireline::wide_int::{WideInt, WideIntError};

const TEST_STRING: &str = "9837756439";
const TOO_LARGE: &str = "999999999999999999999999999999";

#[test]
fn test_to_native_returns_value() {
    let value = WideInt::from_native(32);
    assert_eq!(value.to_native(), 32);
}

#[test]
fn test_decimal_string_round_trip() {
    let value = WideInt::from_decimal_string(TEST_STRING).unwrap();
    assert_eq!(value.to_decimal_string(), TEST_STRING);
}

#[test]
fn test_decimal_string_round_trip_at_boundaries() {
    for input in [
        "0",
        "-1",
        "54",
        "9223372036854775807",
        "-9223372036854775808",
    ] {
        let value = WideInt::from_decimal_string(input).unwrap();
        assert_eq!(value.to_decimal_string(), input, "round trip of {input}");
    }
}

#[test]
fn test_decimal_string_too_large_is_out_of_range() {
    assert_eq!(
        WideInt::from_decimal_string(TOO_LARGE),
        Err(WideIntError::OutOfRange)
    );
    assert_eq!(
        WideInt::from_decimal_string("9223372036854775808"),
        Err(WideIntError::OutOfRange)
    );
    assert_eq!(
        WideInt::from_decimal_string("-9223372036854775809"),
        Err(WideIntError::OutOfRange)
    );
}

#[test]
fn test_decimal_string_rejects_garbage() {
    assert_eq!(
        WideInt::from_decimal_string("12x4"),
        Err(WideIntError::InvalidDigit)
    );
    assert_eq!(WideInt::from_decimal_string(""), Err(WideIntError::Empty));
    assert_eq!(WideInt::from_decimal_string("-"), Err(WideIntError::Empty));
}

#[test]
fn test_to_decimal_string_from_native() {
    let value = WideInt::from_native(54);
    assert_eq!(value.to_decimal_string(), "54");
}

#[test]
fn test_to_decimal_string_from_hex() {
    let value = WideInt::from_hex("0xffff").unwrap();
    assert_eq!(value.to_decimal_string(), "65535");
}

#[test]
fn test_associated_decimal_string() {
    let value = WideInt::from_native(54);
    assert_eq!(WideInt::decimal_string(value), "54");

    let value = WideInt::from_hex("0xffff").unwrap();
    assert_eq!(WideInt::decimal_string(value), "65535");
}

#[test]
fn test_hex_full_width_is_bit_pattern() {
    let value = WideInt::from_hex("0xffffffffffffffff").unwrap();
    assert_eq!(value.to_native(), -1);

    let value = WideInt::from_hex("0x8000000000000000").unwrap();
    assert_eq!(value.to_native(), i64::MIN);
}

#[test]
fn test_hex_rejects_overlong_and_garbage() {
    assert_eq!(
        WideInt::from_hex("0x10000000000000000"),
        Err(WideIntError::OutOfRange)
    );
    assert_eq!(WideInt::from_hex("0xg1"), Err(WideIntError::InvalidDigit));
    assert_eq!(WideInt::from_hex("0x"), Err(WideIntError::Empty));
}

#[test]
fn test_negative_hex_is_magnitude() {
    let value = WideInt::from_hex("-0x10").unwrap();
    assert_eq!(value.to_native(), -16);

    let value = WideInt::from_hex("-0x8000000000000000").unwrap();
    assert_eq!(value.to_native(), i64::MIN);
    assert_eq!(
        WideInt::from_hex("-0x8000000000000001"),
        Err(WideIntError::OutOfRange)
    );
}

#[test]
fn test_halves_round_trip() {
    for value in [0i64, 1, -1, 54, i64::MIN, i64::MAX, 9_837_756_439] {
        let wide = WideInt::from_native(value);
        assert_eq!(WideInt::from_halves(wide.high(), wide.low()), wide);
    }
}

#[test]
fn test_halves_of_negative_one() {
    let wide = WideInt::from_native(-1);
    assert_eq!(wide.high(), u32::MAX);
    assert_eq!(wide.low(), u32::MAX);
}

#[test]
fn test_ordering_is_signed() {
    let negative = WideInt::from_native(-2);
    let positive = WideInt::from_hex("0xffff").unwrap();
    assert!(negative < positive);
    assert!(WideInt::MIN < WideInt::ZERO);
    assert!(WideInt::ZERO < WideInt::MAX);
}

#[test]
fn test_hex_string_output() {
    assert_eq!(WideInt::from_native(65535).to_hex_string(), "0xffff");
    assert_eq!(WideInt::from_native(-1).to_hex_string(), "0xffffffffffffffff");
}
