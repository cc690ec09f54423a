// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

use approx::assert_abs_diff_eq;

#[test]
fn test_parse_decimal() {
    let a = Angle::parse("10.5d").unwrap();
    assert_abs_diff_eq!(a.deg(), 10.5);
    assert_eq!(a.format(), AngleFormat::Decimal);

    let a = Angle::parse(" -3d ").unwrap();
    assert_abs_diff_eq!(a.deg(), -3.0);
}

#[test]
fn test_parse_dms() {
    let a = Angle::parse("15:30:00").unwrap();
    assert_abs_diff_eq!(a.deg(), 15.5);
    assert_eq!(a.format(), AngleFormat::SexagesimalDegrees);

    // The sign applies to the whole angle.
    let a = Angle::parse("-00:00:03").unwrap();
    assert_abs_diff_eq!(a.deg(), -3.0 / 3600.0);
    let a = Angle::parse("-10:30:00.5").unwrap();
    assert_abs_diff_eq!(a.deg(), -(10.5 + 0.5 / 3600.0), epsilon = 1e-12);
}

#[test]
fn test_parse_hms() {
    let a = Angle::parse("1:00:00.0h").unwrap();
    assert_abs_diff_eq!(a.deg(), 15.0);
    assert_eq!(a.format(), AngleFormat::SexagesimalHours);

    let a = Angle::parse("12:00:00h").unwrap();
    assert_abs_diff_eq!(a.deg(), 180.0);
}

#[test]
fn test_parse_rejects_garbage() {
    for s in ["", "10.5", "abc", "10:5:00", "10:30", "1.5h"] {
        let result = Angle::parse(s);
        assert!(
            matches!(result, Err(AngleFormatError::Unrecognised(_))),
            "{s}: {result:?}"
        );
    }
}

#[test]
fn test_parse_out_of_range() {
    assert_eq!(
        Angle::parse("10:60:00"),
        Err(AngleFormatError::MinutesOutOfRange(60))
    );
    assert!(matches!(
        Angle::parse("10:30:61"),
        Err(AngleFormatError::SecondsOutOfRange(_))
    ));
    assert_eq!(
        Angle::parse("24:00:00h"),
        Err(AngleFormatError::HoursOutOfRange(24))
    );
}

#[test]
fn test_display() {
    assert_eq!(Angle::from_degrees(15.0).to_string(), "15.0000d");
    assert_eq!(
        Angle::new(15.0, AngleFormat::SexagesimalDegrees).to_string(),
        "15:00:00.0000"
    );
    assert_eq!(
        Angle::new(-3.0 / 3600.0, AngleFormat::SexagesimalDegrees).to_string(),
        "-00:00:03.0000"
    );
    assert_eq!(
        Angle::new(180.0, AngleFormat::SexagesimalHours).to_string(),
        "12:00:00.0000h"
    );
    assert_eq!(
        Angle::new(0.75, AngleFormat::SexagesimalHours).to_string(),
        "00:03:00.0000h"
    );
    // Rounding carries into the minutes.
    assert_eq!(
        Angle::new(1.0 / 60.0 - 1e-10, AngleFormat::SexagesimalDegrees).to_string(),
        "00:01:00.0000"
    );
}

#[test]
fn test_format_round_trip() {
    for s in [
        "12.3456d",
        "-0.5000d",
        "123:45:06.7890",
        "-00:00:03.0000",
        "05:30:15.1234h",
        "23:59:59.9999h",
    ] {
        let a = Angle::parse(s).unwrap();
        assert_eq!(a.to_string(), s);
    }
}

#[test]
fn test_arithmetic_keeps_left_format() {
    let a = Angle::new(30.0, AngleFormat::SexagesimalHours);
    let b = Angle::from_degrees(15.0);
    let sum = a + b;
    assert_abs_diff_eq!(sum.deg(), 45.0);
    assert_eq!(sum.format(), AngleFormat::SexagesimalHours);
    let diff = b - a;
    assert_abs_diff_eq!(diff.deg(), -15.0);
    assert_eq!(diff.format(), AngleFormat::Decimal);
    assert_eq!((-a).format(), AngleFormat::SexagesimalHours);
    assert_abs_diff_eq!((a * 2.0).deg(), 60.0);
    assert_abs_diff_eq!((a / 4.0).deg(), 7.5);
}

#[test]
fn test_equality_ignores_format() {
    let a = Angle::new(15.0, AngleFormat::SexagesimalHours);
    let b = Angle::from_degrees(15.0);
    assert_eq!(a, b);
    assert!(Angle::from_degrees(1.0) < Angle::from_degrees(2.0));
}

#[test]
fn test_ceil_to_odd() {
    assert_eq!(ceil_to_odd(4.2), 5);
    assert_eq!(ceil_to_odd(3.2), 5);
    assert_eq!(ceil_to_odd(5.0), 5);
    assert_eq!(ceil_to_odd(-4.2), -3);
    assert_eq!(ceil_to_odd(0.0), 1);
}

#[test]
fn test_ceil_to_half() {
    assert_abs_diff_eq!(ceil_to_half(4.2), 4.5);
    assert_abs_diff_eq!(ceil_to_half(4.5), 4.5);
    assert_abs_diff_eq!(ceil_to_half(4.6), 5.0);
    assert_abs_diff_eq!(ceil_to_half(-4.2), -4.0);
}
