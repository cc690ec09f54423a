// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

use approx::assert_abs_diff_eq;

use catalog::hexagon_valid_pairs;

fn seven_feed() -> Receiver {
    let mut r = Receiver::new("TEST", 0.0, 100.0, &[(0.0, 5.0), (100.0, 5.0)], 7, 2)
        .with_derotator(Angle::from_degrees(30.0), Angle::from_degrees(10.0));
    r.set_feed_offsets(
        3,
        (Angle::from_degrees(-2.0), Angle::from_degrees(1.0)),
        Frame::Hor,
    )
    .unwrap();
    r.set_valid_pairs(hexagon_valid_pairs()).unwrap();
    r
}

#[test]
fn test_new_pads_feed_offsets() {
    let r = Receiver::new("R", 1.0, 2.0, &[(1.0, 0.1)], 4, 2);
    assert_eq!(r.feed_offsets().len(), 4);
    assert!(r.feed_offsets().iter().all(|c| c.is_null()));
    assert_eq!(r.nifs(), 8);
    assert!(r.is_multifeed());

    let r = r.with_feed_offsets(vec![Coord::from_degrees(Frame::Hor, 0.0, 0.0)]);
    assert_eq!(r.feed_offsets().len(), 4);
}

#[test]
fn test_set_feed_offsets_bad_feed() {
    let mut r = Receiver::new("R", 1.0, 2.0, &[(1.0, 0.1)], 2, 2);
    let result = r.set_feed_offsets(
        3,
        (Angle::from_degrees(1.0), Angle::zero()),
        Frame::Hor,
    );
    assert_eq!(
        result,
        Err(ReceiverError::NoSuchFeed {
            receiver: "R".to_string(),
            feed: 3
        })
    );
}

#[test]
fn test_beamsize_interpolation() {
    let r = Receiver::new("L", 1300.0, 1800.0, &[(1300.0, 0.252), (1550.0, 0.210), (1800.0, 0.187)], 1, 2);
    assert_abs_diff_eq!(r.get_beamsize(1300.0).deg(), 0.252);
    assert_abs_diff_eq!(r.get_beamsize(1425.0).deg(), 0.231, epsilon = 1e-12);
    assert_abs_diff_eq!(r.get_beamsize(1800.0).deg(), 0.187);
    // Out of range values are clamped, not errors.
    assert_abs_diff_eq!(r.get_beamsize(5000.0).deg(), 0.187);
    assert_abs_diff_eq!(r.get_beamsize(100.0).deg(), 0.252);
    // Non-positive frequencies fall back to fmin.
    assert_abs_diff_eq!(r.get_beamsize(0.0).deg(), 0.252);
    assert_abs_diff_eq!(r.default_beamsize().deg(), 0.252);
}

#[test]
fn test_beamsize_single_entry_table() {
    let r = Receiver::new("C", 4700.0, 5500.0, &[(5000.0, 2.0)], 1, 2);
    assert_abs_diff_eq!(r.get_beamsize(4800.0).deg(), 2.0);
    assert_abs_diff_eq!(r.get_beamsize(5400.0).deg(), 2.0);
}

#[test]
fn test_valid_pairs_on_single_feed() {
    let mut r = Receiver::new("R", 1.0, 2.0, &[(1.0, 0.1)], 1, 2);
    assert_eq!(
        r.set_valid_pairs(hexagon_valid_pairs()),
        Err(ReceiverError::SingleFeed("R".to_string()))
    );
    assert!(!r.is_valid_pair(FeedPair::new(0, 3)));
}

#[test]
fn test_valid_pair_lookup() {
    let r = seven_feed();
    let table = r.valid_pairs().unwrap();
    assert!(r.is_valid_pair(FeedPair::new(1, 5)));
    assert!(r.is_valid_pair(FeedPair::new(5, 1)));
    assert!(table.is_valid_at(FeedPair::new(1, 5), Angle::from_degrees(90.0)));
    assert!(!table.is_valid_at(FeedPair::new(1, 5), Angle::from_degrees(0.0)));
    assert!(!table.is_valid_at(FeedPair::new(1, 5), Angle::from_degrees(45.0)));
    assert!(!r.is_valid_pair(FeedPair::new(1, 1)));
    assert_eq!(
        r.derotator_angle(FeedPair::new(4, 2)),
        Ok(Angle::from_degrees(90.0))
    );
}

#[test]
fn test_valid_pairs_tolerant_bucket() {
    let table = ValidPairs::new()
        .with(90.0, [(1, 5)])
        .with(90.0 + 1e-9, [(2, 4), (5, 1)]);
    assert_eq!(table.iter().count(), 1);
    assert_eq!(table.bucket(Angle::from_degrees(90.0)).unwrap().len(), 2);
}

#[test]
fn test_get_feed_offset_rotation() {
    let r = seven_feed();
    // (0, 3) is valid at 0 degrees: no rotation.
    let offset = r.get_feed_offset(3, FeedPair::new(0, 3), Frame::Hor).unwrap();
    assert_abs_diff_eq!(offset.lon.deg(), -2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(offset.lat.deg(), 1.0, epsilon = 1e-12);

    // (2, 3) is valid at 60 degrees: rotate by -60.
    let offset = r.get_feed_offset(3, FeedPair::new(3, 2), Frame::Hor).unwrap();
    let (sin, cos) = (-60.0_f64).to_radians().sin_cos();
    assert_abs_diff_eq!(offset.lon.deg(), -2.0 * cos - sin, epsilon = 1e-12);
    assert_abs_diff_eq!(offset.lat.deg(), -2.0 * sin + cos, epsilon = 1e-12);
    assert_eq!(offset.frame, Frame::Hor);
}

#[test]
fn test_get_feed_offset_errors() {
    let r = seven_feed();
    assert_eq!(
        r.get_feed_offset(1, FeedPair::new(0, 3), Frame::Hor),
        Err(ReceiverError::FeedNotInPair {
            feed: 1,
            pair: FeedPair::new(0, 3)
        })
    );
    assert_eq!(
        r.get_feed_offset(1, FeedPair::new(1, 1), Frame::Hor),
        Err(ReceiverError::InvalidPair(FeedPair::new(1, 1)))
    );

    let no_table = Receiver::new("R", 1.0, 2.0, &[(1.0, 0.1)], 7, 2);
    assert_eq!(
        no_table.get_feed_offset(0, FeedPair::new(0, 3), Frame::Hor),
        Err(ReceiverError::NoValidPairs("R".to_string()))
    );

    let single = Receiver::new("S", 1.0, 2.0, &[(1.0, 0.1)], 1, 2);
    assert!(matches!(
        single.get_feed_offset(0, FeedPair::new(0, 1), Frame::Hor),
        Err(ReceiverError::SingleFeed(_))
    ));
}

#[test]
fn test_derotator_procedure() {
    let r = seven_feed();
    let p = r.derotator_procedure(FeedPair::new(1, 5)).unwrap();
    assert_eq!(p.name(), "DEROTATORFIXED_900");
    assert_eq!(
        p.body(),
        "\tderotatorSetConfiguration=FIXED\n\tderotatorSetPosition=90.0d\n"
    );
    assert_eq!(p.invocation().unwrap(), "PROCEDURE_DEROTATORFIXED_900");
    assert!(r.derotator_procedure(FeedPair::new(1, 1)).is_err());
}

#[test]
fn test_catalog() {
    let srt = get_radiotelescope("srt").unwrap();
    assert_eq!(srt.name, "SRT");
    let km = srt.receiver("km").unwrap();
    assert_eq!(km.nfeed, 7);
    assert!(km.has_derotator);
    assert_abs_diff_eq!(km.interleave.deg(), 0.037545204 / 3.0);
    assert!(km.is_valid_pair(FeedPair::new(0, 3)));
    assert_abs_diff_eq!(km.get_beamsize(22000.0).deg(), 0.014);
    // Feed 3 sits opposite feed 6 through the central feed.
    let f3 = km.nominal_feed_offset(3).unwrap();
    let f6 = km.nominal_feed_offset(6).unwrap();
    assert_abs_diff_eq!(f3.lon.deg(), -f6.lon.deg(), epsilon = 1e-12);
    assert_abs_diff_eq!(f3.lat.deg(), -f6.lat.deg(), epsilon = 1e-12);

    let med = get_radiotelescope("MED").unwrap();
    assert_eq!(med.receiver("K").unwrap().nifs(), 4);
    assert!(med.receiver("KM").is_err());
    assert!(get_radiotelescope("GBT").is_err());
    assert!(get_radiotelescope("NOTO").unwrap().receivers.is_empty());
}
