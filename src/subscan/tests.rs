// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

use approx::assert_abs_diff_eq;

use crate::coord::Coord;

fn eq_target() -> Target {
    Target::new("src", Coord::from_degrees(Frame::Eq, 10.0, 20.0))
}

fn leg(const_axis: ScanAxis, direction: Direction) -> OtfLeg {
    OtfLeg {
        duration: 30.0,
        length: Angle::from_degrees(2.0),
        offset: Angle::from_degrees(0.5),
        const_axis,
        direction,
        scan_frame: Frame::Eq,
    }
}

#[test]
fn test_id_counters() {
    let mut subscans = IdCounter::for_subscans();
    let mut modes = IdCounter::for_scanmodes();
    assert_eq!(subscans.next_id(), 1);
    assert_eq!(subscans.next_id(), 2);
    assert_eq!(subscans.peek(), 3);
    assert_eq!(modes.next_id(), 0);
}

#[test]
fn test_default_procedures() {
    let mut ids = IdCounter::for_subscans();
    let t = eq_target();
    let s = get_sidereal(&mut ids, &t, &Coord::null(), 10.0, false).unwrap();
    assert!(s.pre_procedure.is_null());
    assert!(s.post_procedure.is_null());

    let s = get_sidereal(&mut ids, &t, &Coord::null(), 10.0, true).unwrap();
    assert_eq!(s.pre_procedure, *procedure::CALON);
    assert_eq!(s.post_procedure, *procedure::CALOFF);

    let s = get_tsys(&mut ids, &t, &Coord::null()).unwrap();
    assert!(s.is_tsys);
    assert_eq!(s.target.label, "Tsys");
    assert_abs_diff_eq!(s.duration, 0.0);
    assert_eq!(s.post_procedure, *procedure::TSYS);
}

#[test]
fn test_tsys_and_cal_are_exclusive() {
    let mut ids = IdCounter::for_subscans();
    let result = Subscan::new(&mut ids, eq_target(), 1.0, true, true, SubscanKind::Sidereal);
    assert!(matches!(result, Err(ScheduleError::TsysAndCal)));
}

#[test]
fn test_sidereal_does_not_touch_the_input_target() {
    let mut ids = IdCounter::for_subscans();
    let t = eq_target();
    let offset = Coord::from_degrees(Frame::Eq, 1.0, -1.0);
    let s = get_sidereal(&mut ids, &t, &offset, 5.0, false).unwrap();
    assert!(t.offset.is_null());
    assert_eq!(s.target.offset, offset);
}

#[test]
fn test_add_procedures() {
    let mut ids = IdCounter::for_subscans();
    let mut s = get_tsys(&mut ids, &eq_target(), &Coord::null()).unwrap();
    s.add_pre_procedure(&procedure::WAIT.specialize(&[3]).unwrap());
    assert_eq!(s.pre_procedure.name(), "WAIT");
    s.add_post_procedure(&procedure::CALOFF);
    assert_eq!(s.post_procedure.name(), "TSYS_CALOFF");
}

#[test]
fn test_cen_otf_resolves_offset_frame() {
    let mut ids = IdCounter::for_subscans();
    let s = get_cen_otf(&mut ids, &eq_target(), &leg(ScanAxis::Lat, Direction::Inc)).unwrap();
    assert_eq!(s.target.offset.frame, Frame::Eq);
    assert_abs_diff_eq!(s.target.offset.lat.deg(), 0.5);
    assert_abs_diff_eq!(s.target.offset.lon.deg(), 0.0);
    match s.kind {
        SubscanKind::Otf { lon2, lat2, ref descr, geom, .. } => {
            assert_abs_diff_eq!(lon2.deg(), 2.0);
            assert_abs_diff_eq!(lat2.deg(), 0.0);
            assert_eq!(descr, "CEN");
            assert_eq!(geom, ScanAxis::Lat);
        }
        _ => panic!("expected an OTF subscan"),
    }
    assert_eq!(s.typename(), "OTF");
}

#[test]
fn test_cen_otf_frame_checks() {
    let mut ids = IdCounter::for_subscans();
    let t = eq_target().with_offset(Coord::from_degrees(Frame::Gal, 0.0, 1.0));
    let result = get_cen_otf(&mut ids, &t, &leg(ScanAxis::Lon, Direction::Inc));
    assert!(matches!(result, Err(ScheduleError::OffsetFrameMismatch { .. })));

    // EQ targets may be swept in HOR.
    let hor_leg = OtfLeg {
        scan_frame: Frame::Hor,
        ..leg(ScanAxis::Lon, Direction::Inc)
    };
    assert!(get_cen_otf(&mut ids, &eq_target(), &hor_leg).is_ok());

    // Nothing else mixes.
    let gal = Target::new("g", Coord::from_degrees(Frame::Gal, 10.0, 0.0));
    let result = get_cen_otf(&mut ids, &gal, &hor_leg);
    assert!(matches!(result, Err(ScheduleError::IncompatibleFrames { .. })));
}

#[test]
fn test_cen_otf_tsys_position_and_ids() {
    let mut ids = IdCounter::for_subscans();
    let beamsize = Angle::from_degrees(0.1);
    let (ss, st) = get_cen_otf_tsys(
        &mut ids,
        &eq_target(),
        &leg(ScanAxis::Lat, Direction::Inc),
        beamsize,
    )
    .unwrap();
    assert_eq!(st.id, 1);
    assert_eq!(ss.id, 2);
    // 2 / 2 + 0.1 * 5 before the start of an increasing sweep
    assert_abs_diff_eq!(st.target.offset.lon.deg(), -1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(st.target.offset.lat.deg(), 0.5);

    let (_, st) = get_cen_otf_tsys(
        &mut ids,
        &eq_target(),
        &leg(ScanAxis::Lon, Direction::Dec),
        beamsize,
    )
    .unwrap();
    assert_abs_diff_eq!(st.target.offset.lon.deg(), 0.5);
    assert_abs_diff_eq!(st.target.offset.lat.deg(), 1.5, epsilon = 1e-12);
}

#[test]
fn test_extrude_from_rectangle() {
    let extremes = [(0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (0.0, 3.0)];
    assert_eq!(extrude_from_rectangle(1.0, 0.0, &extremes, 10.0), (1.0, -10.0));
    assert_eq!(extrude_from_rectangle(1.0, 3.0, &extremes, 10.0), (1.0, 13.0));
    assert_eq!(extrude_from_rectangle(0.0, 1.5, &extremes, 10.0), (-10.0, 1.5));
    assert_eq!(extrude_from_rectangle(5.0, 1.5, &extremes, 10.0), (15.0, 1.5));
    // Inside: the nearest side wins.
    assert_eq!(extrude_from_rectangle(4.0, 1.5, &extremes, 1.0), (6.0, 1.5));
    assert_eq!(extrude_from_rectangle(2.5, 0.5, &extremes, 1.0), (2.5, -1.0));
    // No rectangle: nothing to extrude from.
    assert_eq!(extrude_from_rectangle(1.0, 2.0, &[], 1.0), (1.0, 2.0));
}

#[test]
fn test_sid_and_off_tsys() {
    let mut ids = IdCounter::for_subscans();
    let extremes = [(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)];
    let beamsize = Angle::from_degrees(0.2);
    let point = Coord::from_degrees(Frame::Eq, 1.0, 0.0);

    let (ss, st) =
        get_sid_tsys(&mut ids, &eq_target(), &point, &extremes, 4.0, beamsize).unwrap();
    assert_eq!(ss.target.offset, point);
    assert_abs_diff_eq!(ss.duration, 4.0);
    assert_abs_diff_eq!(st.target.offset.lon.deg(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(st.target.offset.lat.deg(), 0.0);
    assert!(st.id < ss.id);

    let (ss, st) =
        get_off_tsys(&mut ids, &eq_target(), &point, &extremes, 4.0, beamsize).unwrap();
    assert_eq!(ss.target.offset, st.target.offset);
    assert!(!ss.is_tsys);
}

#[test]
fn test_skydip_line() {
    let mut ids = IdCounter::for_subscans();
    let offset = Coord::from_degrees(Frame::Hor, 1.0, 0.0);
    let (ss, st) = get_skydip_tsys(
        &mut ids,
        7,
        &eq_target(),
        60.0,
        (Angle::from_degrees(88.0), Angle::from_degrees(15.0)),
        &offset,
    )
    .unwrap();
    assert_eq!(st.id, 1);
    assert_eq!(ss.typename(), "SKYDIP");
    assert_eq!(
        ss.to_string(),
        "2\tSKYDIP\t7\t88.0000d\t15.0000d\t60.000000\t-HOROFFS\t1.0000d\t0.0000d"
    );
}

#[test]
fn test_sidereal_line() {
    let mut ids = IdCounter::for_subscans();
    let s = get_sidereal(&mut ids, &eq_target(), &Coord::null(), 1.0, false).unwrap();
    let line = s.to_string();
    assert!(line.starts_with("1\tSIDEREAL\tsrc\tEQ\t10.0000d\t20.0000d\tj2000\t"));

    let hor = Target::new("h", Coord::from_degrees(Frame::Hor, 10.0, 20.0));
    let s = get_sidereal(&mut ids, &hor, &Coord::null(), 1.0, false).unwrap();
    assert!(!s.to_string().contains("j2000"));
}
