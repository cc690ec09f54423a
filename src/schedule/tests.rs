// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::num::NonZeroUsize;

use super::*;

use indoc::indoc;
use tempfile::TempDir;

use crate::{
    angle::Angle,
    coord::{Coord, Frame, ScanAxis},
    procedure,
    scanmode::{CrossScan, MapGeometry, MapSampling, OtfMapScan, StartPoint},
};

fn schedule() -> Schedule {
    let mut s = Schedule::new("proj", "me", "sched", "srt", "c", vec![6700.0]).unwrap();
    s.add_scantype(
        "cross",
        vec![ScanModeKind::Cross(CrossScan {
            frame: Frame::Eq,
            length: Angle::from_degrees(0.5),
            speed: 1.0,
        })],
    );
    s.add_scantype(
        "otf",
        vec![ScanAxis::Lon, ScanAxis::Lat]
            .into_iter()
            .map(|scan_axis| {
                ScanModeKind::OtfMap(OtfMapScan {
                    map: MapGeometry {
                        frame: Frame::Eq,
                        start_point: StartPoint::TL,
                        scan_axis,
                        length_x: Angle::from_degrees(0.2),
                        length_y: Angle::from_degrees(0.2),
                        sampling: MapSampling::ScansPerBeam(NonZeroUsize::new(2).unwrap()),
                    },
                    speed: 2.0,
                })
            })
            .collect(),
    );
    s.add_backend(
        "TP",
        Backend::total_power("TP", 40.0, 0.04, 730.0, None).unwrap(),
    );
    s.add_backend("XA", Backend::xarcos("XA", "XC00", None));
    s
}

fn target() -> Target {
    Target::new("src", Coord::from_degrees(Frame::Eq, 10.0, 20.0))
}

#[test]
fn test_new_schedule() {
    let s = schedule();
    assert_eq!(s.radiotelescope.name, "SRT");
    assert_eq!(s.receiver.name, "C");
    assert_eq!((s.repetitions, s.tsys), (1, 1));
    // One scan mode ID per mode, in declaration order.
    let ids: Vec<usize> = s.scantypes.values().flatten().map(|m| m.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    assert!(matches!(
        Schedule::new("p", "o", "l", "ALMA", "C", vec![1.0]),
        Err(ScheduleError::Receiver(_))
    ));
    assert!(matches!(
        Schedule::new("p", "o", "l", "SRT", "Q", vec![1.0]),
        Err(ScheduleError::Receiver(_))
    ));
}

#[test]
fn test_totalpower_sections_follow_receiver() {
    let s = schedule();
    match &s.backends["TP"].kind {
        crate::backend::BackendKind::TotalPower(tp) => {
            assert_eq!(tp.sections().len(), s.receiver.nifs())
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_add_scan() {
    let mut s = schedule().with_defaults(2, 0);
    s.add_scan(target(), "cross", "TP").unwrap();
    // BOTH-style scan types give one scan per mode.
    s.add_scan(target(), "otf", "TP").unwrap();
    assert_eq!(s.scans.len(), 3);
    assert_eq!(s.scans[0].repetitions, 2);
    assert_eq!(s.scans[0].tsys, TsysPolicy::Once);

    let mut overridden = target();
    overridden.repetitions = Some(5);
    overridden.tsys = Some(3);
    s.add_scan(overridden, "cross", "TP").unwrap();
    assert_eq!(s.scans[3].repetitions, 5);
    assert_eq!(s.scans[3].tsys, TsysPolicy::from(3));

    assert!(matches!(
        s.add_scan(target(), "nope", "TP"),
        Err(ScheduleError::UnknownScanType(_))
    ));
    assert!(matches!(
        s.add_scan(target(), "cross", "nope"),
        Err(ScheduleError::UnknownBackend(_))
    ));
}

#[test]
fn test_backend_without_tsys() {
    let mut s = schedule();
    s.add_scan(target(), "cross", "XA").unwrap();
    assert_eq!(s.scans[0].tsys, TsysPolicy::Never);

    let mut t = target();
    t.tsys = Some(2);
    assert!(matches!(
        s.add_scan(t, "cross", "XA"),
        Err(ScheduleError::TsysNotSupported { .. })
    ));
}

#[test]
fn test_ids_strictly_increase_and_procedures_are_known() {
    let mut s = schedule();
    s.add_scan(target(), "otf", "TP").unwrap();
    s.add_scan(target(), "cross", "TP").unwrap();
    let known = [
        procedure::NULL.clone(),
        procedure::TSYS.clone(),
        procedure::CALON.clone(),
        procedure::CALOFF.clone(),
    ];
    let mut last = 0;
    for subscans in s.subscans().unwrap() {
        for ss in subscans {
            assert!(ss.id > last);
            last = ss.id;
            assert!(known.contains(&ss.pre_procedure));
            assert!(known.contains(&ss.post_procedure));
        }
    }
}

#[test]
fn test_render() {
    let mut s = schedule();
    s.add_scan(target(), "cross", "TP").unwrap();
    let r = s.render().unwrap();
    assert_eq!(r.num_subscans, 8);

    let mut scd = r.scd.lines();
    assert_eq!(
        scd.next().unwrap(),
        format!("# Generated with basie version {}", env!("CARGO_PKG_VERSION"))
    );
    assert!(r.scd.contains(indoc! {"
        PROJECT:\t\tproj
        OBSERVER:\t\tme
        SCANLIST:\t\tsched.lis
        PROCEDURELIST:\t\tsched.cfg
        BACKENDLIST:\t\tsched.bck
        MODE:\t\t\tSEQ
        SCANTAG:\t\t1
        INITPROC:\t\tPROCEDURE_INIT

        SC:\t1\tsrc\tTP:MANAGEMENT/FitsZilla\tscanlayout_1_src
        1_1\t0.000000\t1\tPROCEDURE_NULL\tPROCEDURE_TSYS
        1_2\t30.000000\t2\tPROCEDURE_NULL\tPROCEDURE_NULL
    "}));

    assert!(r.lis.starts_with("#src\n1\tSIDEREAL\tTsys\tEQ\t"));
    assert_eq!(r.lis.lines().count(), 9);
    assert!(r.lis.lines().nth(2).unwrap().starts_with("2\tOTF\tsrc\t"));

    assert!(r.cfg.starts_with("PROCEDURE_INIT{\n\tnop\n}\n"));
    assert!(r.cfg.contains("PROCEDURE_TSYS{\n"));
    assert!(r.cfg.contains("PROCEDURE_NULL{\n}\n"));
    assert!(r.bck.starts_with("TP:BACKENDS/TotalPower{\n\tsetSection=0,*,730.000000,"));
}

#[test]
fn test_lis_lists_repeated_subscans_once() {
    let mut s = schedule().with_defaults(3, 0);
    s.add_scan(target(), "cross", "TP").unwrap();
    let r = s.render().unwrap();
    // 4 subscans per repetition plus one Tsys at the start
    assert_eq!(r.num_subscans, 13);
    // #label, then 4 science subscans and the single Tsys used
    assert_eq!(r.lis.lines().count(), 6);
    assert!(r.scd.contains("1_13\t"));
}

#[test]
fn test_write_files() {
    let mut s = schedule();
    s.add_scan(target(), "cross", "TP").unwrap();
    let r = s.render().unwrap();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");

    let paths = r.write(&out, false).unwrap();
    assert_eq!(paths.len(), 4);
    assert!(out.join("sched.scd").exists());
    assert_eq!(std::fs::read_to_string(out.join("sched.bck")).unwrap(), r.bck);

    assert!(matches!(
        r.write(&out, false),
        Err(ScheduleWriteError::FileExists(_))
    ));
    assert!(r.write(&out, true).is_ok());
}
