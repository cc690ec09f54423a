// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;

use indexmap::IndexSet;
use indoc::indoc;

fn tp() -> Backend {
    Backend::total_power("TP", 10.0, 0.04, 300.0, Some("1,2".to_string())).unwrap()
}

#[test]
fn test_sardara_definition() {
    let b = Backend::sardara("prova");
    assert_eq!(b.to_string(), "prova:BACKENDS/Sardara{\n}\n");
    assert!(b.can_tsys());
}

#[test]
fn test_total_power_definition() {
    let mut b = tp();
    b.set_sections(2);
    assert_eq!(
        b.to_string(),
        indoc! {"
            TP:BACKENDS/TotalPower{
            \tsetSection=0,*,300.000000,*,*,0.025000,*
            \tsetSection=1,*,300.000000,*,*,0.025000,*
            \tintegration=10
            \tenable=1,2

            }
        "}
    );

    // Sections are replaced, not accumulated.
    b.set_sections(4);
    match &b.kind {
        BackendKind::TotalPower(tp) => assert_eq!(tp.sections().len(), 4),
        _ => unreachable!(),
    }
}

#[test]
fn test_total_power_bad_bandwidth() {
    let result = Backend::total_power("TP", 10.0, 0.04, 400.0, None);
    assert!(matches!(
        result,
        Err(ScheduleError::InvalidBandwidth { .. })
    ));
}

#[test]
fn test_xarcos_definition() {
    let b = Backend::xarcos("XA", "XC00", Some("0".to_string()));
    assert!(!b.can_tsys());
    assert_eq!(b.typename(), "XBackends");
    assert_eq!(
        b.to_string(),
        "XA:BACKENDS/XBackends{\n\tinitialize=XC00\n\tenable=0\n}\n"
    );
    let b = Backend::xarcos("XA", "skip", None);
    assert_eq!(b.to_string(), "XA:BACKENDS/XBackends{\n}\n");
}

#[test]
fn test_set_deduplication() {
    let mut set = IndexSet::new();
    set.insert(tp());
    let mut renamed = tp();
    renamed.name.push_str("CT");
    set.insert(renamed.clone());
    set.insert(renamed);
    assert_eq!(set.len(), 2);

    let mut sectioned = tp();
    sectioned.set_sections(2);
    assert_ne!(sectioned, tp());
}
