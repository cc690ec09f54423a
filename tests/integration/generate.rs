// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::read_to_string;

use super::*;

const EXTENSIONS: [&str; 4] = ["scd", "lis", "cfg", "bck"];

fn generate(dir: &TempDir, out: &Path, extra: &[&str]) -> Result<Output, OutputError> {
    let config = dir.path().join("configuration.toml");
    basie()
        .arg("generate")
        .args(extra)
        .args([
            "-c",
            &format!("{}", config.display()),
            &format!("{}", out.display()),
        ])
        .ok()
}

#[test]
fn test_generate_from_templates() {
    let dir = templates_dir();
    let out = dir.path().join("schedule");
    let cmd = generate(&dir, &out, &[]);
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));

    for ext in EXTENSIONS {
        assert!(out.join(format!("myschedule.{ext}")).exists(), "no .{ext}");
    }

    let scd = read_to_string(out.join("myschedule.scd")).unwrap();
    assert!(scd.starts_with("# Generated with basie version"));
    assert!(scd.contains("PROJECT:\t\tmyproject\n"));
    assert!(scd.contains("SCANLIST:\t\tmyschedule.lis\n"));
    assert!(scd.contains("\nSC:\t1\t3C286\tTP:MANAGEMENT/FitsZilla\tscanlayout_1_3C286\n"));
    assert!(scd.contains("SARDARA:MANAGEMENT/FitsZilla"));

    let lis = read_to_string(out.join("myschedule.lis")).unwrap();
    assert!(lis.contains("\tSKYDIP\t"));
    assert!(lis.contains("\tOTF\t3C286\t"));
    assert!(lis.contains("\tSIDEREAL\tM31\t"));

    let cfg = read_to_string(out.join("myschedule.cfg")).unwrap();
    assert!(cfg.contains("INIT{\n"));
    assert!(cfg.contains("TSYS{\n"));

    let bck = read_to_string(out.join("myschedule.bck")).unwrap();
    assert!(bck.contains("TP:BACKENDS/TotalPower{\n"));
    assert!(bck.contains("SARDARA:BACKENDS/Sardara{\n"));
    // Unused backends are not written.
    assert!(!bck.contains("XARCOS"));
}

#[test]
fn test_generate_refuses_to_overwrite() {
    let dir = templates_dir();
    let out = dir.path().join("schedule");
    let cmd = generate(&dir, &out, &[]);
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let first = read_to_string(out.join("myschedule.scd")).unwrap();

    let cmd = generate(&dir, &out, &[]);
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("already exists"), "{stderr}");

    let cmd = generate(&dir, &out, &["-f"]);
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert_eq!(read_to_string(out.join("myschedule.scd")).unwrap(), first);
}

#[test]
fn test_generate_dry_run() {
    let dir = templates_dir();
    let out = dir.path().join("schedule");
    let cmd = generate(&dir, &out, &["--dry-run"]);
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Schedule myschedule"), "{stdout}");
    assert!(!out.exists());
}

#[test]
fn test_schedule_alias_and_json_config() {
    let dir = TempDir::new().unwrap();
    make_file_in_dir(
        "targets.txt",
        dir.path(),
        "3C286 cross TP EQ 13:31:08.3h 30:30:33\n",
    );
    let config = make_file_in_dir(
        "conf.json",
        dir.path(),
        r#"{
            "project_id": "p",
            "observer": "o",
            "schedule_label": "json",
            "radiotelescope": "med",
            "receiver": "C",
            "rest_frequency": [5000.0],
            "scantypes": {
                "cross": { "type": "cross", "frame": "EQ", "length": "0.5d", "speed": 3.0 }
            },
            "backends": {
                "TP": { "type": "totalpower", "integration": 40.0, "sampling_interval": 0.04, "bandwidth": 730.0 }
            }
        }"#,
    );
    let cmd = basie()
        .args([
            "schedule",
            "-c",
            &format!("{}", config.display()),
            &format!("{}", dir.path().display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(dir.path().join("json.scd").exists());
}

#[test]
fn test_generate_reports_bad_configuration() {
    let dir = templates_dir();
    let config = dir.path().join("configuration.toml");
    let contents = read_to_string(&config)
        .unwrap()
        .replace("receiver = \"C\"", "receiver = \"Q\"");
    make_file_in_dir("configuration.toml", dir.path(), &contents);

    let cmd = generate(&dir, &dir.path().join("out"), &[]);
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("Q"), "{stderr}");
}

#[test]
fn test_generate_missing_configuration() {
    let dir = TempDir::new().unwrap();
    let cmd = generate(&dir, &dir.path().join("out"), &[]);
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("configuration.toml"), "{stderr}");
}
