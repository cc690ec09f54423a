// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::read_to_string;

use super::*;

#[test]
fn test_templates_written() {
    let dir = templates_dir();
    let conf = read_to_string(dir.path().join("configuration.toml")).unwrap();
    assert!(conf.contains("schedule_label = \"myschedule\""));
    let targets = read_to_string(dir.path().join("targets.txt")).unwrap();
    assert!(targets.contains("3C286"));
}

#[test]
fn test_templates_create_directory() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("new").join("dir");
    let cmd = basie()
        .args(["templates", &format!("{}", dir.display())])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(dir.join("configuration.toml").exists());
    assert!(dir.join("targets.txt").exists());
}

#[test]
fn test_templates_keep_existing_files_unless_forced() {
    let dir = templates_dir();
    let targets = make_file_in_dir("targets.txt", dir.path(), "# mine\n");

    let cmd = basie()
        .args(["templates", &format!("{}", dir.path().display())])
        .ok();
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("not overwritten"), "{stdout}");
    assert_eq!(read_to_string(&targets).unwrap(), "# mine\n");

    let cmd = basie()
        .args(["templates", "-f", &format!("{}", dir.path().display())])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(read_to_string(&targets).unwrap().contains("3C286"));
}

#[test]
fn test_templates_dry_run_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let cmd = basie()
        .args([
            "--dry-run",
            "templates",
            &format!("{}", tmp.path().display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{:?}", get_cmd_output(cmd));
    assert!(!tmp.path().join("configuration.toml").exists());
}
