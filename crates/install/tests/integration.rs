//! Integration tests for install crate

mod common;

use common::{FakeProcess, MemoryFs, RecordingSink};
use cpr_errors::{Error, InstallError, UserFacingError};
use cpr_install::*;
use cpr_platform::Platform;
use std::path::PathBuf;

const SCRIPT: &[u8] = b"#!/usr/bin/env bash\nexec cp -r \"$@\"\n";

fn installer(host: HostOs, config: InstallConfig, fs: &MemoryFs, process: &FakeProcess) -> Installer {
    Installer::new(
        config,
        host,
        Platform::new(Box::new(fs.clone()), Box::new(process.clone())),
    )
}

#[test]
fn test_install_into_writable_directory() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/usr/local/bin");
    let process = FakeProcess::succeeding();
    let sink = RecordingSink::default();

    let report = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&sink)
        .unwrap();

    assert_eq!(report.destination, PathBuf::from("/usr/local/bin/cpr"));
    assert_eq!(fs.file("/usr/local/bin/cpr").as_deref(), Some(SCRIPT));
    assert_eq!(fs.mode("/repo/cpr"), Some(0o755));
    assert!(!report.escalated);
    assert!(report.wrapper.is_none());
    assert_eq!(report.final_phase(), Some(InstallPhase::Succeeded));
    assert_eq!(
        report.phases,
        vec![
            InstallPhase::Start,
            InstallPhase::SourceChecked,
            InstallPhase::DirectoryResolved,
            InstallPhase::MadeExecutable,
            InstallPhase::Copied,
            InstallPhase::Succeeded,
        ]
    );
    assert!(process.captured().is_empty());
    assert!(process.interactive().is_empty());

    let events = sink.events();
    assert!(events.contains(&InstallEvent::MadeExecutable {
        script_name: "cpr".into()
    }));
    assert_eq!(
        events.last(),
        Some(&InstallEvent::Completed {
            script_name: "cpr".into(),
            destination: PathBuf::from("/usr/local/bin/cpr"),
            escalated_with: None,
        })
    );
}

#[test]
fn test_missing_source_touches_nothing() {
    let fs = MemoryFs::new().with_dir("/usr/local/bin");
    let process = FakeProcess::succeeding();

    let err = installer(HostOs::MacOs, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::SourceNotFound { ref path }) if path == "/repo/cpr"
    ));
    assert!(fs.mutations().is_empty());
    assert!(process.captured().is_empty());
}

#[test]
fn test_missing_install_directory_is_not_created() {
    let fs = MemoryFs::new().with_file("/repo/cpr", SCRIPT);
    let process = FakeProcess::succeeding();

    let err = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::InstallDirectoryMissing { .. })
    ));
    assert_eq!(err.remediation(), vec!["sudo mkdir -p /usr/local/bin"]);
    assert!(!fs.has_dir("/usr/local/bin"));
    assert!(fs.mutations().is_empty());
}

#[test]
fn test_unsupported_platform_aborts_without_mutation() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/usr/local/bin");
    let process = FakeProcess::succeeding();

    let err = installer(
        HostOs::from_identifier("freebsd"),
        InstallConfig::new("/repo/cpr"),
        &fs,
        &process,
    )
    .install(&NullSink)
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::UnsupportedPlatform { ref platform }) if platform == "freebsd"
    ));
    assert!(fs.mutations().is_empty());
    assert!(fs.file("/usr/local/bin/cpr").is_none());
}

#[test]
fn test_escalation_succeeds_after_permission_denied() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_read_only_dir("/usr/local/bin");
    let process = FakeProcess::elevating(fs.clone());
    let sink = RecordingSink::default();

    let report = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&sink)
        .unwrap();

    assert!(report.escalated);
    assert_eq!(fs.file("/usr/local/bin/cpr").as_deref(), Some(SCRIPT));
    assert_eq!(fs.mode("/usr/local/bin/cpr"), Some(0o755));
    assert_eq!(
        process.interactive(),
        vec![
            r#"sudo cp "/repo/cpr" "/usr/local/bin/cpr""#.to_string(),
            r#"sudo chmod 755 "/usr/local/bin/cpr""#.to_string(),
        ]
    );
    assert!(report
        .phases
        .contains(&InstallPhase::PermissionEscalationAttempted));
    assert!(!report.phases.contains(&InstallPhase::Copied));
    assert!(sink.events().contains(&InstallEvent::PermissionDenied {
        destination: PathBuf::from("/usr/local/bin/cpr"),
        escalating: true,
        program: "sudo".into(),
    }));
}

#[test]
fn test_failed_escalation_reports_manual_steps() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_read_only_dir("/usr/local/bin");
    let process = FakeProcess::failing();

    let err = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::EscalationFailed { .. })
    ));
    // A single attempt: the copy failed so chmod never ran
    assert_eq!(
        process.interactive(),
        vec![r#"sudo cp "/repo/cpr" "/usr/local/bin/cpr""#.to_string()]
    );
    assert_eq!(
        err.remediation(),
        vec![
            r#"sudo cp "/repo/cpr" "/usr/local/bin/cpr""#.to_string(),
            r#"sudo chmod 755 "/usr/local/bin/cpr""#.to_string(),
        ]
    );
    assert!(fs.file("/usr/local/bin/cpr").is_none());
}

#[test]
fn test_escalation_program_missing() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_read_only_dir("/usr/local/bin");
    let process = FakeProcess::missing();

    let err = installer(HostOs::MacOs, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::EscalationFailed { ref message, .. }) if message == "program not found"
    ));
    assert_eq!(process.interactive().len(), 1);
}

#[test]
fn test_elevation_disabled() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_read_only_dir("/usr/local/bin");
    let process = FakeProcess::elevating(fs.clone());
    let config = InstallConfig::new("/repo/cpr").with_elevation(false);

    let err = installer(HostOs::Linux, config, &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::PermissionDenied {
            administrator: false,
            ..
        })
    ));
    assert_eq!(err.remediation().len(), 2);
    assert!(process.interactive().is_empty());
    assert!(fs.file("/usr/local/bin/cpr").is_none());
}

#[test]
fn test_other_copy_failure_is_not_retried() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/usr/local/bin")
        .with_copy_error("No space left on device (os error 28)");
    let process = FakeProcess::elevating(fs.clone());

    let err = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::CopyFailed { ref message, .. })
            if message == "No space left on device (os error 28)"
    ));
    assert!(process.interactive().is_empty());
}

#[test]
fn test_install_dir_override() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/home/me/bin");
    let process = FakeProcess::succeeding();
    let config = InstallConfig::new("/repo/cpr").with_install_dir("/home/me/bin");

    let report = installer(HostOs::Linux, config, &fs, &process)
        .install(&NullSink)
        .unwrap();

    assert_eq!(report.destination, PathBuf::from("/home/me/bin/cpr"));
    assert_eq!(fs.file("/home/me/bin/cpr").as_deref(), Some(SCRIPT));
}

#[test]
fn test_windows_install_writes_launcher() {
    let npm_bin = PathBuf::from("/npm-global");
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/npm-global");
    let process = FakeProcess::new(|cmd| {
        let mut output = cpr_platform::CommandOutput::with_code(0);
        if cmd.get_args().iter().any(|a| a == "bin") {
            output.stdout = b"/npm-global\r\n".to_vec();
        }
        Ok(output)
    });
    let sink = RecordingSink::default();

    let report = installer(HostOs::Windows, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&sink)
        .unwrap();

    let destination = npm_bin.join("cpr");
    let wrapper = WindowsInstaller::wrapper_path(&destination);
    assert_eq!(report.destination, destination);
    assert_eq!(report.wrapper.as_ref(), Some(&wrapper));
    assert!(report.warnings.is_empty());

    let contents = String::from_utf8(fs.file(&wrapper.display().to_string()).unwrap()).unwrap();
    assert_eq!(contents, "@echo off\nbash \"%~dp0cpr\" %*");
    assert!(contents.contains("cpr"));
    assert!(contents.ends_with("%*"));

    // Permission bits are left alone on Windows
    assert_eq!(fs.mode("/repo/cpr"), None);
    assert!(sink
        .events()
        .contains(&InstallEvent::WrapperCreated { path: wrapper }));
    assert_eq!(
        process.captured(),
        vec!["bash --version".to_string(), "cmd \"/C\" npm bin -g".to_string()]
    );
}

#[test]
fn test_windows_missing_shell_warns_but_installs() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/appdata/npm");
    let process = FakeProcess::missing();
    let sink = RecordingSink::default();
    let config = InstallConfig::new("/repo/cpr").with_app_data(Some("/appdata".into()));

    let report = installer(HostOs::Windows, config, &fs, &process)
        .install(&sink)
        .unwrap();

    assert_eq!(report.install_dir, PathBuf::from("/appdata").join("npm"));
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[0].contains("bash not found"));
    assert!(matches!(
        sink.events().first(),
        Some(InstallEvent::Warning { .. })
    ));
}

#[test]
fn test_windows_permission_denied_is_not_escalated() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_read_only_dir("/appdata/npm");
    let process = FakeProcess::failing();
    let sink = RecordingSink::default();
    let config = InstallConfig::new("/repo/cpr").with_app_data(Some("/appdata".into()));

    let err = installer(HostOs::Windows, config, &fs, &process)
        .install(&sink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::PermissionDenied {
            administrator: true,
            ..
        })
    ));
    let destination = PathBuf::from("/appdata").join("npm").join("cpr");
    assert_eq!(
        err.remediation(),
        vec![format!("copy \"/repo/cpr\" \"{}\"", destination.display())]
    );
    assert!(process.interactive().is_empty());
    assert!(sink.events().contains(&InstallEvent::PermissionDenied {
        destination,
        escalating: false,
        program: "Administrator".into(),
    }));
}

#[test]
fn test_make_executable_failure_stops_before_copy() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/usr/local/bin")
        .with_mode_denied("/repo/cpr");
    let process = FakeProcess::elevating(fs.clone());

    let err = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Install(InstallError::MakeExecutableFailed { ref path, .. }) if path == "/repo/cpr"
    ));
    assert!(fs.mutations().is_empty());
    assert!(fs.file("/usr/local/bin/cpr").is_none());
    assert!(process.interactive().is_empty());
}

#[test]
fn test_copy_refused_after_write_check_passes() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_copy_denied_dir("/usr/local/bin");
    let process = FakeProcess::elevating(fs.clone());

    let report = installer(HostOs::Linux, InstallConfig::new("/repo/cpr"), &fs, &process)
        .install(&NullSink)
        .unwrap();

    // The copy's own refusal is enough to trigger the single retry
    assert!(report.escalated);
    assert_eq!(
        process.interactive(),
        vec![
            r#"sudo cp "/repo/cpr" "/usr/local/bin/cpr""#.to_string(),
            r#"sudo chmod 755 "/usr/local/bin/cpr""#.to_string(),
        ]
    );
    assert_eq!(fs.file("/usr/local/bin/cpr").as_deref(), Some(SCRIPT));
    assert_eq!(fs.mode("/usr/local/bin/cpr"), Some(0o755));
}

#[test]
fn test_windows_wrapper_failure_is_fatal() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_dir("/appdata/npm")
        .with_write_error("Access is denied. (os error 5)");
    let process = FakeProcess::succeeding();
    let sink = RecordingSink::default();
    let config = InstallConfig::new("/repo/cpr").with_app_data(Some("/appdata".into()));

    let err = installer(HostOs::Windows, config, &fs, &process)
        .install(&sink)
        .unwrap_err();

    let wrapper = WindowsInstaller::wrapper_path(&PathBuf::from("/appdata").join("npm").join("cpr"));
    assert!(matches!(
        err,
        Error::Install(InstallError::WrapperFailed { ref path, ref message })
            if *path == wrapper.display().to_string() && message == "Access is denied. (os error 5)"
    ));
    assert!(!sink
        .events()
        .iter()
        .any(|e| matches!(e, InstallEvent::WrapperCreated { .. } | InstallEvent::Completed { .. })));
}

#[test]
fn test_completion_names_configured_elevation_program() {
    let fs = MemoryFs::new()
        .with_file("/repo/cpr", SCRIPT)
        .with_read_only_dir("/usr/local/bin");
    let process = FakeProcess::elevating(fs.clone());
    let sink = RecordingSink::default();
    let mut config = InstallConfig::new("/repo/cpr");
    config.elevation_program = "doas".into();

    let report = installer(HostOs::Linux, config, &fs, &process)
        .install(&sink)
        .unwrap();

    assert!(report.escalated);
    assert_eq!(
        process.interactive()[0],
        r#"doas cp "/repo/cpr" "/usr/local/bin/cpr""#
    );
    assert_eq!(
        sink.events().last(),
        Some(&InstallEvent::Completed {
            script_name: "cpr".into(),
            destination: PathBuf::from("/usr/local/bin/cpr"),
            escalated_with: Some("doas".into()),
        })
    );
}
