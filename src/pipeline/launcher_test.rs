//! Tests for process launchers in pipeline::launcher

use super::launcher::*;

#[test]
fn test_dry_run_launcher() {
    let mut launcher = DryRunLauncher;
    let args = vec![String::from("-d"), String::from("graphs")];
    assert_eq!(launcher.launch("psql", &args).expect("dry run"), Some(0));
}

#[test]
fn test_missing_program() {
    let mut launcher = ProcessLauncher;
    let err = launcher
        .launch("graph_batch-no-such-program", &[])
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[cfg(unix)]
#[test]
fn test_process_exit_codes() {
    let mut launcher = ProcessLauncher;
    assert_eq!(launcher.launch("true", &[]).expect("true"), Some(0));
    assert_eq!(launcher.launch("false", &[]).expect("false"), Some(1));

    let args = vec![String::from("-c"), String::from("exit 7")];
    assert_eq!(launcher.launch("sh", &args).expect("sh"), Some(7));
}

#[test]
fn test_select_launcher() {
    let mut dry_run = select_launcher(true);
    assert_eq!(dry_run.launch("graph_batch-no-such-program", &[]).expect("dry run"), Some(0));

    let mut process = select_launcher(false);
    let err = process.launch("graph_batch-no-such-program", &[]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
