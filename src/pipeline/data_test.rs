//! Tests for DataProcessor in pipeline::data

use super::data::DataProcessor;
use super::launcher::recording::RecordingLauncher;
use super::{step_failure, JobProcessor};

#[test]
fn test_data_processor_default_run() {
    let (launcher, calls) = RecordingLauncher::new();
    let jobs = vec![String::from("data")];
    let mut data = DataProcessor::new("data", jobs, "bdtaunuhad_lite", "", false)
        .expect("DataProcessor::new should succeed")
        .with_launcher(Box::new(launcher));

    let reports = data.run().expect("run should succeed");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].suffix, "data");
    assert_eq!(reports[0].steps.len(), 2);

    let calls = calls.borrow();
    assert_eq!(
        *calls,
        vec![
            vec!["../extract_recograph", "extract_recograph_data.cfg"],
            vec!["psql", "-d", "bdtaunuhad_lite", "-f", "populate_graph_tables_data.sql"],
        ]
    );
}

#[test]
fn test_data_processor_never_runs_mcgraph() {
    let (launcher, calls) = RecordingLauncher::new();
    let jobs = vec![String::from("data"), String::from("data2")];
    let mut data = DataProcessor::new("data", jobs, "graphs", "", false)
        .expect("DataProcessor::new should succeed")
        .with_launcher(Box::new(launcher));

    data.run().expect("run should succeed");
    let calls = calls.borrow();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|call| !call[0].contains("mcgraph")));
    assert_eq!(calls[2][1], "extract_recograph_data2.cfg");
}

#[test]
fn test_data_processor_empty_jobs() {
    let (launcher, calls) = RecordingLauncher::new();
    let mut data = DataProcessor::new("data", vec![], "graphs", "", false)
        .expect("DataProcessor::new should succeed")
        .with_launcher(Box::new(launcher));

    let reports = data.run().expect("run should succeed");
    assert!(reports.is_empty());
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_data_processor_stops_on_failure() {
    let (launcher, calls) = RecordingLauncher::failing_at(0, Some(4));
    let jobs = vec![String::from("a"), String::from("b")];
    let mut data = DataProcessor::new("data", jobs, "graphs", "", false)
        .expect("DataProcessor::new should succeed")
        .with_launcher(Box::new(launcher));

    let err = data.run().unwrap_err();
    let failure = step_failure(&err).expect("step failure");
    assert_eq!(failure.label, "extracting recograph");
    assert_eq!(failure.code, Some(4));
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn test_data_processor_options() {
    let data = DataProcessor::new(
        "data",
        vec![],
        "graphs",
        "recograph=/opt/bin/extract_recograph;psql=/usr/bin/psql",
        true,
    )
    .expect("DataProcessor::new should succeed");
    assert_eq!(data.templates.recograph.exe, "/opt/bin/extract_recograph");
    assert_eq!(data.templates.psql, "/usr/bin/psql");
    assert!(data.templates.mcgraph.is_none());

    assert!(DataProcessor::new("data", vec![], "graphs", "mcgraph_cfg=x_{0}.cfg", false).is_err());
    assert!(DataProcessor::new("data", vec![], "graphs", "sql_script=x_{1}.sql", false).is_err());
}

#[test]
fn test_data_processor_dry_run() {
    let jobs = vec![String::from("data")];
    let options = "recograph=graph_batch-no-such-program";
    let mut data = DataProcessor::new("data", jobs, "graphs", options, true)
        .expect("DataProcessor::new should succeed");

    let reports = data.run().expect("dry run should not start any process");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].steps.len(), 2);
}
