//! # Test Run Pipeline
//!
//! Drives redundant-path measurement batches through [`TestRun`] and checks
//! the status record and the pass-policy verdict.

use ndarray::Array3;
use num_complex::Complex64;

use rfperf_compliance::{MeasurementFile, RunError, TestRun, TestRunStatus};
use rfperf_core::{DeviceConfig, MeasurementPath, Network, NetworkDocument, RequirementSet};

const DEVICE_YAML: &str = r#"
name: LNA-2G
part_number: PN-1001
revision: B
supported_test_types: [s_parameter]
s_parameter_config:
  operational_band_hz: {start_hz: 1.0e9, stop_hz: 2.0e9}
  wideband_band_hz: {start_hz: 0.5e9, stop_hz: 3.0e9}
  port_labels: {1: RF IN, 2: RF OUT}
"#;

const REQUIREMENTS_YAML: &str = r#"
name: LNA acceptance
test_type: s_parameter
metric_limits:
  - metric_name: gain
    aggregation: min
    operator: ">="
    limit_value: -10.0
    frequency_band: {start_hz: 1.0e9, stop_hz: 2.0e9}
    description: Passband gain floor
  - metric_name: vswr
    aggregation: max
    operator: "<="
    limit_value: 2.0
    frequency_band: {start_hz: 1.0e9, stop_hz: 2.0e9}
  - metric_name: return_loss
    aggregation: min
    operator: ">="
    limit_value: 10.0
    frequency_band: {start_hz: 1.0e9, stop_hz: 2.0e9}
pass_policy:
  all_files_must_pass: false
  required_paths: [PRI, RED]
"#;

fn device() -> DeviceConfig {
    serde_yaml::from_str(DEVICE_YAML).unwrap()
}

fn requirements() -> RequirementSet {
    serde_yaml::from_str(REQUIREMENTS_YAML).unwrap()
}

/// Sweep from 0.5 to 3 GHz with constant S21 magnitude and S11 = S22 = 0.1.
fn network(s21: f64) -> Network {
    let freqs = vec![0.5e9, 1e9, 1.5e9, 2e9, 3e9];
    let s = Array3::from_shape_fn((freqs.len(), 2, 2), |(_, i, j)| match (i, j) {
        (1, 0) => Complex64::new(s21, 0.0),
        (0, 1) => Complex64::new(0.0, 0.0),
        _ => Complex64::new(0.1, 0.0),
    });
    Network::new(freqs, s).unwrap()
}

fn file(name: &str, path: MeasurementPath, s21: f64) -> MeasurementFile {
    MeasurementFile::new(name, network(s21)).with_path(path)
}

#[test]
fn both_paths_passing_completes_with_pass() {
    let mut run = TestRun::new("LNA-2G");
    run.mark_uploaded().unwrap();
    let files = [
        file("lna_pri.s2p", MeasurementPath::Pri, 0.5),
        file("lna_red.s2p", MeasurementPath::Red, 0.45),
    ];
    let reqs = requirements();
    let verdict = run.process(&files, &device(), &reqs).unwrap();

    assert!(verdict.passed);
    assert!(verdict.failure_reasons.is_empty());
    assert_eq!(run.status(), TestRunStatus::Completed);
    assert_eq!(run.requirement_hash(), Some(reqs.compute_hash().unwrap().as_str()));

    let first = &run.evaluations()[0];
    assert_eq!(first.compliance.requirements().len(), 3);
    assert_eq!(first.compliance.requirements()[0].requirement_name, "Passband gain floor");
    assert_eq!(first.compliance.requirements()[1].requirement_name, "vswr");
}

#[test]
fn one_failing_path_fails_required_path_check() {
    let mut run = TestRun::new("LNA-2G");
    let files = [
        file("lna_pri.s2p", MeasurementPath::Pri, 0.5),
        file("lna_red.s2p", MeasurementPath::Red, 0.1),
    ];
    let verdict = run.process(&files, &device(), &requirements()).unwrap();

    assert!(!verdict.passed);
    assert_eq!(
        verdict.failure_reasons,
        vec![
            "File 'lna_red.s2p' failed compliance".to_string(),
            "Required path 'RED' has no passing measurement file".to_string(),
        ]
    );
    assert_eq!(run.status(), TestRunStatus::Completed);
    let red = &run.evaluations()[1].compliance;
    assert_eq!(red.failure_reasons(), &["gain min = -20.000 >= -10.0 (limit)".to_string()]);
}

#[test]
fn path_tag_comes_from_network_document() {
    let doc = NetworkDocument::from_network(&network(0.5), Some(MeasurementPath::Red));
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["path"], "RED");

    let restored: NetworkDocument = serde_json::from_value(json).unwrap();
    let f = MeasurementFile::from_document("red.s2p", &restored).unwrap();
    assert_eq!(f.path, Some(MeasurementPath::Red));
    assert_eq!(f.network.port_count(), 2);
}

#[test]
fn one_port_file_fails_the_run() {
    let one_port = {
        let s = Array3::from_elem((2, 1, 1), Complex64::new(0.1, 0.0));
        Network::new(vec![1e9, 2e9], s).unwrap()
    };
    let files = [
        file("lna_pri.s2p", MeasurementPath::Pri, 0.5),
        MeasurementFile::new("load.s1p", one_port),
    ];
    let mut run = TestRun::new("LNA-2G");
    let err = run.process(&files, &device(), &requirements()).unwrap_err();

    assert!(matches!(err, RunError::Metrics { ref file, .. } if file == "load.s1p"));
    assert_eq!(
        run.error_message(),
        Some("file 'load.s1p': port 2 is invalid for 1-port device")
    );
    assert_eq!(run.status(), TestRunStatus::Failed);
    assert_eq!(run.evaluations().len(), 1);
    assert!(run.verdict().is_none());
}

#[test]
fn run_record_serializes() {
    let mut run = TestRun::new("LNA-2G");
    run.process(
        &[file("lna_pri.s2p", MeasurementPath::Pri, 0.5)],
        &device(),
        &requirements(),
    )
    .unwrap();
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["transitions"].as_array().unwrap().len(), 2);
    assert_eq!(json["evaluations"][0]["path"], "PRI");
    assert_eq!(json["verdict"]["passed"], false);
    assert_eq!(
        json["verdict"]["failure_reasons"][0],
        "Required path 'RED' has no passing measurement file"
    );

    let back: TestRun = serde_json::from_value(json).unwrap();
    assert_eq!(back.id(), run.id());
    assert_eq!(back.status(), TestRunStatus::Completed);
}
