//! End-to-end coverage: runner, reporters, and JSON output together.

use opbench::{
    from_fn, Measurement, Reporter, RunResults, Runner, RunnerConfig, Summary,
};
use std::sync::{Arc, Mutex};

fn ceiling_config(repetitions: u64) -> RunnerConfig {
    // A no-op cannot span 1 ms within 1000 iterations, so every repetition
    // terminates through the iteration ceiling and stays fast.
    RunnerConfig::new()
        .min_runtime_ns(1_000_000)
        .max_iterations(1000)
        .repetitions(repetitions)
        .log_level(0)
}

#[test]
fn writes_parseable_json_results() {
    let dir = tempfile::tempdir().unwrap();
    let config = ceiling_config(3).output_dir(dir.path());
    let mut runner = Runner::with_config(config);

    let mut unit = from_fn(|| {});
    let results = runner.run("noop", &mut unit).unwrap();
    assert_eq!(results.accepted.len(), 3);

    let path = dir.path().join("noop.json");
    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["name"], "noop");
    assert_eq!(json["repetitions"], 3);
    assert_eq!(json["max_iterations"], 1000);
    assert_eq!(json["accepted"].as_array().unwrap().len(), 3);
    assert!(json["summary"]["mean"]["run_time_ns"].is_u64());
    assert!(json["summary"]["std_dev"]["run_time_ns"].is_u64());
}

#[test]
fn sanitizes_slashes_in_json_filenames() {
    let dir = tempfile::tempdir().unwrap();
    let config = ceiling_config(1).output_dir(dir.path());
    let mut runner = Runner::with_config(config);

    let mut unit = from_fn(|| {});
    runner.run("suite/noop", &mut unit).unwrap();

    assert!(dir.path().join("suite_noop.json").exists());
}

/// Reporter that records the order of runner callbacks through a shared log.
#[derive(Clone, Default)]
struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl Reporter for EventLog {
    fn run_start(&self, name: &str, _config: &RunnerConfig) {
        self.events.lock().unwrap().push(format!("start:{}", name));
    }

    fn attempt(&self, _name: &str, m: &Measurement) {
        self.events
            .lock()
            .unwrap()
            .push(format!("attempt:{}", m.iterations));
    }

    fn accepted(&self, _name: &str, m: &Measurement) {
        self.events
            .lock()
            .unwrap()
            .push(format!("accepted:{}", m.iterations));
    }

    fn summary(&self, _name: &str, _summary: &Summary) {
        self.events.lock().unwrap().push("summary".to_string());
    }

    fn run_end(
        &self,
        _name: &str,
        _config: &RunnerConfig,
        _results: &RunResults,
        _summary: Option<&Summary>,
    ) {
        self.events.lock().unwrap().push("end".to_string());
    }
}

#[test]
fn notifies_reporters_in_lifecycle_order() {
    let log = EventLog::default();
    let mut runner = Runner::with_config(ceiling_config(2));
    runner.reporters(vec![Box::new(log.clone())]);

    let mut unit = from_fn(|| {});
    runner.run("noop", &mut unit).unwrap();

    let events = log.events.lock().unwrap();
    assert_eq!(events.first().unwrap(), "start:noop");
    assert_eq!(
        events.iter().filter(|e| e.starts_with("accepted:")).count(),
        2
    );
    assert_eq!(&events[events.len() - 2], "summary");
    assert_eq!(events.last().unwrap(), "end");

    // Attempts precede the acceptance they led to.
    let first_accepted = events.iter().position(|e| e.starts_with("accepted:")).unwrap();
    assert!(events[1..first_accepted]
        .iter()
        .all(|e| e.starts_with("attempt:")));
}

#[test]
fn skips_summary_when_zero_repetitions() {
    let log = EventLog::default();
    let mut runner = Runner::with_config(ceiling_config(0));
    runner.reporters(vec![Box::new(log.clone())]);

    let mut unit = from_fn(|| {});
    let results = runner.run("noop", &mut unit).unwrap();

    assert!(results.is_empty());
    assert!(log.events.lock().unwrap().is_empty());
}
