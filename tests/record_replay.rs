//! Record-replay integration tests.
//!
//! 1. Replay a hand-built cassette through the polling and checkout flows.
//! 2. Record a live session against a stand-in `sscm` script, then replay
//!    the per-port cassettes and assert identical results.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde_json::json;

use surround_scm::cassette::config::CassetteConfig;
use surround_scm::cassette::recorder::CassetteRecorder;
use surround_scm::changelog::EditType;
use surround_scm::context::ServiceContext;
use surround_scm::error::PortError;
use surround_scm::ports::{BuildRecord, TaskListener};
use surround_scm::scm::{
    CheckoutOutcome, ConnectionConfig, PollingVerdict, RevisionState, ScmConfig, SurroundScm,
    TimestampZone,
};
use surround_scm::secret::Secret;

const EXPORT: &str = "total-2\n<src><A.txt><1><add><d><c><u>\n<src><B.txt><2><edit><d><c><u>\n";

struct Quiet;

impl TaskListener for Quiet {
    fn println(&self, _line: &str) {}
    fn fatal_error(&self, _line: &str) {}
}

#[derive(Default)]
struct FirstBuild {
    attached: Option<RevisionState>,
}

impl BuildRecord for FirstBuild {
    fn number(&self) -> u32 {
        1
    }

    fn timestamp(&self) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn previous_build_date(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn attach_revision(&mut self, revision: RevisionState) -> Result<(), PortError> {
        self.attached = Some(revision);
        Ok(())
    }
}

fn config(executable: &str) -> ScmConfig {
    let mut connection = ConnectionConfig::new(
        "scm.example.com",
        4900,
        "builder",
        Secret::new("s3cret"),
        "Mainline",
        "Mainline/Product",
    );
    connection.executable = executable.to_string();
    connection.timestamp_zone = TimestampZone::Utc;
    ScmConfig::new(connection)
}

fn write_scenario(path: &Path) {
    let mut recorder = CassetteRecorder::new(path, "scenario");
    // Polling: one clock read, one scratch id, one `sscm cc`.
    recorder.record("clock", "now", json!(null), json!("2024-06-15T10:30:00Z"));
    recorder.record("id_gen", "generate_id", json!(null), json!("poll-1"));
    recorder.record(
        "launcher",
        "launch",
        json!({"command": ["sscm", "cc"]}),
        json!({"ok": {"exit_code": 0, "stdout": "total-0\n"}}),
    );
    // Checkout: one clock read, `sscm get`, `sscm cc`.
    recorder.record("clock", "now", json!(null), json!("2024-06-15T10:30:00Z"));
    recorder.record(
        "launcher",
        "launch",
        json!({"command": ["sscm", "get"]}),
        json!({"ok": {"exit_code": 0, "stdout": ""}}),
    );
    recorder.record(
        "launcher",
        "launch",
        json!({"command": ["sscm", "cc"]}),
        json!({"ok": {"exit_code": 0, "stdout": EXPORT}}),
    );
    recorder.finish().expect("recording should succeed");
}

fn run_scenario(ctx: &ServiceContext, dir: &Path) -> (PollingVerdict, Vec<(String, EditType)>, RevisionState) {
    let scm = SurroundScm::new(config("sscm")).with_scratch_dir(dir);
    let verdict = scm.compute_polling_verdict(ctx, &RevisionState::never_built(), &Quiet);

    let mut build = FirstBuild::default();
    let outcome = scm.checkout(ctx, &mut build, &dir.join("ws"), &dir.join("changelog.txt"), &Quiet);
    let CheckoutOutcome::Done { changes, revision } = outcome else {
        panic!("checkout did not complete");
    };
    assert_eq!(build.attached, Some(revision));
    let entries = changes.iter().map(|e| (e.affected_file().to_string(), e.edit_type())).collect();
    (verdict, entries, revision)
}

#[test]
fn replayed_scenario_polls_then_checks_out() {
    let dir = tempfile::tempdir().unwrap();
    let cassette = dir.path().join("scenario.cassette.yaml");
    write_scenario(&cassette);

    let ctx = ServiceContext::replaying(&cassette).unwrap();
    let (verdict, entries, revision) = run_scenario(&ctx, dir.path());

    assert_eq!(verdict, PollingVerdict::NoChanges);
    assert_eq!(
        entries,
        vec![("src/A.txt".to_string(), EditType::Add), ("src/B.txt".to_string(), EditType::Edit)]
    );
    assert_eq!(revision.build_number(), 1);
    assert_eq!(revision.date().to_rfc3339(), "2024-06-15T10:30:00+00:00");

    // Determinism: a second replay of the same cassette gives the same answers.
    let ctx = ServiceContext::replaying(&cassette).unwrap();
    assert_eq!(run_scenario(&ctx, dir.path()), (verdict, entries, revision));
}

#[cfg(unix)]
#[test]
fn recorded_session_replays_identically() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fake-sscm");
    std::fs::write(&script, "#!/bin/sh\necho total-3\necho '<src><A.txt><1><add><d><c><u>'\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    let scm = SurroundScm::new(config(&script.display().to_string())).with_scratch_dir(dir.path());

    let recordings = dir.path().join("cassettes");
    let (ctx, session) = ServiceContext::recording_at(&recordings).unwrap();
    let recorded = scm.compute_polling_verdict(&ctx, &RevisionState::never_built(), &Quiet);
    drop(ctx);
    let session_dir = session.finish().unwrap();
    assert_eq!(recorded, PollingVerdict::Significant);

    let raw = std::fs::read_to_string(session_dir.join("launcher.cassette.yaml")).unwrap();
    assert!(raw.contains("******"));
    assert!(!raw.contains("s3cret"));

    let replay = ServiceContext::replaying_from(&CassetteConfig::from_session_dir(&session_dir)).unwrap();
    let replayed = scm.compute_polling_verdict(&replay, &RevisionState::never_built(), &Quiet);
    assert_eq!(replayed, recorded);
}
