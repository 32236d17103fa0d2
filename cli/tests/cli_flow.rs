//! Command flows against a real ledger file in a temp directory.

use std::fs;
use std::path::Path;

use electoral_cli::commands::{self, StatusReport};
use electoral_cli::{CliError, LedgerFile};
use electoral_ledger::{ElectionPhase, LedgerError, LedgerEvent};
use electoral_types::{AccountAddress, Candidate, StateResult};
use tempfile::TempDir;

fn owner() -> AccountAddress {
    AccountAddress::parse("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap()
}

fn intruder() -> AccountAddress {
    AccountAddress::parse("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap()
}

fn deployed() -> (TempDir, LedgerFile) {
    let dir = tempfile::tempdir().unwrap();
    let file = LedgerFile::new(dir.path().join("election.ledger"));
    commands::deploy(&file, owner(), false).unwrap();
    (dir, file)
}

fn write_results(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("results.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn deploy_refuses_to_clobber_without_force() {
    let (_dir, file) = deployed();
    commands::submit(&file, &owner(), StateResult::new("California", 1000, 900, 32)).unwrap();

    let err = commands::deploy(&file, owner(), false).unwrap_err();
    assert!(matches!(err, CliError::LedgerExists(_)));
    assert_eq!(commands::status(&file).unwrap().states.len(), 1);

    let report = commands::deploy(&file, intruder(), true).unwrap();
    assert_eq!(report.owner, intruder());
    let status = commands::status(&file).unwrap();
    assert_eq!(status.owner, intruder());
    assert!(status.states.is_empty());
}

#[test]
fn fresh_ledger_status() {
    let (_dir, file) = deployed();
    let status = commands::status(&file).unwrap();
    assert_eq!(
        status,
        StatusReport {
            owner: owner(),
            leader: Candidate::Nobody,
            phase: ElectionPhase::Open,
            seats_a: 0,
            seats_b: 0,
            seats_total: 0,
            states: vec![],
        }
    );
}

#[test]
fn submissions_persist_across_invocations() {
    let (_dir, file) = deployed();

    let first = commands::submit(&file, &owner(), StateResult::new("California", 1000, 900, 32))
        .unwrap();
    assert_eq!(
        first.events,
        vec![
            LedgerEvent::StateResultAccepted {
                state: "California".into(),
                winner: Candidate::CandidateA,
                seats: 32,
            },
            LedgerEvent::LeaderChanged {
                previous: Candidate::Nobody,
                current: Candidate::CandidateA,
            },
        ]
    );

    let second =
        commands::submit(&file, &owner(), StateResult::new("Ohio", 800, 1200, 33)).unwrap();
    assert_eq!(second.status.leader, Candidate::CandidateB);

    let status = commands::status(&file).unwrap();
    assert_eq!((status.seats_a, status.seats_b), (32, 33));
    assert_eq!(status.seats_total, 65);
    assert_eq!(status.leader, Candidate::CandidateB);
}

#[test]
fn rejected_submission_leaves_file_untouched() {
    let (_dir, file) = deployed();
    commands::submit(&file, &owner(), StateResult::new("California", 1000, 900, 32)).unwrap();
    let before = fs::read(file.path()).unwrap();

    let err = commands::submit(&file, &intruder(), StateResult::new("Ohio", 800, 1200, 33))
        .unwrap_err();
    assert!(matches!(
        err,
        CliError::Ledger(LedgerError::Unauthorized { .. })
    ));

    let err = commands::submit(&file, &owner(), StateResult::new("California", 1000, 900, 32))
        .unwrap_err();
    assert!(matches!(err, CliError::Ledger(LedgerError::DuplicateState(_))));

    assert_eq!(fs::read(file.path()).unwrap(), before);
}

#[test]
fn end_closes_the_ledger_for_good() {
    let (_dir, file) = deployed();
    commands::submit(&file, &owner(), StateResult::new("California", 1000, 900, 32)).unwrap();

    let report = commands::end(&file, &owner()).unwrap();
    assert_eq!(
        report.events,
        vec![LedgerEvent::ElectionEnded {
            leader: Candidate::CandidateA
        }]
    );
    assert_eq!(report.status.phase, ElectionPhase::Closed);

    let err = commands::submit(&file, &owner(), StateResult::new("Ohio", 800, 1200, 33))
        .unwrap_err();
    assert!(matches!(err, CliError::Ledger(LedgerError::ElectionClosed)));

    let err = commands::end(&file, &owner()).unwrap_err();
    assert!(matches!(err, CliError::Ledger(LedgerError::AlreadyEnded)));

    let status = commands::status(&file).unwrap();
    assert_eq!(status.leader, Candidate::CandidateA);
    assert_eq!(status.phase, ElectionPhase::Closed);
}

#[test]
fn import_applies_each_entry_on_its_own() {
    let (dir, file) = deployed();
    let results = write_results(
        dir.path(),
        r#"
            [[result]]
            name = "California"
            votes_a = 1000
            votes_b = 900
            seats = 32

            [[result]]
            name = "Nevada"
            votes_a = 500
            votes_b = 500
            seats = 6

            [[result]]
            name = "Ohio"
            votes_a = 800
            votes_b = 1200
            seats = 33

            [[result]]
            name = "California"
            votes_a = 1
            votes_b = 2
            seats = 32

            [[result]]
            name = "Guam"
            votes_a = 10
            votes_b = 3
            seats = 0
        "#,
    );

    let report = commands::import(&file, &owner(), &results).unwrap();
    assert_eq!(report.accepted, 2);
    let kinds: Vec<_> = report
        .rejected
        .iter()
        .map(|r| (r.state.as_str(), r.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Nevada", "tied_result"),
            ("California", "duplicate_state"),
            ("Guam", "invalid_seat_count"),
        ]
    );

    let status = commands::status(&file).unwrap();
    assert_eq!((status.seats_a, status.seats_b), (32, 33));
    assert_eq!(status.leader, Candidate::CandidateB);
    let names: Vec<_> = status.states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["California", "Ohio"]);
}

#[test]
fn import_by_non_owner_saves_nothing() {
    let (dir, file) = deployed();
    let before = fs::read(file.path()).unwrap();
    let results = write_results(
        dir.path(),
        r#"
            [[result]]
            name = "Ohio"
            votes_a = 800
            votes_b = 1200
            seats = 33
        "#,
    );

    let report = commands::import(&file, &intruder(), &results).unwrap();
    assert_eq!(report.accepted, 0);
    assert_eq!(report.rejected[0].kind, "unauthorized");
    assert!(report.events.is_empty());
    assert_eq!(fs::read(file.path()).unwrap(), before);
}

#[test]
fn malformed_results_file_is_reported() {
    let (dir, file) = deployed();
    let results = write_results(dir.path(), "[[result]]\nname = \"Ohio\"\n");
    let err = commands::import(&file, &owner(), &results).unwrap_err();
    assert!(matches!(err, CliError::ResultsFile { .. }));
}

#[test]
fn commands_need_a_deployed_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let file = LedgerFile::new(dir.path().join("missing.ledger"));
    assert!(matches!(
        commands::status(&file),
        Err(CliError::LedgerMissing(_))
    ));
    assert!(matches!(
        commands::end(&file, &owner()),
        Err(CliError::LedgerMissing(_))
    ));
}

#[test]
fn reports_render_for_humans_and_json() {
    let (_dir, file) = deployed();
    let report =
        commands::submit(&file, &owner(), StateResult::new("California", 1000, 900, 32)).unwrap();

    let text = report.to_string();
    assert!(text.contains("accepted California: 32 seat(s) to candidate-a"));
    assert!(text.contains("leader:  candidate-a"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["events"][0]["event"], "state_result_accepted");
    assert_eq!(json["status"]["seats_a"], 32);
    assert_eq!(json["status"]["seats_total"], 32);
    assert!(text.contains("(32 awarded)"));
}
