use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn command() -> Command {
    let mut cmd = Command::new(cargo_bin!("funds-transfer"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = command();
    cmd.arg("tests/fixtures/accounts.csv")
        .arg("tests/fixtures/transfers.csv")
        .arg("--workers")
        .arg("1");

    cmd.assert()
        .success()
        .stdout("account,balance\nA,800\nB,700\n")
        .stderr(predicate::str::contains("Error processing transfer"))
        .stderr(predicate::str::contains("Account not found: Z"))
        .stderr(predicate::str::contains("Amount must be positive"));

    Ok(())
}

#[test]
fn test_cli_concurrent_workers() {
    let mut accounts = NamedTempFile::new().unwrap();
    writeln!(accounts, "account, balance").unwrap();
    writeln!(accounts, "A, 100.00").unwrap();
    writeln!(accounts, "B, 5").unwrap();
    writeln!(accounts, "C, 100").unwrap();

    let mut transfers = NamedTempFile::new().unwrap();
    writeln!(transfers, "from, to, amount").unwrap();
    for _ in 0..10000 {
        writeln!(transfers, "A, B, 0.01").unwrap();
        writeln!(transfers, "C, B, 0.01").unwrap();
    }

    let mut cmd = command();
    cmd.arg(accounts.path())
        .arg(transfers.path())
        .arg("--workers")
        .arg("4");

    cmd.assert()
        .success()
        .stdout("account,balance\nA,0\nB,205\nC,0\n");
}

#[test]
fn test_cli_skips_malformed_rows() {
    let mut accounts = NamedTempFile::new().unwrap();
    writeln!(accounts, "account,balance").unwrap();
    writeln!(accounts, "A,10").unwrap();
    writeln!(accounts, "B,0").unwrap();

    let mut transfers = NamedTempFile::new().unwrap();
    writeln!(transfers, "from,to,amount").unwrap();
    writeln!(transfers, "A,B,1.5").unwrap();
    writeln!(transfers, "A,B,not_a_number").unwrap();
    writeln!(transfers, "A,B,0.001").unwrap();
    writeln!(transfers, "A,B,2").unwrap();

    let mut cmd = command();
    cmd.arg(accounts.path())
        .arg(transfers.path())
        .arg("--workers")
        .arg("1");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading transfer"))
        .stdout("account,balance\nA,6.5\nB,3.5\n");
}

#[test]
fn test_cli_json_output() {
    let mut cmd = command();
    cmd.arg("tests/fixtures/accounts.csv")
        .arg("tests/fixtures/transfers.csv")
        .arg("--workers")
        .arg("1")
        .arg("--format")
        .arg("json");

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());

    let balances: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(balances[0]["account"], "A");
    assert_eq!(balances[0]["balance"], "800");
    assert_eq!(balances[1]["account"], "B");
    assert_eq!(balances[1]["balance"], "700");
}

#[test]
fn test_cli_rejects_duplicate_accounts() {
    let mut accounts = NamedTempFile::new().unwrap();
    writeln!(accounts, "account,balance").unwrap();
    writeln!(accounts, "A,10").unwrap();
    writeln!(accounts, "A,20").unwrap();

    let mut cmd = command();
    cmd.arg(accounts.path()).arg("tests/fixtures/transfers.csv");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate account: A"));
}

#[test]
fn test_cli_requires_at_least_one_worker() {
    let mut cmd = command();
    cmd.arg("tests/fixtures/accounts.csv")
        .arg("tests/fixtures/transfers.csv")
        .arg("--workers")
        .arg("0");

    cmd.assert().failure();
}
