use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Build a `balanza` command homed in a temp directory, so settings and the
/// database never touch the real user profile.
fn balanza(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("balanza").unwrap();
    cmd.env("HOME", home);
    cmd
}

fn init(home: &Path) {
    let data_dir = home.join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    balanza(home)
        .args(["init", "--data-dir", data_dir.to_str().unwrap(), "--store-name", "Electro Tigre"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized balanza"));
}

#[test]
fn init_and_status() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    balanza(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Store:      Electro Tigre"))
        .stdout(predicate::str::contains("Journal entries: 0"));
}

#[test]
fn accounts_list_shows_seeded_chart() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    balanza(home.path())
        .args(["accounts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.1.01"))
        .stdout(predicate::str::contains("Caja"))
        .stdout(predicate::str::contains("negative_result"));
}

#[test]
fn post_entry_and_report_balance() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    balanza(home.path())
        .args([
            "entry", "add",
            "--date", "2025-03-10",
            "--memo", "Venta de contado",
            "--debit", "1.1.01=100",
            "--credit", "4.1.01=100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted entry"));

    balanza(home.path())
        .args(["report", "balance", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trial Balance 2025-03-01 to 2025-03-31"))
        .stdout(predicate::str::contains("1.1.01"))
        .stdout(predicate::str::contains("debtor"))
        .stdout(predicate::str::contains("debits equal credits"));
}

#[test]
fn unbalanced_entry_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    balanza(home.path())
        .args([
            "entry", "add",
            "--date", "2025-03-10",
            "--debit", "1.1.01=100",
            "--credit", "4.1.01=90",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unbalanced entry"));

    // Nothing was written.
    balanza(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Journal entries: 0"));
}

#[test]
fn unknown_account_in_posting() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    balanza(home.path())
        .args([
            "entry", "add",
            "--date", "2025-03-10",
            "--debit", "9.9.99=100",
            "--credit", "4.1.01=100",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown account: 9.9.99"));
}

#[test]
fn aux_ledger_reconciles() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());

    balanza(home.path())
        .args(["aux", "add", "1.1.01", "Caja chica"])
        .assert()
        .success();
    balanza(home.path())
        .args(["aux", "line", "Caja chica", "--kind", "income", "--amount", "100", "--date", "2025-03-03"])
        .assert()
        .success();
    balanza(home.path())
        .args([
            "entry", "add",
            "--date", "2025-03-03",
            "--debit", "1.1.01=100",
            "--credit", "4.1.01=100",
        ])
        .assert()
        .success();

    balanza(home.path())
        .args(["aux", "reconcile", "Caja chica"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BALANCED"));
}

#[test]
fn rate_set_and_show() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    balanza(home.path())
        .args(["rate", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No exchange rate recorded"));
    balanza(home.path())
        .args(["rate", "set", "1325.50"])
        .assert()
        .success();
    balanza(home.path())
        .args(["rate", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rate: 1325.50"));
}

#[test]
fn demo_seeds_and_reports() {
    let home = tempfile::tempdir().unwrap();
    init(home.path());
    balanza(home.path())
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded demo data"));
    balanza(home.path())
        .args(["report", "balance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Electro Tigre"))
        .stdout(predicate::str::contains("4.1.01"));
    balanza(home.path())
        .args(["products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moto G84"))
        .stdout(predicate::str::contains("rate 1325.50"));
}
