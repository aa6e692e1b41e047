use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn casa(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("casa").unwrap();
    cmd.env("CASA_SPLIT_DATA_DIR", dir.path())
        .env_remove("CASA_MEMBER")
        .env_remove("CASA_LOG");
    cmd
}

#[test]
fn share_prints_every_member() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["share", "900000", "arriendo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$630.000"))
        .stdout(predicate::str::contains("$135.000"));
}

#[test]
fn share_reports_rounding_loss() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["share", "100", "mercado"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$33"))
        .stdout(predicate::str::contains("rounding: -$1"));
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["share", "100", "luz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn decimal_amounts_are_rejected() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["share", "12.5", "mercado"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid money format"));
}

#[test]
fn init_writes_config() {
    let dir = TempDir::new().unwrap();
    casa(&dir).arg("init").assert().success();
    assert!(dir.path().join("config.json").exists());

    casa(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:    true"));
}

#[test]
fn expense_breakdown_for_a_month() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["expense", "add", "mercado", "90.000", "--date", "2025-03-05", "-d", "D1"])
        .assert()
        .success();

    casa(&dir)
        .args(["expense", "list", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arriendo mensual"))
        .stdout(predicate::str::contains("$1.170.000"));

    casa(&dir)
        .args(["expense", "breakdown", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marzo 2025"))
        .stdout(predicate::str::contains("$925.000"))
        .stdout(predicate::str::contains("$342.500"));
}

#[test]
fn pay_toggles() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["pay", "alex", "arriendo", "-m", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("paid Arriendo $630.000"));

    casa(&dir)
        .args(["pay", "alex", "arriendo", "-m", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unpaid"));
}

#[test]
fn fund_status_after_payment() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["fund", "pay", "alex", "-m", "2025-03"])
        .assert()
        .success();

    casa(&dir)
        .args(["fund", "status", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$175.000 / $350.000"))
        .stdout(predicate::str::contains("Missing $175.000"));
}

#[test]
fn debt_flow() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["debt", "add", "Banco", "500000", "-p", "urgente"])
        .assert()
        .success();
    casa(&dir)
        .args(["debt", "add", "Tio", "50000"])
        .assert()
        .success();

    casa(&dir)
        .args(["debt", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no plan"))
        .stdout(predicate::str::contains("Set a monthly budget"));

    casa(&dir)
        .args(["debt", "budget", "100000"])
        .assert()
        .success();

    casa(&dir)
        .args(["debt", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Banco"))
        .stdout(predicate::str::contains("Debt free by"));

    casa(&dir)
        .args(["debt", "pay", "tio", "80000", "--date", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tio is paid off!"));

    casa(&dir)
        .args(["debt", "pay", "tio", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already paid off"));

    casa(&dir)
        .args(["debt", "pay", "nadie", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Debt not found"));

    casa(&dir)
        .args(["debt", "payments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$50.000"));
}

#[test]
fn debts_are_per_member() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["debt", "add", "Banco", "500000", "--for", "alex"])
        .assert()
        .success();

    casa(&dir)
        .args(["debt", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No debts recorded."));

    casa(&dir)
        .args(["debt", "list"])
        .env("CASA_MEMBER", "alex")
        .assert()
        .success()
        .stdout(predicate::str::contains("Banco"));
}

#[test]
fn vehicle_alerts() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["vehicle", "km", "15000", "--date", "2025-03-01"])
        .assert()
        .success();
    casa(&dir)
        .args([
            "vehicle", "service", "oil", "45000", "--km", "12000", "--next-km", "15200", "--date",
            "2025-02-01",
        ])
        .assert()
        .success();

    casa(&dir)
        .args(["vehicle", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15000 km"))
        .stdout(predicate::str::contains("due in 200 km"));
}

#[test]
fn service_odometer_and_documents() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["vehicle", "service", "brakes", "35000", "--km", "16000", "--date", "2025-04-02"])
        .assert()
        .success();
    casa(&dir)
        .args(["vehicle", "config", "--payment", "380000", "--missed", "1", "--soat", "2099-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOAT:          2099-01-01"));

    casa(&dir)
        .args(["vehicle", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Odometer:      16000 km (2025-04-02)"))
        .stdout(predicate::str::contains("24000"))
        .stdout(predicate::str::contains("1 missed ($380.000 overdue)"))
        .stdout(predicate::str::contains("days)"));
}

#[test]
fn savings_goals_flow() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["--for", "duvan", "vehicle", "goal", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 11 savings goals"));
    casa(&dir)
        .args(["--for", "duvan", "vehicle", "goal", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already has savings goals"));
    casa(&dir)
        .args(["--for", "duvan", "moto", "bolsillo", "save", "oil", "20000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved $20.000 of $70.000"));

    casa(&dir)
        .args(["--for", "duvan", "vehicle", "goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cost not set"))
        .stdout(predicate::str::contains("Save $153.359/month"));
}

#[test]
fn work_summary() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["work", "log", "150000", "-g", "25000", "--date", "2025-03-03"])
        .assert()
        .success();
    casa(&dir)
        .args(["work", "log", "100000", "-g", "25000", "--date", "2025-03-04"])
        .assert()
        .success();

    casa(&dir)
        .args(["work", "summary", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Days worked:   2"))
        .stdout(predicate::str::contains("Daily average: $100.000"));
}

#[test]
fn audit_records_changes() {
    let dir = TempDir::new().unwrap();
    casa(&dir)
        .args(["debt", "add", "Banco", "500000"])
        .assert()
        .success();

    casa(&dir)
        .args(["audit", "-n", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Debt"))
        .stdout(predicate::str::contains("Banco"));
}
