use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn script(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("showbudget_cli").expect("binary");
    cmd.env("SHOWBUDGET_CLI_SCRIPT", "1")
        .env("SHOWBUDGET_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_saves_and_lists_budgets() {
    let home = TempDir::new().expect("home");
    let input = "\
set \"Show Title\" Warehouse
count headliners 2
set \"Headliner 2 Fee\" 750
save
list
exit
";

    script(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("`numHeadliners` changed from 1 to 2."))
        .stdout(contains("Saved `Warehouse` as"))
        .stdout(contains("Saved budgets").and(contains("Warehouse")));

    let records: Vec<_> = std::fs::read_dir(home.path().join("budgets"))
        .expect("budgets dir")
        .collect();
    assert_eq!(records.len(), 1);
}

#[test]
fn exported_snapshots_import_back() {
    let home = TempDir::new().expect("home");
    let export = home.child("night.csv");
    let input = format!(
        "set \"Show Title\" Night\nset venue 1200\nexport snapshot {path}\nreset\nimport {path}\nencode\ntotals\n",
        path = export.path().display()
    );

    script(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Started a fresh budget."))
        .stdout(contains("Imported"))
        .stdout(contains("XODIA_BUDGET_VERSION,4"))
        .stdout(contains("ID:venue,1200"))
        .stdout(contains("Net profit: -$1200.00"));

    export.assert(predicates::str::starts_with("XODIA_BUDGET_VERSION,4\nShow Title,Night\n"));
}

#[test]
fn legacy_snapshots_import_through_labels() {
    let home = TempDir::new().expect("home");
    let legacy = home.child("legacy.csv");
    legacy
        .write_str("Show Title,Old Show\nHeadliner 2 Fee,900\nFacebook Ads,80\nMystery Row,1\n")
        .expect("legacy file");
    let input = format!(
        "import {}\nget headliner_fee_2\nget facebookAdsXodia\nreport\n",
        legacy.path().display()
    );

    script(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("skipped 1 unknown row(s)"))
        .stdout(contains("headliner_fee_2 = 900"))
        .stdout(contains("facebookAdsXodia = 80"))
        .stdout(contains("EVENT: OLD SHOW"));
}

#[test]
fn unknown_commands_get_suggestions() {
    let home = TempDir::new().expect("home");
    script(&home)
        .write_stdin("sav\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `sav`"))
        .stdout(contains("Suggestion: `save`?"));
}

#[test]
fn failures_are_reported_without_stopping_the_script() {
    let home = TempDir::new().expect("home");
    script(&home)
        .write_stdin("save\nload nope\nset \"Show Title\" Still Here\nget \"Show Title\"\n")
        .assert()
        .success()
        .stderr(contains("enter a show title before saving"))
        .stderr(contains("Budget `nope` was not found."))
        .stdout(contains("showTitle = Still Here"));
}
