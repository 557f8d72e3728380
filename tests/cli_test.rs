/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against a temporary data directory and a
/// local mock backend.
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{
    DataDirBuilder, HistoryEntryBuilder, MockServer, closed_port_url, products_json, read_history,
};
use predicates::prelude::*;

fn petshop(data_dir: &std::path::Path, api_url: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_petshop"));
    cmd.env("PETSHOP_DATA_DIR", data_dir)
        .env("PETSHOP_API_URL", api_url)
        .env_remove("PETSHOP_DATE_FORMAT")
        .env_remove("PETSHOP_LAYOUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_petshop"));
    cmd.assert().success().stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_petshop"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quiz"))
        .stdout(predicate::str::contains("catalog"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_cli_history_empty() {
    let dir = DataDirBuilder::new().build();
    petshop(dir.path(), &closed_port_url())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent searches"));
}

#[test]
fn test_cli_history_lists_entries_with_date_flag() {
    let dir = DataDirBuilder::new()
        .with_entries(&[
            HistoryEntryBuilder::new("leash").label("Dogs"),
            HistoryEntryBuilder::new("bowl"),
        ])
        .build();

    petshop(dir.path(), &closed_port_url())
        .args(["history", "--date-format", "%Y.%m.%d"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. leash  [Dogs]  2024.05.17 09:30"))
        .stdout(predicate::str::contains(" 2. bowl  [No filters]  2024.05.17 09:30"));
}

#[test]
fn test_cli_history_uses_profile_date_format() {
    let dir = DataDirBuilder::new().with_entries(&[HistoryEntryBuilder::new("leash")]).build();
    let server = MockServer::once(200, r#"{"username": "anna", "date_format": "%m/%d/%Y"}"#);

    petshop(dir.path(), &server.url)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("05/17/2024 09:30"));

    assert_eq!(server.requests(), vec!["GET /api/profile/ HTTP/1.1".to_string()]);
}

#[test]
fn test_cli_history_profile_failure_falls_back_to_default() {
    let dir = DataDirBuilder::new().with_entries(&[HistoryEntryBuilder::new("leash")]).build();

    petshop(dir.path(), &closed_port_url())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("17.05.2024 09:30"));
}

#[test]
fn test_cli_search_prints_cards_and_records_history() {
    let dir = DataDirBuilder::new().build();
    let server = MockServer::once(200, &products_json(2));

    petshop(dir.path(), &server.url)
        .args(["search", "bone", "species:1", "--sort", "price_asc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 products"))
        .stdout(predicate::str::contains("Product 1 - 199 ₽"))
        .stdout(predicate::str::contains("/product/2/"));

    assert_eq!(
        server.requests(),
        vec!["GET /api/products/public/?search_name=bone&species=1&sort=price_asc HTTP/1.1"]
    );

    let history = read_history(dir.path());
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "bone");
    assert_eq!(history[0].filter_labels, vec!["Dogs", "Sort: Price: low to high"]);
}

#[test]
fn test_cli_search_empty_result() {
    let dir = DataDirBuilder::new().build();
    let server = MockServer::once(200, "[]");

    petshop(dir.path(), &server.url)
        .args(["search", "unicorn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found"));
    server.requests();
}

#[test]
fn test_cli_search_server_error_fails() {
    let dir = DataDirBuilder::new().build();
    let server = MockServer::once(500, r#"{"error": "Catalog is under maintenance"}"#);

    petshop(dir.path(), &server.url)
        .args(["search", "bone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search failed: Catalog is under maintenance"));
    server.requests();

    // The search was still remembered
    assert_eq!(read_history(dir.path())[0].query, "bone");
}

#[test]
fn test_cli_search_unreachable_backend_fails() {
    let dir = DataDirBuilder::new().build();
    petshop(dir.path(), &closed_port_url())
        .args(["search", "bone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load products"));
}

#[test]
fn test_cli_search_rejects_unknown_filter_field() {
    let dir = DataDirBuilder::new().build();
    petshop(dir.path(), &closed_port_url())
        .args(["search", "bone", "color:red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("color"));
}

#[test]
fn test_cli_history_apply_reruns_entry() {
    let dir = DataDirBuilder::new()
        .with_entries(&[
            HistoryEntryBuilder::new("bowl"),
            HistoryEntryBuilder::new("leash").filter("species", "1").label("Dogs"),
        ])
        .build();
    let server = MockServer::once(200, &products_json(1));

    petshop(dir.path(), &server.url)
        .args(["history", "--apply", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 products"));

    assert_eq!(
        server.requests(),
        vec!["GET /api/products/public/?search_name=leash&species=1 HTTP/1.1"]
    );
    let history = read_history(dir.path());
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].query, "leash");
}

#[test]
fn test_cli_history_apply_out_of_range() {
    let dir = DataDirBuilder::new().with_entries(&[HistoryEntryBuilder::new("bowl")]).build();
    petshop(dir.path(), &closed_port_url())
        .args(["history", "--apply", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No history entry 3 (1 stored)"));
}

#[test]
fn test_cli_rejects_invalid_api_url() {
    let dir = DataDirBuilder::new().build();
    petshop(dir.path(), "ftp://shop.local")
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read configuration"));
}
