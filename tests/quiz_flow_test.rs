/// End-to-end quiz flows: step visibility, completion, pagination and failures
mod common;

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use common::{
    MockServer, RecordingView, StaticSource, closed_port_url, products, products_json,
    species_age_steps,
};
use petshop_storefront::api::{FetchError, SharedSource, StorefrontClient, spawn_search};
use petshop_storefront::models::{QuizKey, StorefrontLayout};
use petshop_storefront::quiz::QuizPage;
use petshop_storefront::view::PageNav;

fn default_quiz() -> QuizPage<RecordingView> {
    QuizPage::new(StorefrontLayout::default().quiz, RecordingView::default()).unwrap()
}

#[test]
fn test_each_answer_shows_exactly_the_next_step() {
    let mut page = default_quiz();
    let steps = page.controller().step_count();
    assert_eq!(page.view().visible_step, Some(0));

    for step in 0..steps - 1 {
        let ticket = page.select_option(step, "1").unwrap();
        assert!(ticket.is_none());
        assert_eq!(page.view().visible_step, Some(step + 1));
        assert!(page.view().back_visible);
        assert!(!page.view().results_visible);
    }
}

#[test]
fn test_reset_returns_to_a_clean_first_step() {
    let mut page = default_quiz();
    page.select_option(0, "2").unwrap();
    page.select_option(1, "3").unwrap();

    page.reset();

    assert_eq!(page.controller().current_step(), 0);
    assert!(page.controller().answers().is_empty());
    assert!(page.view().selected.is_empty());
    assert_eq!(page.view().visible_step, Some(0));
    assert!(page.view().scrolled_to_top);
    assert!(!page.view().restart_visible);
    assert!(!page.view().back_visible);
}

#[test]
fn test_revisited_step_overwrites_answer() {
    let mut page = default_quiz();
    page.select_option(0, "1").unwrap();
    page.go_back();
    page.select_option(0, "4").unwrap();

    assert_eq!(page.controller().answers().get(QuizKey::Species), Some("4"));
    assert_eq!(page.view().selected, vec![(0, "4".to_string())]);
}

#[test]
fn test_quiz_over_http_paginates_six_products() {
    let server = MockServer::once(200, &products_json(6));
    let client = StorefrontClient::new(&server.url).unwrap();

    let mut page = QuizPage::new(species_age_steps(), RecordingView::default()).unwrap();
    assert!(page.select_option(0, "dog").unwrap().is_none());
    let ticket = page.select_option(1, "adult").unwrap().expect("quiz should complete");
    assert!(page.view().loading);

    assert!(page.run_fetch(ticket, &client));
    assert_eq!(
        server.requests(),
        vec!["GET /api/products/public/?species=dog&age=adult HTTP/1.1".to_string()]
    );

    assert_eq!(page.view().card_ids(), vec![1, 2, 3]);
    assert_eq!(page.view().cards[0].price, "199.00 ₽");
    assert_eq!(page.view().cards[0].image, "/static/img/default-product.png");
    assert_eq!(
        page.view().nav,
        PageNav { visible: true, prev_disabled: true, next_disabled: false }
    );

    assert!(page.next_page());
    assert_eq!(page.view().card_ids(), vec![4, 5, 6]);
    assert_eq!(
        page.view().nav,
        PageNav { visible: true, prev_disabled: false, next_disabled: true }
    );
    assert!(!page.next_page());
}

#[test]
fn test_server_error_shows_reason_and_recovery() {
    let server = MockServer::once(500, r#"{"error": "Database unavailable"}"#);
    let client = StorefrontClient::new(&server.url).unwrap();

    let mut page = QuizPage::new(species_age_steps(), RecordingView::default()).unwrap();
    page.select_option(0, "cat").unwrap();
    let ticket = page.select_option(1, "senior").unwrap().unwrap();
    page.run_fetch(ticket, &client);
    server.requests();

    let error = page.view().error.clone().expect("error state expected");
    assert!(error.contains("Database unavailable"));
    assert!(page.view().restart_visible);
    assert_eq!(page.view().nav, PageNav::HIDDEN);
    assert!(page.view().cards.is_empty());

    // Retry re-issues the same request
    let retry = page.retry().unwrap();
    assert_eq!(retry.query.to_query_string(), "species=cat&age=senior");
}

#[test]
fn test_unreachable_backend_shows_generic_message() {
    let client = StorefrontClient::new(&closed_port_url()).unwrap();
    let mut page = QuizPage::new(species_age_steps(), RecordingView::default()).unwrap();
    page.select_option(0, "dog").unwrap();
    let ticket = page.select_option(1, "adult").unwrap().unwrap();

    page.run_fetch(ticket, &client);
    assert_eq!(page.view().error.as_deref(), Some("Failed to load products"));
}

#[test]
fn test_empty_result_shows_empty_state() {
    let source = StaticSource::ok(Vec::new());
    let mut page = QuizPage::new(species_age_steps(), RecordingView::default()).unwrap();
    page.select_option(0, "dog").unwrap();
    let ticket = page.select_option(1, "adult").unwrap().unwrap();

    page.run_fetch(ticket, &source);
    assert!(page.view().empty);
    assert_eq!(page.view().nav, PageNav::HIDDEN);
    assert!(page.view().restart_visible);
}

#[test]
fn test_stale_worker_result_never_replaces_newer_one() {
    let (tx, rx) = mpsc::channel();
    let slow: SharedSource = Arc::new(StaticSource::ok(products(5)));
    let fresh: SharedSource = Arc::new(StaticSource::ok(products(1)));

    let mut page = QuizPage::new(species_age_steps(), RecordingView::default()).unwrap();
    page.select_option(0, "dog").unwrap();
    let first = page.select_option(1, "adult").unwrap().unwrap();
    // Answering the last step again supersedes the first search
    let second = page.select_option(1, "senior").unwrap().unwrap();

    spawn_search(fresh, second.generation, second.query, tx.clone());
    let newer = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(page.apply_results(newer.generation, newer.result));

    spawn_search(slow, first.generation, first.query, tx);
    let older = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(!page.apply_results(older.generation, older.result));

    assert_eq!(page.view().card_ids(), vec![1]);
}

#[test]
fn test_going_back_drops_in_flight_search() {
    let source = StaticSource::failing(FetchError::Transport("late".to_string()));
    let mut page = QuizPage::new(species_age_steps(), RecordingView::default()).unwrap();
    page.select_option(0, "dog").unwrap();
    let ticket = page.select_option(1, "adult").unwrap().unwrap();

    assert!(page.go_back());
    assert!(!page.run_fetch(ticket, &source));
    assert!(page.view().error.is_none());
    assert!(!page.view().results_visible);
    assert_eq!(source.queries(), vec!["/api/products/public/?species=dog&age=adult"]);
}
