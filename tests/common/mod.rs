//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use chrono::{DateTime, TimeZone, Utc};
use petshop_storefront::api::{FetchError, ProductQuery, ProductSource};
use petshop_storefront::models::{
    ChoiceOption, FilterSelections, ProductSummary, QuizKey, QuizStep, SearchHistoryEntry,
};
use petshop_storefront::results::ProductCard;
use petshop_storefront::view::{HistoryItem, HistoryView, PageNav, QuizView, ResultsView};
use tempfile::TempDir;

/// Builder for a temporary data directory
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw `search_history.json` content
    pub fn with_history(self, content: &str) -> Self {
        let path = self.temp_dir.path().join("search_history.json");
        let mut file = fs::File::create(path).expect("Failed to create history file");
        file.write_all(content.as_bytes()).expect("Failed to write history file");
        self
    }

    /// Write history entries, newest first
    pub fn with_entries(self, entries: &[HistoryEntryBuilder]) -> Self {
        let entries: Vec<SearchHistoryEntry> = entries.iter().map(|e| e.build()).collect();
        let content = serde_json::to_string(&entries).expect("Failed to serialize history");
        self.with_history(&content)
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn history_file(dir: &Path) -> PathBuf {
    dir.join("search_history.json")
}

/// Read the stored history back
pub fn read_history(dir: &Path) -> Vec<SearchHistoryEntry> {
    let content = fs::read_to_string(history_file(dir)).expect("Failed to read history file");
    serde_json::from_str(&content).expect("History file is not valid JSON")
}

/// Builder for stored history entries
pub struct HistoryEntryBuilder {
    query: String,
    filters: FilterSelections,
    labels: Vec<String>,
    sort: String,
    timestamp: DateTime<Utc>,
}

impl HistoryEntryBuilder {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            filters: FilterSelections::new(),
            labels: Vec::new(),
            sort: String::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap(),
        }
    }

    pub fn filter(mut self, field: &str, value: &str) -> Self {
        let values = self.filters.entry(field.to_string()).or_insert_with(BTreeSet::new);
        values.insert(value.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.labels.push(label.to_string());
        self
    }

    pub fn sort(mut self, sort: &str) -> Self {
        self.sort = sort.to_string();
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(&self) -> SearchHistoryEntry {
        SearchHistoryEntry {
            query: self.query.clone(),
            filters: self.filters.clone(),
            filter_labels: self.labels.clone(),
            sort: self.sort.clone(),
            timestamp: self.timestamp,
        }
    }
}

/// Two-step quiz with readable option values
pub fn species_age_steps() -> Vec<QuizStep> {
    vec![
        QuizStep {
            key: QuizKey::Species,
            title: "Who is your pet?".to_string(),
            options: vec![ChoiceOption::new("dog", "Dog"), ChoiceOption::new("cat", "Cat")],
        },
        QuizStep {
            key: QuizKey::Age,
            title: "How old?".to_string(),
            options: vec![
                ChoiceOption::new("adult", "Adult"),
                ChoiceOption::new("senior", "Senior"),
            ],
        },
    ]
}

pub fn product(id: u64) -> ProductSummary {
    ProductSummary {
        id,
        name: format!("Product {}", id),
        description: format!("Description of product {}", id),
        price: 100.0 * id as f64,
        image: None,
    }
}

pub fn products(n: u64) -> Vec<ProductSummary> {
    (1..=n).map(product).collect()
}

/// Backend-shaped JSON array of `n` products with string prices
pub fn products_json(n: u64) -> String {
    let items: Vec<String> = (1..=n)
        .map(|id| {
            format!(
                r#"{{"id":{id},"name":"Product {id}","description":"Description of product {id}","price":"{id}99.00","image":"","brand":{{"id":1}}}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

/// Everything the page controllers told the screen
#[derive(Debug, Default)]
pub struct RecordingView {
    pub visible_step: Option<usize>,
    pub back_visible: bool,
    pub restart_visible: bool,
    pub selected: Vec<(usize, String)>,
    pub scrolled_to_top: bool,
    pub results_visible: bool,
    pub loading: bool,
    pub cards: Vec<ProductCard>,
    pub empty: bool,
    pub error: Option<String>,
    pub nav: PageNav,
    pub history: Option<Vec<HistoryItem>>,
}

impl RecordingView {
    pub fn card_ids(&self) -> Vec<u64> {
        self.cards.iter().map(|card| card.id).collect()
    }

    fn clear_results(&mut self) {
        self.loading = false;
        self.cards.clear();
        self.empty = false;
        self.error = None;
    }
}

impl QuizView for RecordingView {
    fn show_step(&mut self, index: usize) {
        self.visible_step = Some(index);
    }

    fn set_back_visible(&mut self, visible: bool) {
        self.back_visible = visible;
    }

    fn mark_selected(&mut self, step: usize, value: &str) {
        self.selected.retain(|(s, _)| *s != step);
        self.selected.push((step, value.to_string()));
    }

    fn clear_selected(&mut self) {
        self.selected.clear();
    }

    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
    }

    fn scroll_to_top(&mut self) {
        self.scrolled_to_top = true;
    }
}

impl ResultsView for RecordingView {
    fn set_results_visible(&mut self, visible: bool) {
        self.results_visible = visible;
        if !visible {
            self.clear_results();
        }
    }

    fn show_loading(&mut self) {
        self.clear_results();
        self.loading = true;
    }

    fn show_cards(&mut self, cards: &[ProductCard]) {
        self.clear_results();
        self.cards = cards.to_vec();
    }

    fn show_empty(&mut self) {
        self.clear_results();
        self.empty = true;
    }

    fn show_error(&mut self, message: &str) {
        self.clear_results();
        self.error = Some(message.to_string());
    }

    fn set_page_nav(&mut self, nav: PageNav) {
        self.nav = nav;
    }
}

impl HistoryView for RecordingView {
    fn show_history(&mut self, items: &[HistoryItem]) {
        self.history = Some(items.to_vec());
    }

    fn hide_history(&mut self) {
        self.history = None;
    }
}

/// Product source answering from memory and remembering every query
pub struct StaticSource {
    result: Result<Vec<ProductSummary>, FetchError>,
    queries: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn ok(products: Vec<ProductSummary>) -> Self {
        Self { result: Ok(products), queries: Mutex::new(Vec::new()) }
    }

    pub fn failing(error: FetchError) -> Self {
        Self { result: Err(error), queries: Mutex::new(Vec::new()) }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ProductSource for StaticSource {
    fn search_products(&self, query: &ProductQuery) -> Result<Vec<ProductSummary>, FetchError> {
        self.queries.lock().unwrap().push(query.path_and_query());
        self.result.clone()
    }
}

/// Minimal HTTP server answering a fixed sequence of requests, one per connection
pub struct MockServer {
    pub url: String,
    handle: JoinHandle<Vec<String>>,
}

impl MockServer {
    /// Serve `(status, body)` pairs in order, then stop
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock server");
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut request_lines = Vec::new();
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    break;
                };

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let text = String::from_utf8_lossy(&request);
                request_lines.push(text.lines().next().unwrap_or_default().to_string());

                let response = format!(
                    "HTTP/1.1 {} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
            request_lines
        });

        Self { url, handle }
    }

    /// Serve a single response
    pub fn once(status: u16, body: &str) -> Self {
        Self::start(vec![(status, body.to_string())])
    }

    /// Wait for the server to finish and return the request lines it saw
    pub fn requests(self) -> Vec<String> {
        self.handle.join().expect("Mock server panicked")
    }
}

/// Base URL where nothing listens
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
