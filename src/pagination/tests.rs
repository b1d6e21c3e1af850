//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::query::{Query, Structure, FORMAT_PARAM, LATEST_BY_PARAM, PAGE_PARAM};
use crate::test_support::{json_page, ScriptedTransport, LAST_MODIFIED};
use crate::types::DataFormat;
use futures::TryStreamExt;
use reqwest::StatusCode;

const ENDPOINT: &str = "https://api.example.com/v1/data";

fn query() -> Query {
    Query::new(
        ["areaType=nation"],
        Structure::new()
            .field("name", "areaName")
            .field("cases", "newCasesBySpecimenDate"),
    )
}

// ============================================================================
// PageCursor Tests
// ============================================================================

#[test]
fn test_page_cursor_starts_at_one() {
    let cursor = PageCursor::default();
    assert_eq!(cursor.get(), 1);
    assert_eq!(cursor.pages_before(), 0);
    assert_eq!(cursor.to_string(), "1");
}

#[test]
fn test_page_cursor_advance() {
    let cursor = PageCursor::first().advance().advance();
    assert_eq!(cursor.get(), 3);
    assert_eq!(cursor.pages_before(), 2);
    assert!(cursor > PageCursor::first());
}

// ============================================================================
// Page Tests
// ============================================================================

#[test]
fn test_page_text_and_json() {
    let page = Page::new(Some(1), r#"{"data": [{"a": 1}]}"#);
    assert!(page.text().unwrap().starts_with('{'));
    assert_eq!(page.json().unwrap()["data"][0]["a"], 1);
}

#[test]
fn test_page_invalid_payloads() {
    let page = Page::new(Some(2), vec![0xff, 0xfe]);
    assert!(matches!(page.text(), Err(Error::Decode { .. })));

    let page = Page::new(None, "not json");
    let err = page.json().unwrap_err();
    assert!(err.to_string().contains("page latest"));
}

// ============================================================================
// Pager Tests
// ============================================================================

#[test]
fn test_pager_initial_params() {
    let transport = ScriptedTransport::new();
    let pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Csv);

    assert_eq!(pager.params()[FORMAT_PARAM], "csv");
    assert_eq!(pager.params()[PAGE_PARAM], "1");
    assert_eq!(pager.cursor(), Some(PageCursor::first()));
    assert!(!pager.is_finished());
    assert_eq!(pager.total_pages(), None);
}

#[test]
fn test_pager_latest_by_has_no_cursor() {
    let transport = ScriptedTransport::new();
    let latest = query().with_latest_by("newCasesBySpecimenDate");
    let pager = Pager::new(&transport, ENDPOINT, &latest.params(), DataFormat::Json);

    assert!(!pager.params().contains_key(PAGE_PARAM));
    assert_eq!(pager.params()[LATEST_BY_PARAM], "newCasesBySpecimenDate");
    assert_eq!(pager.cursor(), None);
}

#[tokio::test]
async fn test_pager_walks_until_no_content() {
    let transport = ScriptedTransport::new()
        .page(json_page(0, 5))
        .page(json_page(5, 3))
        .no_content();

    let mut pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Json);

    let first = pager.next_page().await.unwrap().unwrap();
    assert_eq!(first.number, Some(1));
    assert_eq!(first.last_modified.as_deref(), Some(LAST_MODIFIED));
    assert_eq!(pager.cursor().map(PageCursor::get), Some(2));

    let second = pager.next_page().await.unwrap().unwrap();
    assert_eq!(second.number, Some(2));

    assert!(pager.next_page().await.unwrap().is_none());
    assert!(pager.is_finished());
    assert_eq!(pager.total_pages(), Some(2));
    assert_eq!(pager.last_modified(), Some(LAST_MODIFIED));

    // Exhausted pagers never issue another request
    assert!(pager.next_page().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 3);

    let pages: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| r.params[PAGE_PARAM].clone())
        .collect();
    assert_eq!(pages, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_pager_immediate_no_content() {
    let transport = ScriptedTransport::new().no_content();
    let mut pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Json);

    assert!(pager.next_page().await.unwrap().is_none());
    assert_eq!(pager.total_pages(), Some(0));
    assert_eq!(pager.last_modified(), None);
}

#[tokio::test]
async fn test_pager_latest_by_single_request() {
    let transport = ScriptedTransport::new().page(json_page(0, 1)).page(json_page(1, 1));
    let latest = query().with_latest_by("newCasesBySpecimenDate");
    let mut pager = Pager::new(&transport, ENDPOINT, &latest.params(), DataFormat::Json);

    let page = pager.next_page().await.unwrap().unwrap();
    assert_eq!(page.number, None);
    assert!(pager.next_page().await.unwrap().is_none());

    assert_eq!(transport.request_count(), 1);
    assert!(!transport.requests()[0].params.contains_key(PAGE_PARAM));
    assert_eq!(pager.total_pages(), Some(1));
    assert_eq!(pager.last_modified(), Some(LAST_MODIFIED));
}

#[tokio::test]
async fn test_pager_failure_captures_params_of_failing_attempt() {
    let transport = ScriptedTransport::new()
        .page(json_page(0, 2))
        .reply(StatusCode::NOT_FOUND, "Invalid metric", None);

    let mut pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Json);
    assert!(pager.next_page().await.unwrap().is_some());

    let err = pager.next_page().await.unwrap_err();
    let failed = err.failed_request().expect("request failure");

    assert_eq!(failed.status, 404);
    assert_eq!(failed.reason, "Not Found");
    assert_eq!(failed.body, "Invalid metric");
    assert_eq!(failed.params, transport.requests()[1].params);
    assert_eq!(failed.params[PAGE_PARAM], "2");
    assert_eq!(failed.url, transport.requests()[1].url);
    assert!(failed.decoded_url.contains("filters=areaType=nation"));

    // The cursor is not advanced on failure and the walk is over
    assert_eq!(pager.cursor().map(PageCursor::get), Some(2));
    assert!(pager.is_finished());
    assert_eq!(pager.total_pages(), None);
    assert!(pager.next_page().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_pager_server_error_aborts() {
    let transport =
        ScriptedTransport::new().reply(StatusCode::INTERNAL_SERVER_ERROR, "", None);
    let mut pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Xml);

    let err = pager.next_page().await.unwrap_err();
    assert_eq!(err.failed_request().map(|f| f.status), Some(500));
    assert!(err.to_string().contains("No response"));
}

#[tokio::test]
async fn test_pager_into_stream() {
    let transport = ScriptedTransport::new()
        .page(json_page(0, 1))
        .page(json_page(1, 1))
        .page(json_page(2, 1))
        .no_content();

    let pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Json);
    let pages: Vec<Page> = pager.into_stream().try_collect().await.unwrap();

    let numbers: Vec<_> = pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(transport.request_count(), 4);
}

#[tokio::test]
async fn test_pager_stream_surfaces_failure() {
    let transport = ScriptedTransport::new()
        .page(json_page(0, 1))
        .reply(StatusCode::BAD_REQUEST, "bad filter", None);

    let pager = Pager::new(&transport, ENDPOINT, &query().params(), DataFormat::Json);
    let result: crate::Result<Vec<Page>> = pager.into_stream().try_collect().await;

    assert!(matches!(result, Err(Error::RequestFailed(_))));
}
