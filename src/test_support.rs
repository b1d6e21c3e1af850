//! Scripted transport for unit tests
//!
//! Replies with queued responses in order and records every request.

use crate::error::{Error, Result};
use crate::http::{build_request_url, HttpResponse, Transport};
use crate::types::ParamMap;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) const LAST_MODIFIED: &str = "Wed, 01 Jan 2020 00:00:00 GMT";

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub params: ParamMap,
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<(StatusCode, String, Option<String>)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 reply carrying `body` and the fixed `Last-Modified`
    pub fn page(self, body: impl Into<String>) -> Self {
        self.reply(StatusCode::OK, body, Some(LAST_MODIFIED))
    }

    /// Queue the end-of-data marker
    pub fn no_content(self) -> Self {
        self.reply(StatusCode::NO_CONTENT, "", None)
    }

    pub fn reply(
        self,
        status: StatusCode,
        body: impl Into<String>,
        last_modified: Option<&str>,
    ) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((status, body.into(), last_modified.map(str::to_string)));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, url: &str, params: &ParamMap) -> Result<HttpResponse> {
        let full_url = build_request_url(url, params)?;
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: full_url.clone(),
            params: params.clone(),
        });

        let (status, body, last_modified) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::decode("scripted transport ran out of replies"))?;

        let mut response = HttpResponse::new(status, full_url, body);
        if let Some(value) = last_modified {
            response = response.with_header("Last-Modified", &value);
        }
        Ok(response)
    }
}

/// `{"data": [...]}` page body with `count` records starting at `first`
pub(crate) fn json_page(first: usize, count: usize) -> String {
    let records: Vec<_> = (first..first + count)
        .map(|i| serde_json::json!({"name": format!("area-{i}"), "cases": i}))
        .collect();
    serde_json::json!({ "data": records }).to_string()
}

/// `<document>` page body with `count` `<data>` records starting at `first`
pub(crate) fn xml_page(first: usize, count: usize) -> String {
    let records: String = (first..first + count)
        .map(|i| format!("<data><name>area-{i}</name><cases>{i}</cases></data>"))
        .collect();
    format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<document>{records}</document>")
}

/// CSV page body with a header and `count` rows starting at `first`
pub(crate) fn csv_page(first: usize, count: usize) -> String {
    let rows: String = (first..first + count)
        .map(|i| format!("area-{i},{i}\n"))
        .collect();
    format!("name,cases\n{rows}")
}
