//! Page-by-page retrieval
//!
//! Each call to [`Pager::next_page`] sends at most one request. Nothing is
//! fetched ahead of the consumer.

use super::types::{Page, PageCursor};
use crate::error::{FailedRequest, Result};
use crate::http::{decode_url, HttpResponse, Transport};
use crate::query::{FORMAT_PARAM, LATEST_BY_PARAM, PAGE_PARAM};
use crate::types::{DataFormat, ParamMap};
use futures::Stream;
use reqwest::Method;
use std::pin::Pin;
use tracing::{debug, warn};

/// Pages as an async stream, for consumers that prefer `StreamExt`
pub type PageStream<'a> = Pin<Box<dyn Stream<Item = Result<Page>> + Send + 'a>>;

/// Pull-based walk over the pages of one retrieval
pub struct Pager<'a> {
    transport: &'a dyn Transport,
    endpoint: String,
    params: ParamMap,
    /// Absent for `latestBy` requests, which are never paged
    cursor: Option<PageCursor>,
    last_modified: Option<String>,
    total_pages: Option<u32>,
    finished: bool,
}

impl<'a> Pager<'a> {
    /// Start a retrieval of `base_params` in `format`
    ///
    /// `page=1` is added unless `base_params` carries `latestBy`.
    pub fn new(
        transport: &'a dyn Transport,
        endpoint: impl Into<String>,
        base_params: &ParamMap,
        format: DataFormat,
    ) -> Self {
        let mut params = base_params.clone();
        params.insert(FORMAT_PARAM.to_string(), format.to_string());

        let cursor = if params.contains_key(LATEST_BY_PARAM) {
            None
        } else {
            let cursor = PageCursor::first();
            params.insert(PAGE_PARAM.to_string(), cursor.to_string());
            Some(cursor)
        };

        Self {
            transport,
            endpoint: endpoint.into(),
            params,
            cursor,
            last_modified: None,
            total_pages: None,
            finished: false,
        }
    }

    /// Parameters the next request will carry
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Current cursor; `None` in `latestBy` mode
    pub fn cursor(&self) -> Option<PageCursor> {
        self.cursor
    }

    /// Most recent `Last-Modified` value seen on an accepted page
    pub fn last_modified(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    /// Number of data pages, known once the walk has ended successfully
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Whether no further request will be made
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Fetch the next page
    ///
    /// Returns `Ok(None)` at end of data. A status >= 400 ends the walk with
    /// [`crate::Error::RequestFailed`] carrying the exact parameters sent.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.finished {
            return Ok(None);
        }

        let response = match self
            .transport
            .send(Method::GET, &self.endpoint, &self.params)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        if response.is_failure() {
            self.finished = true;
            warn!(
                "Request failed with {} on {}",
                response.status.as_u16(),
                response.url
            );
            return Err(failed_request(response, self.params.clone()).into());
        }

        let Some(cursor) = self.cursor else {
            self.finished = true;
            self.total_pages = Some(1);
            self.record_freshness(&response);
            debug!("Fetched latest-value page");
            return Ok(Some(into_page(None, response)));
        };

        if response.is_no_content() {
            self.finished = true;
            self.total_pages = Some(cursor.pages_before());
            debug!("End of data after {} pages", cursor.pages_before());
            return Ok(None);
        }

        self.record_freshness(&response);
        let page = into_page(Some(cursor.get()), response);
        debug!("Accepted page {} ({} bytes)", cursor, page.body.len());

        let next = cursor.advance();
        self.cursor = Some(next);
        self.params.insert(PAGE_PARAM.to_string(), next.to_string());

        Ok(Some(page))
    }

    /// Consume the pager as a stream of pages
    pub fn into_stream(self) -> PageStream<'a> {
        Box::pin(futures::stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, crate::Error>(page.map(|page| (page, pager)))
        }))
    }

    fn record_freshness(&mut self, response: &HttpResponse) {
        if let Some(value) = response.last_modified() {
            self.last_modified = Some(value.to_string());
        }
    }
}

impl std::fmt::Debug for Pager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("endpoint", &self.endpoint)
            .field("params", &self.params)
            .field("cursor", &self.cursor)
            .field("total_pages", &self.total_pages)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

fn into_page(number: Option<u32>, response: HttpResponse) -> Page {
    let last_modified = response.last_modified().map(str::to_string);
    Page {
        number,
        url: response.url,
        last_modified,
        body: response.body,
    }
}

/// Capture a rejected response for diagnostics
pub(crate) fn failed_request(response: HttpResponse, params: ParamMap) -> FailedRequest {
    FailedRequest {
        status: response.status.as_u16(),
        reason: response.reason().to_string(),
        body: response.text_lossy(),
        decoded_url: decode_url(&response.url),
        url: response.url,
        params,
    }
}
