//! Synchronous client
//!
//! [`BlockingDashboardApi`] owns a current-thread tokio runtime and blocks
//! on every call. Each page is fetched only when the caller asks for it.
//!
//! Do not use it from inside an async runtime: blocking on a nested
//! runtime panics. Use [`DashboardApi`] there instead.

use crate::aggregate::{Aggregate, CsvAggregate, JsonAggregate, XmlAggregate};
use crate::config::ApiConfig;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::{Page, Pager};
use crate::query::Query;
use crate::types::{DataFormat, JsonValue};
use crate::DashboardApi;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Blocking wrapper around [`DashboardApi`]
#[derive(Debug)]
pub struct BlockingDashboardApi {
    inner: DashboardApi,
    runtime: Runtime,
}

impl BlockingDashboardApi {
    /// Client for the public service with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Client built from `config`
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            inner: DashboardApi::with_config(config)?,
            runtime: build_runtime()?,
        })
    }

    /// Client sending its requests through `transport`
    pub fn with_transport(transport: Arc<dyn Transport>, config: ApiConfig) -> Result<Self> {
        Ok(Self {
            inner: DashboardApi::with_transport(transport, config),
            runtime: build_runtime()?,
        })
    }

    /// The async client this wraps
    pub fn inner(&self) -> &DashboardApi {
        &self.inner
    }

    /// See [`DashboardApi::options`]
    pub fn options(&self) -> Result<JsonValue> {
        self.runtime.block_on(self.inner.options())
    }

    /// See [`DashboardApi::head`]
    pub fn head(&self, query: &Query) -> Result<HeaderMap> {
        self.runtime.block_on(self.inner.head(query))
    }

    /// See [`DashboardApi::last_update`]
    pub fn last_update(&self, query: &Query) -> Result<String> {
        self.runtime.block_on(self.inner.last_update(query))
    }

    /// See [`DashboardApi::release_timestamp`]
    pub fn release_timestamp(&self) -> Result<String> {
        self.runtime.block_on(self.inner.release_timestamp())
    }

    /// Iterator over the raw pages of `query` in `format`
    pub fn pages(&self, query: &Query, format: DataFormat) -> BlockingPager<'_> {
        BlockingPager {
            runtime: &self.runtime,
            pager: self.inner.pages(query, format),
        }
    }

    /// See [`DashboardApi::get`]
    pub fn get(&self, query: &Query, format: DataFormat) -> Result<Aggregate> {
        self.runtime.block_on(self.inner.get(query, format))
    }

    /// See [`DashboardApi::get_json`]
    pub fn get_json(&self, query: &Query) -> Result<JsonAggregate> {
        self.runtime.block_on(self.inner.get_json(query))
    }

    /// See [`DashboardApi::get_xml`]
    pub fn get_xml(&self, query: &Query) -> Result<XmlAggregate> {
        self.runtime.block_on(self.inner.get_xml(query))
    }

    /// See [`DashboardApi::get_csv`]
    pub fn get_csv(&self, query: &Query) -> Result<CsvAggregate> {
        self.runtime.block_on(self.inner.get_csv(query))
    }
}

/// Pages as a plain iterator, one request per `next`
#[derive(Debug)]
pub struct BlockingPager<'a> {
    runtime: &'a Runtime,
    pager: Pager<'a>,
}

impl<'a> BlockingPager<'a> {
    /// The underlying pager, for its cursor and metadata
    pub fn pager(&self) -> &Pager<'a> {
        &self.pager
    }
}

impl Iterator for BlockingPager<'_> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        self.runtime.block_on(self.pager.next_page()).transpose()
    }
}

fn build_runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}
