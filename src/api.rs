//! Dashboard API client
//!
//! [`DashboardApi`] ties the pieces together: it turns a [`Query`] into
//! request parameters, walks the pages with a [`Pager`], merges them with
//! the format's merger and attaches the freshness metadata.
//!
//! Every retrieval restarts from page 1. Nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use uk_covid19::{DashboardApi, Query, Structure};
//!
//! # async fn run() -> uk_covid19::Result<()> {
//! let query = Query::new(
//!     ["areaType=nation", "areaName=England"],
//!     Structure::new()
//!         .field("date", "date")
//!         .field("name", "areaName")
//!         .field("cases", "newCasesByPublishDate"),
//! );
//!
//! let api = DashboardApi::new()?;
//! let data = api.get_json(&query).await?;
//! println!("{} records, updated {}", data.length, data.last_update);
//! # Ok(())
//! # }
//! ```

use crate::aggregate::{
    Aggregate, AggregateMetadata, CsvAggregate, CsvMerger, JsonAggregate, JsonMerger,
    PageMerger, XmlAggregate, XmlMerger,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpResponse, Transport};
use crate::metadata::{extract_release_timestamp, normalize_last_modified};
use crate::pagination::{failed_request, Pager};
use crate::query::Query;
use crate::types::{DataFormat, JsonValue, ParamMap};
use reqwest::header::{HeaderMap, LAST_MODIFIED};
use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// Client for the coronavirus dashboard data service
#[derive(Clone)]
pub struct DashboardApi {
    transport: Arc<dyn Transport>,
    config: ApiConfig,
}

impl DashboardApi {
    /// Client for the public service with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Client built from `config`
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::with_config(config.client_config())?;
        Ok(Self {
            transport: Arc::new(client),
            config,
        })
    }

    /// Client sending its requests through `transport`
    pub fn with_transport(transport: Arc<dyn Transport>, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    /// Active configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Capability document of the data endpoint (OPTIONS)
    pub async fn options(&self) -> Result<JsonValue> {
        let response = self
            .send_checked(Method::OPTIONS, &self.config.endpoint, ParamMap::new())
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Response headers for `query`, without fetching any data (HEAD)
    pub async fn head(&self, query: &Query) -> Result<HeaderMap> {
        let response = self
            .send_checked(Method::HEAD, &self.config.endpoint, query.params())
            .await?;
        Ok(response.headers)
    }

    /// Timestamp of the latest database update touching `query`
    ///
    /// Read from the `Last-Modified` header of a HEAD request and rendered
    /// as `YYYY-MM-DDTHH:MM:SS.000000Z`.
    pub async fn last_update(&self, query: &Query) -> Result<String> {
        let headers = self.head(query).await?;
        let value = headers
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| Error::missing_header("Last-Modified"))?;
        normalize_last_modified(value)
    }

    /// Timestamp of the latest public release of the data
    ///
    /// Independent of any query. Returned exactly as the service reports it.
    pub async fn release_timestamp(&self) -> Result<String> {
        let response = self
            .send_checked(Method::GET, &self.config.timestamp_endpoint, ParamMap::new())
            .await?;
        let body: JsonValue = serde_json::from_slice(&response.body)?;
        extract_release_timestamp(&body)
    }

    /// Pager over the raw pages of `query` in `format`
    pub fn pages(&self, query: &Query, format: DataFormat) -> Pager<'_> {
        Pager::new(
            self.transport.as_ref(),
            self.config.endpoint.as_str(),
            &query.params(),
            format,
        )
    }

    /// Retrieve every page of `query` in `format` and merge them
    pub async fn get(&self, query: &Query, format: DataFormat) -> Result<Aggregate> {
        match format {
            DataFormat::Json => self.get_json(query).await.map(Aggregate::Json),
            DataFormat::Xml => self.get_xml(query).await.map(Aggregate::Xml),
            DataFormat::Csv => self.get_csv(query).await.map(Aggregate::Csv),
        }
    }

    /// Retrieve `query` as merged JSON records
    pub async fn get_json(&self, query: &Query) -> Result<JsonAggregate> {
        let mut pager = self.pages(query, DataFormat::Json);
        let mut merger = JsonMerger::new();
        drain(&mut pager, &mut merger).await?;

        let metadata = self.metadata(query, &pager).await?;
        let aggregate = merger.finish(metadata);
        info!(
            "Retrieved {} JSON records over {} pages",
            aggregate.length, aggregate.total_pages
        );
        Ok(aggregate)
    }

    /// Retrieve `query` as one merged XML document
    pub async fn get_xml(&self, query: &Query) -> Result<XmlAggregate> {
        let mut pager = self.pages(query, DataFormat::Xml);
        let mut merger = XmlMerger::new();
        drain(&mut pager, &mut merger).await?;

        let metadata = self.metadata(query, &pager).await?;
        let aggregate = merger.finish(metadata);
        info!(
            "Retrieved {} XML records over {} pages",
            aggregate.length(),
            aggregate.total_pages()
        );
        Ok(aggregate)
    }

    /// Retrieve `query` as merged CSV text
    ///
    /// Fails with [`Error::NestedStructure`] before any request when the
    /// structure is not flat.
    pub async fn get_csv(&self, query: &Query) -> Result<CsvAggregate> {
        query.structure().ensure_flat()?;

        let mut pager = self.pages(query, DataFormat::Csv);
        let mut merger = CsvMerger::new();
        drain(&mut pager, &mut merger).await?;

        let aggregate = merger.finish(pager.total_pages().unwrap_or_default());
        info!(
            "Retrieved {} CSV lines over {} pages",
            aggregate.length(),
            aggregate.total_pages()
        );
        Ok(aggregate)
    }

    async fn metadata(&self, query: &Query, pager: &Pager<'_>) -> Result<AggregateMetadata> {
        let last_update = match pager.last_modified() {
            Some(value) => normalize_last_modified(value)?,
            None => {
                debug!("No freshness header seen while paging, sending HEAD");
                self.last_update(query).await?
            }
        };

        Ok(AggregateMetadata {
            last_update,
            total_pages: pager.total_pages().unwrap_or_default(),
        })
    }

    async fn send_checked(
        &self,
        method: Method,
        url: &str,
        params: ParamMap,
    ) -> Result<HttpResponse> {
        let response = self.transport.send(method, url, &params).await?;
        if response.is_failure() {
            return Err(failed_request(response, params).into());
        }
        Ok(response)
    }
}

impl std::fmt::Debug for DashboardApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardApi")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn drain<M: PageMerger>(pager: &mut Pager<'_>, merger: &mut M) -> Result<()> {
    while let Some(page) = pager.next_page().await? {
        merger.push_page(&page)?;
    }
    debug!("Merged {} records", merger.record_count());
    Ok(())
}
