//! Request builder, response parser and async front for the catalog API.
//!
//! # Design
//! `ProcedureClient` holds only a base URL, a transport and a logger and
//! carries no mutable state between calls, so overlapping calls are
//! independent. Each operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`;
//! the async methods run `build -> execute -> parse` and log the intent, the
//! outcome and any failure. Errors are logged once and returned unchanged.

use std::fmt::Display;
use std::sync::Arc;

use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::logging::{create_logger, Logger};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Procedure, ProcedureRecord};

/// Shortest trimmed query, in characters, that is sent to the backend.
pub const MIN_QUERY_CHARS: usize = 3;

const LOG_CONTEXT: &str = "ProcedureClient";

/// Whether `query` is long enough to be worth a search request.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Client for the procedure catalog API.
#[derive(Clone)]
pub struct ProcedureClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
    logger: Arc<dyn Logger>,
}

impl ProcedureClient<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new(), create_logger(LOG_CONTEXT))
    }
}

impl<T: Transport> ProcedureClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T, logger: Arc<dyn Logger>) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            transport,
            logger,
        }
    }

    pub fn build_search_procedures(&self, query: &str) -> HttpRequest {
        let name: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        HttpRequest::get(format!(
            "{}/procedures/search/by-name?name={name}",
            self.base_url
        ))
    }

    /// The id is interpolated into the path as-is.
    pub fn build_get_procedure_details(&self, id: impl Display) -> HttpRequest {
        HttpRequest::get(format!("{}/procedures/{id}", self.base_url))
    }

    pub fn parse_search_procedures(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Procedure>, ApiError> {
        check_status(&response)?;
        let records: Vec<ProcedureRecord> = serde_json::from_str(&response.body)?;
        Ok(records.into_iter().map(Procedure::from).collect())
    }

    pub fn parse_get_procedure_details(
        &self,
        response: HttpResponse,
    ) -> Result<serde_json::Value, ApiError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Search procedures whose name contains `query`.
    ///
    /// Queries shorter than `MIN_QUERY_CHARS` once trimmed resolve to an
    /// empty list with a warning and no request is sent.
    pub async fn search_procedures(&self, query: &str) -> Result<Vec<Procedure>, ApiError> {
        if !is_searchable(query) {
            self.logger
                .warn(&format!("search requires at least {MIN_QUERY_CHARS} characters"));
            return Ok(Vec::new());
        }

        self.logger
            .info(&format!("API call: searching procedures matching \"{query}\""));
        let request = self.build_search_procedures(query);
        let result = match self.transport.execute(request).await {
            Ok(response) => self.parse_search_procedures(response),
            Err(e) => Err(e),
        };

        match result {
            Ok(procedures) => {
                self.logger.info(&format!(
                    "{} results found for \"{query}\"",
                    procedures.len()
                ));
                Ok(procedures)
            }
            Err(e) => {
                self.logger
                    .error(&format!("error while searching procedures: {e}"));
                Err(e)
            }
        }
    }

    /// Fetch the full record of one procedure, returned as the backend sent it.
    pub async fn get_procedure_details(
        &self,
        id: impl Display,
    ) -> Result<serde_json::Value, ApiError> {
        self.logger
            .info(&format!("API call: fetching details of procedure {id}"));
        let request = self.build_get_procedure_details(&id);
        let result = match self.transport.execute(request).await {
            Ok(response) => self.parse_get_procedure_details(response),
            Err(e) => Err(e),
        };

        match result {
            Ok(details) => {
                self.logger
                    .info(&format!("details retrieved for procedure {id}"));
                Ok(details)
            }
            Err(e) => {
                self.logger
                    .error(&format!("error while fetching procedure details: {e}"));
                Err(e)
            }
        }
    }
}

/// Map non-2xx responses to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        status_text: response.status_text.clone(),
    })
}
