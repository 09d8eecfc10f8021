use thiserror::Error;
use tracing::{debug, warn};

use portal_api::response::{SearchResultDto, SearchResultList};

use crate::analytics::SearchAnalytics;
use crate::config::{SearchSettings, PAGINATION_OFFSET_DEFAULT};
use crate::consumer::{
    Api, ApiConsumer, ApiProduct, ConsumerError, Documentation, ErrorHandler, RawItem,
    RawSearchPayload,
};
use crate::query::{classify, ClassifiedQuery, QueryKind};

pub mod mapping;
pub mod pagination;

use mapping::{map_api_to_result, map_documentation_to_result};

pub const SEARCH_RETRIEVAL_ERROR: &str = "Error while retrieving search results";

#[derive(Debug, Error)]
pub enum SearchError {
    /// The facade failed; its classification is kept, its message replaced.
    #[error("Error while retrieving search results")]
    Retrieval {
        handler: ErrorHandler,
        #[source]
        source: ConsumerError,
    },
}

impl SearchError {
    pub fn error_handler(&self) -> &ErrorHandler {
        match self {
            SearchError::Retrieval { handler, .. } => handler,
        }
    }
}

impl From<ConsumerError> for SearchError {
    fn from(source: ConsumerError) -> Self {
        SearchError::Retrieval { handler: source.error_handler(), source }
    }
}

/// The result shapes the search page knows how to present.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultItem {
    Api(Api),
    ApiProduct(ApiProduct),
    DocumentationPair(Documentation, Api),
}

impl ResultItem {
    /// `None` for shapes that have no presentation.
    pub fn from_raw(raw: RawItem) -> Option<ResultItem> {
        match raw {
            RawItem::Api(api) => Some(ResultItem::Api(api)),
            RawItem::ApiProduct(product) => Some(ResultItem::ApiProduct(product)),
            RawItem::DocumentationPair(doc, api) => Some(ResultItem::DocumentationPair(doc, api)),
            RawItem::Unrecognized { .. } => None,
        }
    }

    pub fn to_result(&self) -> SearchResultDto {
        match self {
            ResultItem::Api(api) => map_api_to_result(api),
            ResultItem::ApiProduct(product) => map_api_to_result(product),
            ResultItem::DocumentationPair(doc, api) => map_documentation_to_result(doc, api),
        }
    }
}

/// Runs one search for one caller: classifies the query, reports it, calls
/// the facade once and reshapes whatever comes back into a single page.
pub struct ResultNormalizer<'a> {
    consumer: &'a dyn ApiConsumer,
    analytics: &'a dyn SearchAnalytics,
    settings: &'a SearchSettings,
    username: &'a str,
}

impl<'a> ResultNormalizer<'a> {
    pub fn new(
        consumer: &'a dyn ApiConsumer,
        analytics: &'a dyn SearchAnalytics,
        settings: &'a SearchSettings,
        username: &'a str,
    ) -> Self {
        Self { consumer, analytics, settings, username }
    }

    pub fn search(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
        query: Option<&str>,
        organization: &str,
    ) -> Result<SearchResultList, SearchError> {
        let limit = limit.unwrap_or(self.settings.default_limit);
        let offset = offset.unwrap_or(PAGINATION_OFFSET_DEFAULT);
        let query = classify(query);

        if let Err(err) = self.analytics.publish_search_query(&query.text, self.username, organization) {
            warn!("[search] failed to publish query {:?}: {:?}", query.text, err);
        }

        let mut payload = self.dispatch(&query, organization, offset, limit)?;
        let items = payload.take_results().into_sequence();
        let length = payload.length();

        let mut dropped: Vec<String> = Vec::new();
        let list: Vec<SearchResultDto> = items
            .into_iter()
            .filter_map(|raw| match raw {
                RawItem::Unrecognized { kind } => {
                    dropped.push(kind);
                    None
                }
                other => ResultItem::from_raw(other),
            })
            .map(|item| item.to_result())
            .collect();
        if !dropped.is_empty() {
            warn!(
                "[search] dropped {} unrecognized result(s) for {:?}: {:?}",
                dropped.len(),
                query.text,
                dropped
            );
        }

        debug!(
            "[search] {} via {}: {} of {} result(s) at offset {}",
            query.text,
            self.consumer.consumer_name(),
            list.len(),
            length,
            offset
        );

        Ok(SearchResultList {
            count: list.len(),
            list,
            pagination: pagination::pagination(&self.settings.search_path, &query.text, offset, limit, length),
        })
    }

    fn dispatch(
        &self,
        query: &ClassifiedQuery,
        organization: &str,
        offset: u32,
        limit: u32,
    ) -> Result<RawSearchPayload, SearchError> {
        let payload = match query.kind {
            QueryKind::Content => {
                self.consumer
                    .search_paginated_content(&query.text, organization, offset, limit)?
            }
            QueryKind::General => {
                self.consumer
                    .search_paginated_apis(&query.text, organization, offset, limit, None, None)?
            }
        };
        Ok(payload)
    }
}
