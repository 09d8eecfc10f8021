use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use thiserror::Error;

pub mod catalog;

pub const APIS_KEY: &str = "apis";
pub const LENGTH_KEY: &str = "length";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiIdentifier {
    pub provider: String,
    pub name: String,
    pub version: String,
}

/// Published API as held by the upstream facade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Api {
    pub uuid: String,
    pub id: ApiIdentifier,
    pub context: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub transports: Option<String>,
    #[serde(default)]
    pub business_owner: Option<String>,
    #[serde(default)]
    pub business_owner_email: Option<String>,
}

/// Bundle of API resources published as a single product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiProduct {
    pub uuid: String,
    pub id: ApiIdentifier,
    pub context: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub transports: Option<String>,
    #[serde(default)]
    pub business_owner: Option<String>,
    #[serde(default)]
    pub business_owner_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentationType {
    #[serde(rename = "HOWTO")]
    HowTo,
    Samples,
    PublicForum,
    SupportForum,
    ApiMessageFormat,
    SwaggerDoc,
    Other,
}

impl DocumentationType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentationType::HowTo => "HOWTO",
            DocumentationType::Samples => "SAMPLES",
            DocumentationType::PublicForum => "PUBLIC_FORUM",
            DocumentationType::SupportForum => "SUPPORT_FORUM",
            DocumentationType::ApiMessageFormat => "API_MESSAGE_FORMAT",
            DocumentationType::SwaggerDoc => "SWAGGER_DOC",
            DocumentationType::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentSourceType {
    Inline,
    Markdown,
    Url,
    File,
}

impl DocumentSourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentSourceType::Inline => "INLINE",
            DocumentSourceType::Markdown => "MARKDOWN",
            DocumentSourceType::Url => "URL",
            DocumentSourceType::File => "FILE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentVisibility {
    OwnerOnly,
    Private,
    #[default]
    ApiLevel,
}

impl DocumentVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentVisibility::OwnerOnly => "OWNER_ONLY",
            DocumentVisibility::Private => "PRIVATE",
            DocumentVisibility::ApiLevel => "API_LEVEL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Documentation {
    pub id: String,
    pub name: String,
    pub doc_type: DocumentationType,
    #[serde(default)]
    pub summary: Option<String>,
    pub source_type: DocumentSourceType,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub other_type_name: Option<String>,
    #[serde(default)]
    pub visibility: DocumentVisibility,
}

/// One element of the `apis` collection as the facade hands it over.
#[derive(Debug, Clone, PartialEq)]
pub enum RawItem {
    Api(Api),
    ApiProduct(ApiProduct),
    /// A document together with the API that owns it.
    DocumentationPair(Documentation, Api),
    /// Any shape the search service does not know how to present.
    Unrecognized { kind: String },
}

impl RawItem {
    pub fn kind(&self) -> &str {
        match self {
            RawItem::Api(_) => "API",
            RawItem::ApiProduct(_) => "APIProduct",
            RawItem::DocumentationPair(..) => "DOC",
            RawItem::Unrecognized { kind } => kind,
        }
    }
}

/// The `apis` collection. Which constructor arrives depends on the upstream
/// search path that ran; each has a fixed rule for becoming an ordered list.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResults {
    /// Ordered list; upstream order (relevance rank) is kept.
    Sequence(Vec<RawItem>),
    /// Keyed results; values come out in key order, relevance order is lost.
    KeyedMap(BTreeMap<String, RawItem>),
    /// Any other collection; values come out in whatever order it yields.
    Unordered(Vec<RawItem>),
}

impl RawResults {
    pub fn into_sequence(self) -> Vec<RawItem> {
        match self {
            RawResults::Sequence(items) | RawResults::Unordered(items) => items,
            RawResults::KeyedMap(map) => map.into_values().collect(),
        }
    }
}

impl Default for RawResults {
    fn default() -> Self {
        RawResults::Sequence(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue {
    Results(RawResults),
    Integer(i64),
    Json(serde_json::Value),
}

/// Untyped mapping returned by the search facade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSearchPayload {
    entries: HashMap<String, PayloadValue>,
}

impl RawSearchPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload carrying the two well-known keys.
    pub fn with_results(results: RawResults, length: i64) -> Self {
        Self::new()
            .with(APIS_KEY, PayloadValue::Results(results))
            .with(LENGTH_KEY, PayloadValue::Integer(length))
    }

    pub fn with(mut self, key: impl Into<String>, value: PayloadValue) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.entries.get(key)
    }

    /// Remove and return the `apis` collection. A missing or non-collection
    /// entry yields an empty sequence.
    pub fn take_results(&mut self) -> RawResults {
        match self.entries.remove(APIS_KEY) {
            Some(PayloadValue::Results(r)) => r,
            _ => RawResults::default(),
        }
    }

    /// Total match count across all pages. Absent, negative or non-integer
    /// values count as zero.
    pub fn length(&self) -> u64 {
        let n = match self.entries.get(LENGTH_KEY) {
            Some(PayloadValue::Integer(n)) => *n,
            Some(PayloadValue::Json(v)) => v.as_i64().unwrap_or(0),
            _ => 0,
        };
        n.max(0) as u64
    }
}

/// Structured classification carried by facade errors, kept intact when
/// the search service replaces the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorHandler {
    pub error_code: u32,
    pub http_status: u16,
    pub message: &'static str,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("organization not found: {0}")]
    OrganizationNotFound(String),
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
    #[error("search backend failure: {0}")]
    Backend(String),
}

impl ConsumerError {
    pub fn error_handler(&self) -> ErrorHandler {
        let (error_code, http_status, message) = match self {
            ConsumerError::OrganizationNotFound(_) => (900_101, 404, "Organization not found"),
            ConsumerError::InvalidQuery(_) => (900_700, 400, "Invalid search query"),
            ConsumerError::Backend(_) => (900_967, 500, "General error"),
        };
        ErrorHandler {
            error_code,
            http_status,
            message,
            description: self.to_string(),
        }
    }
}

pub type ConsumerResult<T> = Result<T, ConsumerError>;

/// Upstream search facade. Implementations own the index and do the
/// actual matching and paging; the search service only reshapes results.
pub trait ApiConsumer: Send + Sync {
    fn consumer_name(&self) -> &'static str;

    /// Search documentation content for a `content:` query.
    fn search_paginated_content(
        &self,
        query: &str,
        organization: &str,
        offset: u32,
        limit: u32,
    ) -> ConsumerResult<RawSearchPayload>;

    /// Search API metadata for any other scoped query. The two trailing
    /// filters are reserved and passed as `None` by the search service.
    fn search_paginated_apis(
        &self,
        query: &str,
        organization: &str,
        offset: u32,
        limit: u32,
        filter: Option<&str>,
        secondary_filter: Option<&str>,
    ) -> ConsumerResult<RawSearchPayload>;
}
