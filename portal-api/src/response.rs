#[cfg(feature = "json")]
use serde::Serialize;

/// Fields shared by API and API product results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct ApiSearchResult {
    pub id: String,
    pub name: String,
    pub transport_type: Option<String>,
    pub description: Option<String>,
    pub context: String,
    pub version: String,
    pub provider: String,
    pub status: String,
    pub thumbnail_uri: Option<String>,
    pub business_information: BusinessInformation,
    pub avg_rating: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct BusinessInformation {
    pub business_owner: Option<String>,
    pub business_owner_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "camelCase"))]
pub struct DocumentSearchResult {
    pub id: String,
    pub name: String,
    pub transport_type: Option<String>,
    pub doc_type: String,
    pub summary: Option<String>,
    pub source_type: String,
    pub source_url: Option<String>,
    pub other_doc_type: Option<String>,
    pub visibility: String,
    pub api_name: String,
    pub api_version: String,
    pub api_provider: String,
    #[cfg_attr(feature = "json", serde(rename = "apiUUID"))]
    pub api_uuid: String,
}

/// One normalized search hit, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(tag = "type"))]
pub enum SearchResultDto {
    #[cfg_attr(feature = "json", serde(rename = "API"))]
    Api(ApiSearchResult),
    #[cfg_attr(feature = "json", serde(rename = "APIProduct"))]
    ApiProduct(ApiSearchResult),
    #[cfg_attr(feature = "json", serde(rename = "DOC"))]
    Document(DocumentSearchResult),
}

impl SearchResultDto {
    pub fn id(&self) -> &str {
        match self {
            SearchResultDto::Api(r) | SearchResultDto::ApiProduct(r) => &r.id,
            SearchResultDto::Document(d) => &d.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchResultDto::Api(r) | SearchResultDto::ApiProduct(r) => &r.name,
            SearchResultDto::Document(d) => &d.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
    pub total: u64,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub next: Option<String>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub previous: Option<String>,
}

/// One page of search results. `count` is the size of `list`, not the total.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct SearchResultList {
    pub count: usize,
    pub list: Vec<SearchResultDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct ErrorBody {
    pub code: u32,
    pub message: String,
    pub description: String,
}
