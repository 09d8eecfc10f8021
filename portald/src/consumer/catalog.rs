use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::query::{split_scope, CONTENT_SEARCH_TYPE_PREFIX, WILDCARD};

use super::{
    Api, ApiConsumer, ApiIdentifier, ApiProduct, ConsumerError, ConsumerResult, Documentation,
    RawItem, RawResults, RawSearchPayload,
};

/// Scope that selects documentation search on the general search path.
pub const DOC_SEARCH_TYPE_PREFIX: &str = "doc";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A document plus the uuid of the API it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    pub api_uuid: String,
    #[serde(flatten)]
    pub documentation: Documentation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationCatalog {
    #[serde(default)]
    pub apis: Vec<Api>,
    #[serde(default)]
    pub products: Vec<ApiProduct>,
    #[serde(default)]
    pub documents: Vec<CatalogDocument>,
}

impl OrganizationCatalog {
    fn owner_of(&self, doc: &CatalogDocument) -> Option<&Api> {
        self.apis.iter().find(|a| a.uuid == doc.api_uuid)
    }

    /// Documents whose name or summary match, paired with their owning API.
    /// Documents without a known owner are never returned.
    fn matching_documents<'a>(
        &'a self,
        term: &'a str,
    ) -> impl Iterator<Item = (&'a CatalogDocument, &'a Api)> + 'a {
        self.documents.iter().filter_map(move |doc| {
            let owner = self.owner_of(doc)?;
            let d = &doc.documentation;
            matches_any(&[Some(d.name.as_str()), d.summary.as_deref()], term).then_some((doc, owner))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiField {
    Name,
    Provider,
    Context,
    Status,
    Version,
}

impl ApiField {
    fn parse(scope: &str) -> Option<ApiField> {
        match scope {
            "name" => Some(ApiField::Name),
            "provider" => Some(ApiField::Provider),
            "context" => Some(ApiField::Context),
            "status" => Some(ApiField::Status),
            "version" => Some(ApiField::Version),
            _ => None,
        }
    }

    fn value<'a>(self, id: &'a ApiIdentifier, context: &'a str, status: &'a str) -> &'a str {
        match self {
            ApiField::Name => &id.name,
            ApiField::Provider => &id.provider,
            ApiField::Context => context,
            ApiField::Status => status,
            ApiField::Version => &id.version,
        }
    }
}

/// In-process stand-in for the upstream search facade. Each organization
/// owns its own APIs, products and documents; paging is applied here the
/// way the real facade would.
#[derive(Debug, Default)]
pub struct CatalogConsumer {
    organizations: HashMap<String, OrganizationCatalog>,
}

impl CatalogConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, name: impl Into<String>, catalog: OrganizationCatalog) -> Self {
        self.organizations.insert(name.into(), catalog);
        self
    }

    /// Parse a JSON object mapping organization names to catalogs.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let organizations: HashMap<String, OrganizationCatalog> = serde_json::from_str(text)?;
        Ok(Self { organizations })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let consumer = Self::from_json_str(&text)?;
        info!(
            "[catalog] loaded {} organization(s) from {}",
            consumer.organizations.len(),
            path.display()
        );
        Ok(consumer)
    }

    pub fn organization_count(&self) -> usize {
        self.organizations.len()
    }

    fn organization(&self, organization: &str) -> ConsumerResult<&OrganizationCatalog> {
        self.organizations
            .get(organization)
            .ok_or_else(|| ConsumerError::OrganizationNotFound(organization.to_string()))
    }
}

impl ApiConsumer for CatalogConsumer {
    fn consumer_name(&self) -> &'static str {
        "catalog"
    }

    fn search_paginated_content(
        &self,
        query: &str,
        organization: &str,
        offset: u32,
        limit: u32,
    ) -> ConsumerResult<RawSearchPayload> {
        let catalog = self.organization(organization)?;
        let term = match split_scope(query) {
            Some((scope, term)) if scope.starts_with(CONTENT_SEARCH_TYPE_PREFIX) => term,
            _ => return Err(ConsumerError::InvalidQuery(query.to_string())),
        };

        let mut hits: Vec<RawItem> = Vec::new();
        for api in &catalog.apis {
            let fields = [Some(api.id.name.as_str()), api.description.as_deref(), Some(api.context.as_str())];
            if matches_any(&fields, term) {
                hits.push(RawItem::Api(api.clone()));
            }
        }
        for product in &catalog.products {
            let fields = [Some(product.id.name.as_str()), product.description.as_deref()];
            if matches_any(&fields, term) {
                hits.push(RawItem::ApiProduct(product.clone()));
            }
        }
        for (doc, owner) in catalog.matching_documents(term) {
            hits.push(RawItem::DocumentationPair(doc.documentation.clone(), owner.clone()));
        }

        let total = hits.len();
        debug!("[catalog] content search {:?} in {}: {} match(es)", term, organization, total);
        Ok(RawSearchPayload::with_results(
            RawResults::Sequence(page(hits, offset, limit)),
            total as i64,
        ))
    }

    fn search_paginated_apis(
        &self,
        query: &str,
        organization: &str,
        offset: u32,
        limit: u32,
        _filter: Option<&str>,
        _secondary_filter: Option<&str>,
    ) -> ConsumerResult<RawSearchPayload> {
        let catalog = self.organization(organization)?;
        let (scope, term) =
            split_scope(query).ok_or_else(|| ConsumerError::InvalidQuery(query.to_string()))?;
        let scope = scope.to_ascii_lowercase();

        if scope == DOC_SEARCH_TYPE_PREFIX {
            let mut docs: Vec<(String, RawItem)> = catalog
                .matching_documents(term)
                .map(|(doc, owner)| {
                    let item = RawItem::DocumentationPair(doc.documentation.clone(), owner.clone());
                    (doc.documentation.id.clone(), item)
                })
                .collect();
            docs.sort_by(|a, b| a.0.cmp(&b.0));
            let total = docs.len();
            debug!("[catalog] doc search {:?} in {}: {} match(es)", term, organization, total);
            let keyed: BTreeMap<String, RawItem> = page(docs, offset, limit).into_iter().collect();
            return Ok(RawSearchPayload::with_results(RawResults::KeyedMap(keyed), total as i64));
        }

        let field = ApiField::parse(&scope)
            .ok_or_else(|| ConsumerError::InvalidQuery(format!("unsupported search field '{}'", scope)))?;

        let mut hits: Vec<(String, RawItem)> = Vec::new();
        for api in &catalog.apis {
            if matches(field.value(&api.id, &api.context, &api.status), term) {
                hits.push((sort_key(&api.id), RawItem::Api(api.clone())));
            }
        }
        for product in &catalog.products {
            if matches(field.value(&product.id, &product.context, &product.state), term) {
                hits.push((sort_key(&product.id), RawItem::ApiProduct(product.clone())));
            }
        }
        hits.sort_by(|a, b| a.0.cmp(&b.0));

        let total = hits.len();
        debug!("[catalog] {} search {:?} in {}: {} match(es)", scope, term, organization, total);
        let items = page(hits, offset, limit).into_iter().map(|(_, item)| item).collect();
        Ok(RawSearchPayload::with_results(RawResults::Unordered(items), total as i64))
    }
}

fn sort_key(id: &ApiIdentifier) -> String {
    format!("{}\u{1f}{}", id.name.to_ascii_lowercase(), id.version)
}

fn matches(haystack: &str, term: &str) -> bool {
    if term.is_empty() || term == WILDCARD {
        return true;
    }
    haystack.to_lowercase().contains(&term.to_lowercase())
}

fn matches_any(fields: &[Option<&str>], term: &str) -> bool {
    fields.iter().flatten().any(|f| matches(f, term))
}

fn page<T>(items: Vec<T>, offset: u32, limit: u32) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}
