use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use portal_api::response::SearchResultDto;
use portald::analytics::SearchAnalytics;
use portald::config::SearchSettings;
use portald::consumer::{
    Api, ApiConsumer, ApiIdentifier, ApiProduct, ConsumerError, ConsumerResult, DocumentSourceType,
    DocumentVisibility, Documentation, DocumentationType, PayloadValue, RawItem, RawResults,
    RawSearchPayload, LENGTH_KEY,
};
use portald::search::{ResultNormalizer, SearchError, SEARCH_RETRIEVAL_ERROR};

type Events = Arc<Mutex<Vec<String>>>;

/// Consumer that records every call and replies with a canned payload.
struct FakeConsumer {
    events: Events,
    reply: Mutex<Option<ConsumerResult<RawSearchPayload>>>,
}

impl FakeConsumer {
    fn new(events: Events, reply: ConsumerResult<RawSearchPayload>) -> Self {
        Self { events, reply: Mutex::new(Some(reply)) }
    }

    fn take_reply(&self) -> ConsumerResult<RawSearchPayload> {
        self.reply.lock().unwrap().take().expect("consumer called more than once")
    }
}

impl ApiConsumer for FakeConsumer {
    fn consumer_name(&self) -> &'static str {
        "fake"
    }

    fn search_paginated_content(
        &self,
        query: &str,
        organization: &str,
        offset: u32,
        limit: u32,
    ) -> ConsumerResult<RawSearchPayload> {
        self.events
            .lock()
            .unwrap()
            .push(format!("content {query} {organization} {offset} {limit}"));
        self.take_reply()
    }

    fn search_paginated_apis(
        &self,
        query: &str,
        organization: &str,
        offset: u32,
        limit: u32,
        filter: Option<&str>,
        secondary_filter: Option<&str>,
    ) -> ConsumerResult<RawSearchPayload> {
        self.events.lock().unwrap().push(format!(
            "apis {query} {organization} {offset} {limit} {filter:?} {secondary_filter:?}"
        ));
        self.take_reply()
    }
}

struct FakeAnalytics {
    events: Events,
    fail: bool,
}

impl SearchAnalytics for FakeAnalytics {
    fn publish_search_query(&self, query: &str, username: &str, organization: &str) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("publish {query} {username} {organization}"));
        if self.fail {
            anyhow::bail!("analytics offline");
        }
        Ok(())
    }
}

fn api(uuid: &str, name: &str) -> Api {
    Api {
        uuid: uuid.into(),
        id: ApiIdentifier { provider: "admin".into(), name: name.into(), version: "1.0.0".into() },
        context: format!("/{}", name.to_lowercase()),
        description: None,
        status: "PUBLISHED".into(),
        thumbnail_url: None,
        rating: 0.0,
        transports: None,
        business_owner: None,
        business_owner_email: None,
    }
}

fn product(uuid: &str, name: &str) -> ApiProduct {
    ApiProduct {
        uuid: uuid.into(),
        id: ApiIdentifier { provider: "admin".into(), name: name.into(), version: "1.0.0".into() },
        context: format!("/{}", name.to_lowercase()),
        description: None,
        state: "PUBLISHED".into(),
        thumbnail_url: None,
        rating: 0.0,
        transports: None,
        business_owner: None,
        business_owner_email: None,
    }
}

fn doc(id: &str) -> Documentation {
    Documentation {
        id: id.into(),
        name: format!("doc {id}"),
        doc_type: DocumentationType::HowTo,
        summary: None,
        source_type: DocumentSourceType::Inline,
        source_url: None,
        other_type_name: None,
        visibility: DocumentVisibility::ApiLevel,
    }
}

struct Harness {
    events: Events,
    consumer: FakeConsumer,
    analytics: FakeAnalytics,
    settings: SearchSettings,
}

impl Harness {
    fn new(reply: ConsumerResult<RawSearchPayload>) -> Self {
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        Self {
            consumer: FakeConsumer::new(events.clone(), reply),
            analytics: FakeAnalytics { events: events.clone(), fail: false },
            settings: SearchSettings::default(),
            events,
        }
    }

    fn normalizer(&self) -> ResultNormalizer<'_> {
        ResultNormalizer::new(&self.consumer, &self.analytics, &self.settings, "alice")
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

fn ids(list: &[SearchResultDto]) -> Vec<&str> {
    list.iter().map(|r| r.id()).collect()
}

#[test]
fn defaults_route_wildcard_to_content_search() {
    let h = Harness::new(Ok(RawSearchPayload::new()));
    let page = h.normalizer().search(None, None, None, "t1").expect("search");
    assert_eq!(
        h.events(),
        vec!["publish content:* alice t1", "content content:* t1 0 25"]
    );
    assert_eq!(page.count, 0);
    assert_eq!(page.pagination.offset, 0);
    assert_eq!(page.pagination.limit, 25);
    assert_eq!(page.pagination.total, 0);
}

#[test]
fn scoped_query_goes_to_api_search_with_empty_filters() {
    let h = Harness::new(Ok(RawSearchPayload::new()));
    h.normalizer().search(Some(10), Some(5), Some("name:pizza"), "t1").expect("search");
    assert_eq!(
        h.events(),
        vec!["publish name:pizza alice t1", "apis name:pizza t1 5 10 None None"]
    );
}

#[test]
fn scope_starting_with_content_goes_to_content_search() {
    let h = Harness::new(Ok(RawSearchPayload::new()));
    h.normalizer().search(None, None, Some("contentType:json"), "t1").expect("search");
    assert_eq!(
        h.events(),
        vec!["publish contentType:json alice t1", "content contentType:json t1 0 25"]
    );
}

#[test]
fn sequence_keeps_upstream_order() {
    let items = vec![
        RawItem::Api(api("a3", "Zeta")),
        RawItem::Api(api("a1", "Alpha")),
        RawItem::Api(api("a2", "Mid")),
    ];
    let h = Harness::new(Ok(RawSearchPayload::with_results(RawResults::Sequence(items), 3)));
    let page = h.normalizer().search(None, None, Some("pets"), "t1").expect("search");
    assert_eq!(page.count, 3);
    assert_eq!(ids(&page.list), vec!["a3", "a1", "a2"]);
    let names: Vec<&str> = page.list.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn keyed_map_follows_map_iteration_order() {
    let mut map = BTreeMap::new();
    map.insert("k2".to_string(), RawItem::DocumentationPair(doc("d2"), api("a1", "Alpha")));
    map.insert("k1".to_string(), RawItem::DocumentationPair(doc("d1"), api("a1", "Alpha")));
    let h = Harness::new(Ok(RawSearchPayload::with_results(RawResults::KeyedMap(map), 2)));
    let page = h.normalizer().search(None, None, Some("doc:guide"), "t1").expect("search");
    assert_eq!(ids(&page.list), vec!["d1", "d2"]);
    assert!(page.list.iter().all(|r| matches!(r, SearchResultDto::Document(_))));
}

#[test]
fn unordered_collection_is_flattened() {
    let items = vec![RawItem::ApiProduct(product("p1", "Bundle")), RawItem::Api(api("a1", "Alpha"))];
    let h = Harness::new(Ok(RawSearchPayload::with_results(RawResults::Unordered(items), 2)));
    let page = h.normalizer().search(None, None, Some("name:*"), "t1").expect("search");
    assert_eq!(page.count, 2);
    assert!(matches!(page.list[0], SearchResultDto::ApiProduct(_)));
    assert!(matches!(page.list[1], SearchResultDto::Api(_)));
}

#[test]
fn unrecognized_items_are_dropped_without_error() {
    let items = vec![
        RawItem::Api(api("a1", "Alpha")),
        RawItem::Unrecognized { kind: "Comment".into() },
        RawItem::Api(api("a2", "Beta")),
    ];
    let h = Harness::new(Ok(RawSearchPayload::with_results(RawResults::Sequence(items), 3)));
    let page = h.normalizer().search(None, None, None, "t1").expect("search");
    assert_eq!(page.count, 2);
    assert_eq!(ids(&page.list), vec!["a1", "a2"]);
    // total still reflects the upstream length, not the mapped count
    assert_eq!(page.pagination.total, 3);
}

#[test]
fn missing_length_counts_as_zero() {
    let payload = RawSearchPayload::new().with(
        "apis",
        PayloadValue::Results(RawResults::Sequence(vec![RawItem::Api(api("a1", "Alpha"))])),
    );
    let h = Harness::new(Ok(payload));
    let page = h.normalizer().search(Some(10), Some(0), None, "t1").expect("search");
    assert_eq!(page.count, 1);
    assert_eq!(page.pagination.total, 0);
    assert_eq!(page.pagination.next, None);
}

#[test]
fn non_integer_length_counts_as_zero() {
    let payload = RawSearchPayload::new().with(LENGTH_KEY, PayloadValue::Json(serde_json::json!("40")));
    let h = Harness::new(Ok(payload));
    let page = h.normalizer().search(None, None, None, "t1").expect("search");
    assert_eq!(page.pagination.total, 0);
}

#[test]
fn pagination_links_use_rewritten_query() {
    let h = Harness::new(Ok(RawSearchPayload::with_results(RawResults::Sequence(vec![]), 30)));
    let page = h.normalizer().search(Some(10), Some(10), Some("pets"), "t1").expect("search");
    assert_eq!(
        page.pagination.next.as_deref(),
        Some("/search?limit=10&offset=20&query=content%3Apets")
    );
    assert_eq!(
        page.pagination.previous.as_deref(),
        Some("/search?limit=10&offset=0&query=content%3Apets")
    );
}

#[test]
fn upstream_failure_is_wrapped_with_fixed_message() {
    let h = Harness::new(Err(ConsumerError::OrganizationNotFound("t9".into())));
    let err = h.normalizer().search(None, None, Some("x"), "t9").expect_err("should fail");
    assert_eq!(err.to_string(), SEARCH_RETRIEVAL_ERROR);
    let handler = err.error_handler();
    assert_eq!(handler.http_status, 404);
    assert_eq!(handler.description, "organization not found: t9");
    let SearchError::Retrieval { source, .. } = &err;
    assert!(matches!(source, ConsumerError::OrganizationNotFound(org) if org == "t9"));
}

#[test]
fn query_is_reported_even_when_search_fails() {
    let h = Harness::new(Err(ConsumerError::Backend("index down".into())));
    let _ = h.normalizer().search(None, None, Some("x"), "t1");
    let events = h.events();
    assert_eq!(events[0], "publish content:x alice t1");
    assert_eq!(events.len(), 2);
}

#[test]
fn analytics_failure_does_not_fail_search() {
    let events: Events = Arc::new(Mutex::new(Vec::new()));
    let consumer = FakeConsumer::new(
        events.clone(),
        Ok(RawSearchPayload::with_results(RawResults::Sequence(vec![RawItem::Api(api("a1", "Alpha"))]), 1)),
    );
    let analytics = FakeAnalytics { events: events.clone(), fail: true };
    let settings = SearchSettings::default();
    let page = ResultNormalizer::new(&consumer, &analytics, &settings, "bob")
        .search(None, None, None, "t1")
        .expect("search");
    assert_eq!(page.count, 1);
}

#[test]
fn configured_default_limit_is_applied() {
    let mut h = Harness::new(Ok(RawSearchPayload::new()));
    h.settings.default_limit = 7;
    let page = h.normalizer().search(None, Some(3), None, "t1").expect("search");
    assert_eq!(page.pagination.limit, 7);
    assert_eq!(h.events()[1], "content content:* t1 3 7");
}
