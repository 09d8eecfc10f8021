use portald::query::{classify, split_scope, ClassifiedQuery, QueryKind};

#[test]
fn unscoped_query_gets_content_prefix() {
    let q = classify(Some("pizza"));
    assert_eq!(
        q,
        ClassifiedQuery { text: "content:pizza".into(), kind: QueryKind::Content }
    );
}

#[test]
fn scoped_query_is_kept_verbatim() {
    for raw in ["name:PizzaShack", "provider:admin", "doc:getting started", "a:b:c"] {
        let q = classify(Some(raw));
        assert_eq!(q.text, raw);
        assert_eq!(q.kind, QueryKind::General);
    }
}

#[test]
fn explicit_content_scope_routes_to_content_search() {
    let q = classify(Some("content:rate limits"));
    assert_eq!(q.text, "content:rate limits");
    assert_eq!(q.kind, QueryKind::Content);
    assert_eq!(q.term(), "rate limits");
}

#[test]
fn missing_or_empty_query_becomes_wildcard_content_search() {
    for input in [None, Some("")] {
        let q = classify(input);
        assert_eq!(q.text, "content:*");
        assert_eq!(q.kind, QueryKind::Content);
    }
}

#[test]
fn any_scope_starting_with_content_routes_to_content_search() {
    for raw in ["contentType:json", "contents:x"] {
        let q = classify(Some(raw));
        assert_eq!(q.text, raw);
        assert_eq!(q.kind, QueryKind::Content);
    }
    assert_eq!(classify(Some("contentType:json")).scope(), "contentType");
}

#[test]
fn split_scope_splits_at_first_delimiter_and_strips_quotes() {
    assert_eq!(split_scope("name:'Pet Store'"), Some(("name", "Pet Store")));
    assert_eq!(split_scope("a:b:c"), Some(("a", "b:c")));
    assert_eq!(split_scope("plain"), None);
}
