// tests/classification.rs
//! Classification of raw listing records into the comment tree and the
//! extracted post.

use pretty_assertions::assert_eq;
use reddit2md::{
    classify_thing, parse_listing_page, process_page, AppError, CommentId, CommentTree, Thing,
};
use serde_json::json;

fn thing(value: serde_json::Value) -> Thing {
    serde_json::from_value(value).unwrap()
}

fn comment(id: &str, body: &str, replies: serde_json::Value) -> Thing {
    thing(json!({
        "kind": "t1",
        "data": {
            "id": id,
            "created_utc": 0.0,
            "body": body,
            "author": "bob",
            "replies": replies
        }
    }))
}

#[test]
fn sentinel_replies_insert_one_comment_without_recursing() {
    let mut tree = CommentTree::new();
    let record = comment("c1", "Nice post", json!("more"));

    let result = classify_thing(&record, &mut tree).unwrap();

    assert!(result.is_none());
    assert_eq!(tree.len(), 1);
    let node = tree.find(&CommentId::parse("c1").unwrap()).unwrap();
    assert_eq!(node.record().content, "Nice post");
    assert_eq!(node.children().count(), 0);
}

#[test]
fn nested_replies_attach_at_increasing_depths() {
    let mut tree = CommentTree::new();
    let record = comment(
        "c1",
        "top",
        json!({
            "kind": "Listing",
            "data": { "children": [
                {
                    "kind": "t1",
                    "data": {
                        "id": "c2",
                        "created_utc": 1.0,
                        "body": "middle",
                        "author": "carol",
                        "replies": {
                            "kind": "Listing",
                            "data": { "children": [
                                {
                                    "kind": "t1",
                                    "data": {
                                        "id": "c3",
                                        "created_utc": 2.0,
                                        "body": "bottom",
                                        "author": "dave",
                                        "replies": ""
                                    }
                                }
                            ]}
                        }
                    }
                }
            ]}
        }),
    );

    classify_thing(&record, &mut tree).unwrap();

    let walk: Vec<(usize, String)> = tree
        .iter()
        .map(|(depth, node)| (depth, node.key().as_str().to_string()))
        .collect();
    assert_eq!(
        walk,
        vec![
            (0, "c1".to_string()),
            (1, "c2".to_string()),
            (2, "c3".to_string())
        ]
    );
}

#[test]
fn link_record_extracts_post_and_leaves_tree_alone() {
    let mut tree = CommentTree::new();
    let record = thing(json!({
        "kind": "t3",
        "data": {
            "id": "abc123",
            "title": "My Title",
            "selftext": "",
            "author": "alice",
            "subreddit": "test",
            "created_utc": 0.0,
            "over_18": true,
            "permalink": "/r/test/comments/abc123/my_title/"
        }
    }));

    let post = classify_thing(&record, &mut tree).unwrap().unwrap();

    assert_eq!(post.slug, "my_title");
    assert_eq!(post.canonical_url, "https://reddit.com/r/test/comments/abc123/my_title/");
    assert!(post.nsfw);
    assert!(tree.is_empty());
}

#[test]
fn irrelevant_and_unknown_kinds_are_ignored() {
    let mut tree = CommentTree::new();
    for kind in ["t2", "t4", "t5", "t6", "t9", "more"] {
        let record = thing(json!({ "kind": kind, "data": { "anything": true } }));
        let result = classify_thing(&record, &mut tree).unwrap();
        assert!(result.is_none(), "kind {} should be ignored", kind);
    }
    assert!(tree.is_empty());
}

#[test]
fn malformed_comment_propagates_as_error() {
    let mut tree = CommentTree::new();
    // Missing the body field its kind promises
    let record = thing(json!({
        "kind": "t1",
        "data": { "id": "c1", "created_utc": 0.0, "author": "bob" }
    }));

    let err = classify_thing(&record, &mut tree).unwrap_err();
    match err {
        AppError::MalformedRecord { kind, .. } => assert_eq!(kind, "t1"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn process_page_returns_post_and_fills_tree() {
    let mut tree = CommentTree::new();
    let things = vec![
        thing(json!({
            "kind": "t3",
            "data": {
                "id": "x1",
                "title": "Hello World",
                "selftext": "Body text",
                "author": "alice",
                "subreddit": "demo",
                "created_utc": 0.0,
                "over_18": false,
                "permalink": "/r/demo/comments/x1/hello_world/"
            }
        })),
        comment("c1", "Nice post", json!("more")),
    ];

    let post = process_page(&things, &mut tree).unwrap().unwrap();

    assert_eq!(post.id.as_str(), "x1");
    assert_eq!(tree.len(), 1);
}

#[test]
fn listing_page_flattens_children_in_order() {
    let body = json!([
        { "kind": "Listing", "data": { "children": [
            { "kind": "t3", "data": {} }
        ]}},
        { "kind": "Listing", "data": { "children": [
            { "kind": "t1", "data": {} },
            { "kind": "t1", "data": {} }
        ]}}
    ])
    .to_string();

    let things = parse_listing_page(&body, "https://reddit.com/x.json").unwrap();
    let kinds: Vec<&str> = things.iter().map(|t| t.kind.as_str()).collect();
    assert_eq!(kinds, vec!["t3", "t1", "t1"]);
}

#[test]
fn in_band_status_is_an_upstream_failure() {
    let body = json!({ "message": "Not Found", "status": 404 }).to_string();

    let err = parse_listing_page(&body, "https://reddit.com/x.json").unwrap_err();
    match err {
        AppError::UpstreamFailure { status, url } => {
            assert_eq!(status, 404);
            assert_eq!(url, "https://reddit.com/x.json");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_listing_body_is_malformed() {
    let err = parse_listing_page("{\"unexpected\": true}", "u").unwrap_err();
    assert!(matches!(err, AppError::MalformedResponse(_)));
}
