use super::*;
use crate::catalog::{FieldMeta, HandlerMeta, OwnerMeta, ParameterMeta, ParameterSource};
use serde_json::json;

fn body(name: &str, fields: &[&str]) -> ParameterMeta {
    ParameterMeta::body(name, fields.iter().map(|f| FieldMeta::new(*f)).collect())
}

#[test]
fn test_group_key_prefix() {
    assert_eq!(group_key("postOrder"), "post");
    assert_eq!(group_key("putA"), "put");
    assert_eq!(group_key("deleteThing"), "delete");
    assert_eq!(group_key("patch"), "patch");
}

#[test]
fn test_group_key_leading_uppercase() {
    assert_eq!(group_key("PostOrder"), "Post");
    assert_eq!(group_key("X"), "X");
    assert_eq!(group_key("ABC"), "A");
}

#[test]
fn test_group_key_non_ascii() {
    assert_eq!(group_key("éditerÉlément"), "éditer");
}

#[test]
fn test_conventional_reads() {
    let reads = ConventionalReads::default();
    assert!(reads.is_read(&HandlerMeta::new("getOrder")));
    assert!(reads.is_read(&HandlerMeta::new("GetOrder")));
    assert!(reads.is_read(&HandlerMeta::new("fetchOrder").read()));
    assert!(!reads.is_read(&HandlerMeta::new("postOrder")));
}

#[test]
fn test_conventional_reads_custom_prefixes() {
    let reads = ConventionalReads::new(["find", " List ", ""]);
    assert_eq!(reads.prefixes(), ["find", "list"]);
    assert!(reads.is_read(&HandlerMeta::new("listOrders")));
    assert!(!reads.is_read(&HandlerMeta::new("getOrder")));
}

#[test]
fn test_shape_lowercases_and_dedups() {
    let shape = HandlerShape::new(["Id", "dueDate", "ID"]);
    assert_eq!(shape.len(), 2);
    assert!(shape.contains("duedate"));
    assert_eq!(shape.fields().collect::<Vec<_>>(), vec!["duedate", "id"]);
}

#[test]
fn test_match_score_ordering() {
    let third = MatchScore::new(1, 3);
    let whole = MatchScore::new(3, 3);
    let half = MatchScore::new(1, 2);
    assert!(whole > third);
    assert!(half > third);
    assert_eq!(MatchScore::new(2, 4), half);
    assert!((third.ratio() - 1.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(MatchScore::new(0, 0).ratio(), 0.0);
}

#[test]
fn test_field_set_from_json() {
    let fields = FieldSet::from_json(&json!({ "Id": 1, "dueDate": "2024-01-01", "nested": { "x": 1 } }));
    assert_eq!(fields.len(), 3);
    assert!(fields.contains("id"));
    assert!(fields.contains("duedate"));
    assert!(!fields.contains("x"));

    assert!(FieldSet::from_json(&json!([1, 2])).is_empty());
    assert!(FieldSet::from_json(&json!(null)).is_empty());
}

#[test]
fn test_field_set_from_body() {
    assert_eq!(FieldSet::from_body(br#"{"a":1,"B":2}"#).len(), 2);
    assert!(FieldSet::from_body(b"").is_empty());
    assert!(FieldSet::from_body(b"  \n").is_empty());
    assert!(FieldSet::from_body(b"not json").is_empty());
    assert!(FieldSet::from_body(b"\"text\"").is_empty());
}

#[test]
fn test_build_excludes_client_ignored_fields() {
    let owner = OwnerMeta::new("Accounts")
        .handler(HandlerMeta::new("putName").parameter(ParameterMeta::body(
            "rename",
            vec![FieldMeta::new("Name"), FieldMeta::client_ignored("etag")],
        )))
        .handler(HandlerMeta::new("putEmail").parameter(body("email", &["email"])));

    let index = SignatureBuilder::new().build(&[owner]).unwrap();
    let sigs = index.get("Accounts").unwrap();
    assert_eq!(sigs.len(), 2);
    assert_eq!(&*sigs[0].handler, "putName");
    assert_eq!(&*sigs[0].verb, "PUT");
    assert_eq!(sigs[0].shape, HandlerShape::new(["name"]));
    assert!(!sigs[0].shape.contains("etag"));
}

#[test]
fn test_build_skips_reads_and_inherited() {
    let owner = OwnerMeta::new("Orders")
        .handler(HandlerMeta::new("getOrder").scalar("id"))
        .handler(HandlerMeta::new("getOrders"))
        .handler(HandlerMeta::new("postOrder").parameter(body("order", &["id"])))
        .handler(
            HandlerMeta::new("postLegacy")
                .inherited()
                .parameter(body("legacy", &["id"])),
        );

    let index = SignatureBuilder::new().build(&[owner]).unwrap();
    assert!(index.is_empty());
}

#[test]
fn test_build_uri_and_scalar_parameters_do_not_qualify() {
    let owner = OwnerMeta::new("Orders")
        .handler(
            HandlerMeta::new("postOrder")
                .scalar("id")
                .parameter(ParameterMeta::uri("filter", vec![FieldMeta::new("q")]))
                .parameter(body("order", &["id", "total"])),
        )
        .handler(HandlerMeta::new("postNote").parameter(body("note", &["text"])));

    let index = SignatureBuilder::new().build(&[owner]).unwrap();
    let sigs = index.get("Orders").unwrap();
    assert_eq!(sigs[0].shape, HandlerShape::new(["id", "total"]));
}

#[test]
fn test_scalar_keeps_default_source() {
    let param = ParameterMeta::scalar("id");
    assert_eq!(param.source, ParameterSource::Body);
    assert!(!param.is_payload_model());

    // A body-sourced scalar beside the model does not count as a second model.
    let owner = OwnerMeta::new("Orders")
        .handler(
            HandlerMeta::new("postOrder")
                .scalar("version")
                .parameter(body("order", &["id"])),
        )
        .handler(HandlerMeta::new("postNote").parameter(body("note", &["text"])));
    let index = SignatureBuilder::new().build(&[owner]).unwrap();
    assert_eq!(index.get("Orders").unwrap()[0].shape, HandlerShape::new(["id"]));
}

#[test]
fn test_build_rejects_missing_body_model() {
    let owner = OwnerMeta::new("Orders")
        .handler(HandlerMeta::new("postOrder").scalar("id"))
        .handler(HandlerMeta::new("postNote").parameter(body("note", &["text"])));

    let err = SignatureBuilder::new().build(&[owner]).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::ComplexParameterCount {
            owner: "Orders".into(),
            handler: "postOrder".into(),
            count: 0,
        }
    );
}

#[test]
fn test_build_ignores_singleton_with_bad_parameters() {
    // Singleton groups never need a shape.
    let owner = OwnerMeta::new("Orders").handler(HandlerMeta::new("deleteOrder").scalar("id"));
    assert!(SignatureBuilder::new().build(&[owner]).unwrap().is_empty());
}

#[test]
fn test_build_rejects_duplicate_owner() {
    let owners = [OwnerMeta::new("Orders"), OwnerMeta::new("Orders")];
    let err = SignatureBuilder::new().build(&owners).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::DuplicateOwner {
            owner: "Orders".into()
        }
    );
}

#[test]
fn test_build_rejects_empty_handler_name() {
    let owner = OwnerMeta::new("Orders").handler(HandlerMeta::new(""));
    let err = SignatureBuilder::new().build(&[owner]).unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptyHandlerName { .. }));
}

#[test]
fn test_build_with_closure_classifier() {
    let owner = OwnerMeta::new("Orders")
        .handler(HandlerMeta::new("findOrder").parameter(body("q", &["id"])))
        .handler(HandlerMeta::new("findOther").parameter(body("q", &["other"])));

    let all_reads = SignatureBuilder::with_classifier(|h: &HandlerMeta| h.name.starts_with("find"));
    assert!(all_reads.build(&[owner.clone()]).unwrap().is_empty());

    let index = SignatureBuilder::new().build(&[owner]).unwrap();
    assert_eq!(index.get("Orders").map(<[_]>::len), Some(2));
}

#[test]
fn test_resolve_verb_is_case_insensitive() {
    let owner = OwnerMeta::new("Orders")
        .handler(HandlerMeta::new("postOrder").parameter(body("order", &["id", "total"])))
        .handler(HandlerMeta::new("postNote").parameter(body("note", &["text"])));
    let selector = ActionSelector::new(SignatureBuilder::new().build(&[owner]).unwrap());

    let fields = FieldSet::from_keys(["id", "total"]);
    let Ok(Resolution::Winner(sig)) = selector.resolve("Orders", "post", &fields) else {
        panic!("expected a winner");
    };
    assert_eq!(&*sig.handler, "postOrder");
}

#[test]
fn test_resolve_empty_payload_is_no_match() {
    let owner = OwnerMeta::new("Orders")
        .handler(HandlerMeta::new("postEmpty").parameter(body("empty", &[])))
        .handler(HandlerMeta::new("postNote").parameter(body("note", &["text"])));
    let selector = ActionSelector::new(SignatureBuilder::new().build(&[owner]).unwrap());

    let err = selector
        .resolve("Orders", "POST", &FieldSet::default())
        .unwrap_err();
    assert!(matches!(err, SelectionError::NoMatchingAction { .. }));
    assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
}

#[test]
fn test_resolve_zero_score_single_candidate_wins() {
    let owner = OwnerMeta::new("Orders")
        .handler(HandlerMeta::new("postEmpty").parameter(body("empty", &[])))
        .handler(HandlerMeta::new("postNote").parameter(body("note", &["text", "title"])));
    let selector = ActionSelector::new(SignatureBuilder::new().build(&[owner]).unwrap());

    let fields = FieldSet::from_keys(["unrelated"]);
    let Ok(Resolution::Winner(sig)) = selector.resolve("Orders", "POST", &fields) else {
        panic!("expected a winner");
    };
    assert_eq!(&*sig.handler, "postEmpty");
}
