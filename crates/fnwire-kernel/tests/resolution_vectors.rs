//! Integration tests: resolve the manifest fixtures end to end.
//!
//! Each fixture in tests/fixtures/ has:
//! - config.toml: the resolver configuration
//! - manifest.json: the declared definitions
//! - expect.json: accepted, or rejected with the expected failure class

use fnwire_kernel::{
    DefinitionSet, HttpVerb, Manifest, ResolveError, ResolverConfig, resolve,
};
use serde_json::{Value, json};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(name: &str) -> (DefinitionSet, ResolverConfig, Value) {
    let dir = fixtures_dir().join(name);
    let config = ResolverConfig::load(&dir.join("config.toml"))
        .unwrap_or_else(|e| panic!("fixture {name}: {e}"));
    let set = Manifest::load(&dir.join("manifest.json"))
        .and_then(Manifest::into_definition_set)
        .unwrap_or_else(|e| panic!("fixture {name}: {e}"));
    let expect_path = dir.join("expect.json");
    let expect_str = std::fs::read_to_string(&expect_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", expect_path.display()));
    let expected: Value = serde_json::from_str(&expect_str)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", expect_path.display()));
    (set, config, expected)
}

fn outcome(result: &Result<(), ResolveError>) -> Value {
    match result {
        Ok(()) => json!({ "result": "accepted" }),
        Err(err) => json!({
            "result": "rejected",
            "failureClass": err.class(),
            "command": err.command(),
        }),
    }
}

fn run_fixture(name: &str) -> DefinitionSet {
    let (mut set, config, expected) = load_fixture(name);
    let result = resolve(&mut set, &config);
    assert_eq!(
        outcome(&result),
        expected,
        "\n\nFixture: {name}\n\nError: {:?}\n",
        result.as_ref().err()
    );
    set
}

#[test]
fn orders_api() {
    let set = run_fixture("orders_api");

    for definition in &set.definitions {
        assert_eq!(definition.namespace.as_deref(), Some("Orders.Functions"));
        assert!(definition.uses_validator);
        assert_eq!(
            definition.deserializer_type.as_deref(),
            Some("JsonDeserializer")
        );
    }

    let get_item = set.definitions[0].http().expect("http definition");
    assert_eq!(
        get_item.route.as_deref(),
        Some("orders/{orderId}/items/{itemId?}")
    );
    assert_eq!(get_item.verbs.iter().copied().collect::<Vec<_>>(), vec![HttpVerb::Get]);
    assert_eq!(
        get_item.response_handler_type.as_deref(),
        Some("DefaultResponseHandler")
    );

    let route: Vec<(&str, bool, bool, &str)> = get_item
        .route_parameters
        .iter()
        .map(|p| {
            (
                p.name.as_str(),
                p.is_optional,
                p.is_nullable_type,
                p.route_type_name.as_str(),
            )
        })
        .collect();
    assert_eq!(
        route,
        vec![
            ("orderId", false, true, "string"),
            ("itemId", true, false, "int?"),
        ]
    );

    let query: Vec<&str> = get_item
        .query_parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(query, vec!["includeHistory"]);
    assert!(get_item.query_parameters[0].is_optional);

    let upload = set.definitions[1].http().expect("http definition");
    assert_eq!(upload.form_parameters.len(), 1);
    assert_eq!(upload.form_parameters[0].name, "form");
    assert!(upload.query_parameters.is_empty());

    let feed = &set.definitions[2];
    assert!(feed.no_command_handler);
    let change_feed = feed.change_feed().expect("change-feed definition");
    assert!(change_feed.is_document_command);
    assert!(!change_feed.is_document_batch_command);
    let wire: Vec<(&str, &str)> = change_feed
        .command_properties
        .iter()
        .map(|p| (p.name.as_str(), p.wire_name.as_str()))
        .collect();
    assert_eq!(wire, vec![("id", "_id"), ("total", "total")]);
}

#[test]
fn widgets_openapi() {
    let set = run_fixture("widgets_openapi");
    assert_eq!(set.routes.len(), 1);
    let (_, route) = set.routes.iter().next().expect("one route");
    assert_eq!(route.open_api_name.as_deref(), Some("widgets"));
    for definition in &set.definitions {
        let http = definition.http().expect("http definition");
        assert_eq!(http.route_parameters.len(), 2);
        assert_eq!(http.verbs.len(), 1);
    }
}

#[test]
fn resolving_twice_keeps_the_inferred_name() {
    let (mut set, config, _) = load_fixture("widgets_openapi");
    resolve(&mut set, &config).expect("first pass");
    let first = set.clone();
    resolve(&mut set, &config).expect("second pass");
    assert_eq!(set.routes, first.routes);
}

#[test]
fn ambiguous_document() {
    run_fixture("ambiguous_document");
}

#[test]
fn missing_validator() {
    run_fixture("missing_validator");
}

#[test]
fn empty_placeholder() {
    run_fixture("empty_placeholder");
}

#[test]
fn unknown_placeholder() {
    let (mut set, config, _) = load_fixture("unknown_placeholder");
    let err = resolve(&mut set, &config).expect_err("unknown placeholder");
    assert!(err.to_string().contains("unknownField"));
    assert!(err.to_string().contains("GetThing"));
    run_fixture("unknown_placeholder");
}

#[test]
fn sensitive_placeholder() {
    run_fixture("sensitive_placeholder");
}
