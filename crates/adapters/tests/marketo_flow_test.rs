//! End-to-end adapter flow: payload → registry → adapter → outcome.

use serde_json::{json, Value};
use tracker_adapters::vendors::{parse_body, UnstructEventParams};
use tracker_adapters::{
    accumulate, AdapterOutcome, AdapterRegistry, EventAdapter, MarketoAdapter, NonEmpty,
    PermissiveResolver, SchemaCatalog, SchemaResolver, StaticResolver,
};
use tracker_core::config::AdaptersConfig;
use tracker_core::{
    AdapterFailure, CollectorApi, CollectorContext, CollectorPayload, CollectorSource, RawEvent,
    SchemaKey, SchemaVer,
};

const MARKETO_BODY: &str = r#"{
    "name": "webhook for A",
    "step": 6,
    "campaign": {"id": 160, "name": "avengers assemble"},
    "lead": {
        "acquisition_date": "2010-11-11 11:11:11",
        "black_listed": false,
        "first_name": "the hulk",
        "updated_at": "",
        "created_at": "2018-06-16 11:23:58",
        "last_interesting_moment_date": "2018-09-26 20:26:40"
    },
    "company": {"name": "iron man", "notes": "the something dog leapt over the lazy fox"},
    "datetime": "2018-03-07 14:28:16"
}"#;

fn payload(vendor: &str, body: Option<&str>, querystring: Vec<(&str, &str)>) -> CollectorPayload {
    CollectorPayload {
        api: CollectorApi::new(vendor, "v1"),
        querystring: querystring
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        content_type: Some("application/json".into()),
        body: body.map(String::from),
        source: CollectorSource {
            name: "clj-tomcat".into(),
            encoding: "UTF-8".into(),
            hostname: Some("collector.example.com".into()),
        },
        context: CollectorContext {
            ip_address: Some("203.0.113.1".into()),
            headers: vec!["X-Forwarded-For: 203.0.113.1".into()],
            ..Default::default()
        },
    }
}

#[test]
fn marketo_payload_is_normalized() {
    let registry = AdapterRegistry::from_config(&AdaptersConfig::default());
    let input = payload("com.marketo", Some(MARKETO_BODY), vec![("aid", "marketing")]);

    let outcome = registry.to_raw_events(&input, &PermissiveResolver);
    let events = outcome.events().expect("marketo payload should adapt");
    assert_eq!(events.len(), 1);

    let event = events.first();
    assert_eq!(event.parameter("tv"), Some("com.marketo-v1"));
    assert_eq!(event.parameter("e"), Some("ue"));
    assert_eq!(event.parameter("p"), Some("srv"));
    assert_eq!(event.parameter("aid"), Some("marketing"));
    assert_eq!(event.source().hostname.as_deref(), Some("collector.example.com"));
    assert_eq!(event.context().ip_address.as_deref(), Some("203.0.113.1"));

    let ue_pr: Value = serde_json::from_str(event.parameter("ue_pr").unwrap()).unwrap();
    let expected = json!({
        "schema": "iglu:com.snowplowanalytics.snowplow/unstruct_event/jsonschema/1-0-0",
        "data": {
            "schema": "iglu:com.marketo/event/jsonschema/2-0-0",
            "data": {
                "name": "webhook for A",
                "step": 6,
                "campaign": {"id": 160, "name": "avengers assemble"},
                "lead": {
                    "acquisition_date": "2010-11-11T11:11:11.000Z",
                    "black_listed": false,
                    "first_name": "the hulk",
                    "updated_at": "",
                    "created_at": "2018-06-16T11:23:58.000Z",
                    "last_interesting_moment_date": "2018-09-26 20:26:40"
                },
                "company": {
                    "name": "iron man",
                    "notes": "the something dog leapt over the lazy fox"
                },
                "datetime": "2018-03-07T14:28:16.000Z"
            }
        }
    });
    assert_eq!(ue_pr, expected);
}

#[test]
fn marketo_payload_without_body() {
    let outcome = MarketoAdapter::new().to_raw_events(
        &payload("com.marketo", None, Vec::new()),
        &PermissiveResolver,
    );
    assert_eq!(
        outcome.messages(),
        vec!["Request body is empty: no Marketo event to process"]
    );
}

#[test]
fn marketo_payload_with_invalid_json() {
    for body in ["", "{", "{\"lead\": [}", "not json at all", "{\"a\": 1,}"] {
        let outcome = MarketoAdapter::new().to_raw_events(
            &payload("com.marketo", Some(body), Vec::new()),
            &PermissiveResolver,
        );
        let failures = outcome.failures().expect("invalid json must fail");
        assert_eq!(failures.len(), 1, "body {body:?}");
        match failures.first() {
            AdapterFailure::MalformedJson { vendor, diagnostic } => {
                assert_eq!(vendor, "Marketo");
                assert!(!diagnostic.contains(" at line "), "{diagnostic}");
            }
            other => panic!("unexpected failure {other:?}"),
        }
    }
}

#[test]
fn outcome_serializes_for_downstream() {
    let outcome = MarketoAdapter::new().to_raw_events(
        &payload("com.marketo", Some(r#"{"datetime": "2018-03-07 14:28:16"}"#), Vec::new()),
        &PermissiveResolver,
    );
    let json = serde_json::to_value(&outcome).unwrap();
    let params = &json["events"][0]["parameters"];
    assert_eq!(params["tv"], "com.marketo-v1");
    assert_eq!(json["events"][0]["api"]["vendor"], "com.marketo");
}

/// Vendor posting a JSON array of typed events; used to exercise batch
/// accumulation through the shared adapter contract.
struct BatchAdapter {
    catalog: SchemaCatalog,
}

impl BatchAdapter {
    fn new() -> Self {
        Self {
            catalog: SchemaCatalog::new([
                (
                    "signup",
                    SchemaKey::new("com.acme", "signup", "jsonschema", SchemaVer::new(1, 0, 0)),
                ),
                (
                    "login",
                    SchemaKey::new("com.acme", "login", "jsonschema", SchemaVer::new(1, 0, 0)),
                ),
            ]),
        }
    }

    fn candidate(
        &self,
        item: &Value,
        payload: &CollectorPayload,
    ) -> Result<RawEvent, NonEmpty<AdapterFailure>> {
        let event_type = item.get("type").and_then(Value::as_str);
        let schema = self
            .catalog
            .resolve(event_type, "Acme")
            .map_err(NonEmpty::one)?;
        let params = UnstructEventParams::new("com.acme-v1", "srv", schema, item.clone())
            .with_querystring(&payload.querystring)
            .build();
        Ok(RawEvent::from_payload(payload, params))
    }
}

impl EventAdapter for BatchAdapter {
    fn vendor(&self) -> &str {
        "com.acme"
    }

    fn version(&self) -> &str {
        "v1"
    }

    fn to_raw_events(
        &self,
        payload: &CollectorPayload,
        _resolver: &dyn SchemaResolver,
    ) -> AdapterOutcome {
        let Some(body) = payload.body.as_deref() else {
            return AdapterOutcome::failure(AdapterFailure::EmptyBody {
                vendor: "Acme".into(),
            });
        };
        let items = match parse_body("Acme", body) {
            Ok(Value::Array(items)) => items,
            Ok(other) => vec![other],
            Err(e) => return AdapterOutcome::failure(e),
        };
        accumulate(items.iter().map(|item| self.candidate(item, payload)))
    }
}

#[test]
fn batch_with_some_failures_reports_only_failures() {
    let mut registry = AdapterRegistry::new();
    registry.register(Box::new(MarketoAdapter::new()));
    registry.register(Box::new(BatchAdapter::new()));
    assert_eq!(registry.len(), 2);

    let body = r#"[
        {"type": "signup"},
        {"type": "refund"},
        {"type": "login"},
        {"no_type": true},
        {"type": "signup"}
    ]"#;
    let outcome = registry.to_raw_events(
        &payload("com.acme", Some(body), Vec::new()),
        &PermissiveResolver,
    );

    assert!(outcome.events().is_none());
    assert_eq!(
        outcome.messages(),
        vec![
            "Acme event failed: type parameter [refund] not recognized",
            "Acme event failed: type parameter not provided - cannot determine event type",
        ]
    );
}

#[test]
fn batch_with_no_failures_keeps_order() {
    let adapter = BatchAdapter::new();
    let resolver = StaticResolver::new(Vec::new());
    let body = r#"[
        {"type": "login", "n": 1},
        {"type": "signup", "n": 2},
        {"type": "login", "n": 3}
    ]"#;
    let outcome = adapter.to_raw_events(&payload("com.acme", Some(body), Vec::new()), &resolver);

    let events = outcome.events().expect("all candidates resolve");
    let order: Vec<i64> = events
        .iter()
        .map(|e| {
            let ue: Value = serde_json::from_str(e.parameter("ue_pr").unwrap()).unwrap();
            ue["data"]["data"]["n"].as_i64().unwrap()
        })
        .collect();
    assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn registry_can_be_shared_across_threads() {
    let registry = std::sync::Arc::new(AdapterRegistry::from_config(&AdaptersConfig::default()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                let body = format!(r#"{{"datetime": "2018-03-07 14:28:1{i}"}}"#);
                let outcome = registry.to_raw_events(
                    &payload("com.marketo", Some(body.as_str()), Vec::new()),
                    &PermissiveResolver,
                );
                outcome.is_success()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
