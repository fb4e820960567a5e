//! Marketo webhook adapter — turns a Marketo event notification into a single
//! unstructured `com.marketo/event` raw event with normalized timestamps.

use std::sync::OnceLock;

use tracing::{debug, warn};
use tracker_core::{AdapterFailure, CollectorPayload, RawEvent, SchemaKey, SchemaVer};

use super::{parse_body, EventAdapter, UnstructEventParams};
use crate::date::MARKETO_DATE_FORMAT;
use crate::outcome::{accumulate, AdapterOutcome, NonEmpty};
use crate::schema::{SchemaCatalog, SchemaResolver};
use crate::transform::PayloadTransformer;

pub const VENDOR_NAME: &str = "Marketo";
pub const API_VENDOR: &str = "com.marketo";
pub const API_VERSION: &str = "v1";
pub const TRACKER_VERSION: &str = "com.marketo-v1";
const PLATFORM: &str = "srv";

/// Marketo only ever posts one kind of notification.
const EVENT_TYPE: &str = "event";

/// Fields Marketo sends as `yyyy-MM-dd HH:mm:ss` strings.
pub const DATE_FIELDS: &[&str] = &[
    "acquisition_date",
    "created_at",
    "email_suspended_at",
    "last_referred_enrollment",
    "last_referred_visit",
    "updated_at",
    "datetime",
];

const TRANSFORMER: PayloadTransformer = PayloadTransformer::new(DATE_FIELDS, MARKETO_DATE_FORMAT);

/// Event type → schema URI for Marketo, built on first use.
pub fn schema_catalog() -> &'static SchemaCatalog {
    static CATALOG: OnceLock<SchemaCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        SchemaCatalog::new([(
            EVENT_TYPE,
            SchemaKey::new(API_VENDOR, "event", "jsonschema", SchemaVer::new(2, 0, 0)),
        )])
    })
}

/// Marketo adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketoAdapter;

impl MarketoAdapter {
    pub fn new() -> Self {
        Self
    }

    fn body_to_event(
        &self,
        body: &str,
        payload: &CollectorPayload,
    ) -> Result<RawEvent, NonEmpty<AdapterFailure>> {
        let parsed = parse_body(VENDOR_NAME, body).map_err(NonEmpty::one)?;
        let transformed = TRANSFORMER.transform(parsed)?;
        let schema = schema_catalog()
            .resolve(Some(EVENT_TYPE), VENDOR_NAME)
            .map_err(NonEmpty::one)?;

        let params = UnstructEventParams::new(TRACKER_VERSION, PLATFORM, schema, transformed)
            .with_querystring(&payload.querystring)
            .build();

        Ok(RawEvent::from_payload(payload, params))
    }
}

impl EventAdapter for MarketoAdapter {
    fn vendor(&self) -> &str {
        API_VENDOR
    }

    fn version(&self) -> &str {
        API_VERSION
    }

    fn to_raw_events(
        &self,
        payload: &CollectorPayload,
        _resolver: &dyn SchemaResolver,
    ) -> AdapterOutcome {
        let body = match payload.body.as_deref() {
            Some(body) => body,
            None => {
                warn!(vendor = VENDOR_NAME, "rejecting payload without a body");
                return AdapterOutcome::failure(AdapterFailure::EmptyBody {
                    vendor: VENDOR_NAME.to_string(),
                });
            }
        };

        let outcome = accumulate([self.body_to_event(body, payload)]);

        debug!(
            vendor = VENDOR_NAME,
            success = outcome.is_success(),
            querystring_params = payload.querystring.len(),
            "Marketo payload adapted"
        );

        outcome
    }
}
