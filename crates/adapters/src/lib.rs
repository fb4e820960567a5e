//! Vendor webhook adapters — normalize third-party webhook bodies into raw
//! unstructured events tagged with a schema URI.
//!
//! # Modules
//!
//! - [`date`] — Vendor timestamp normalization to ISO-8601 instants
//! - [`schema`] — Event-type → schema URI catalogs and the resolver seam
//! - [`transform`] — Structural date-field rewriting of JSON documents
//! - [`outcome`] — Two-sided adapter outcome and failure accumulation
//! - [`vendors`] — The [`EventAdapter`] contract and vendor implementations
//! - [`registry`] — Dispatch by API vendor/version

pub mod date;
pub mod outcome;
pub mod registry;
pub mod schema;
pub mod transform;
pub mod vendors;

pub use outcome::{accumulate, AdapterOutcome, NonEmpty};
pub use registry::AdapterRegistry;
pub use schema::{PermissiveResolver, SchemaCatalog, SchemaResolver, StaticResolver};
pub use transform::PayloadTransformer;
pub use vendors::marketo::MarketoAdapter;
pub use vendors::EventAdapter;
