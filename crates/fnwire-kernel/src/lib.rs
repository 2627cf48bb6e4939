//! # fnwire kernel
//!
//! Binding-metadata resolution: turns declared function definitions (a
//! command type plus partially specified trigger configuration) into fully
//! resolved binding descriptors, or fails with a configuration error before
//! any request is ever handled.
//!
//! ## Architecture
//!
//! ```text
//! ResolverConfig          ← namespace, validator, host + authorization defaults
//!     │
//! normalize_definition    ← shared fields on every definition
//!     │
//! complete_definition     ← dispatch on trigger kind
//!     ├── complete_http_definition
//!     │       ├── match_route_parameters   (route_match)
//!     │       ├── query_parameters / form_parameters (binding)
//!     │       └── ensure_open_api_name     (route)
//!     └── complete_change_feed_definition
//! ```
//!
//! [`resolve`] runs the pass over a whole [`DefinitionSet`] atomically.

pub mod binding;
pub mod change_feed;
pub mod command_type;
pub mod config;
pub mod definition;
pub mod error;
pub mod http;
pub mod manifest;
pub mod resolve;
pub mod route;
pub mod route_match;

pub use binding::{form_parameters, query_parameters};
pub use change_feed::{complete_change_feed_definition, document_properties};
pub use command_type::{
    Capability, CommandField, CommandType, FieldType, ResultType, TypeRegistry,
};
pub use config::{AuthorizationDefaults, HostDefaults, ResolverConfig};
pub use definition::{
    AuthorizationMode, ChangeFeedTrigger, DocumentProperty, FunctionDefinition,
    HeaderBindingConfiguration, HttpParameter, HttpTrigger, HttpVerb, RouteParameter, Trigger,
};
pub use error::{ConfigError, ManifestError, ResolveError};
pub use http::{DEFAULT_TOKEN_HEADER, complete_http_definition};
pub use manifest::Manifest;
pub use resolve::{
    DefinitionSet, complete_definition, normalize_definition, resolve, resolve_owned,
};
pub use route::{
    RouteConfiguration, RouteId, RouteRegistry, ensure_open_api_name, infer_open_api_name,
};
pub use route_match::{Placeholder, match_route_parameters, placeholders};
