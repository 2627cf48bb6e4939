//! Function definitions: one per registered command, tagged by trigger kind.
//!
//! Definitions arrive partially configured. The resolution pass fills in
//! every `Option` that has a default and computes the derived fields, after
//! which a definition is complete and treated as immutable.

use crate::command_type::{CommandType, FieldType};
use crate::route::RouteId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub name: String,
    pub command_type: CommandType,
    pub namespace: Option<String>,
    pub uses_validator: bool,
    pub deserializer_type: Option<String>,
    pub no_command_handler: bool,
    pub trigger: Trigger,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, command_type: CommandType, trigger: Trigger) -> Self {
        Self {
            name: name.into(),
            command_type,
            namespace: None,
            uses_validator: false,
            deserializer_type: None,
            no_command_handler: false,
            trigger,
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command_type.name
    }

    pub fn http(&self) -> Option<&HttpTrigger> {
        match &self.trigger {
            Trigger::Http(http) => Some(http),
            _ => None,
        }
    }

    pub fn change_feed(&self) -> Option<&ChangeFeedTrigger> {
        match &self.trigger {
            Trigger::ChangeFeed(change_feed) => Some(change_feed),
            _ => None,
        }
    }
}

/// Trigger configuration by kind.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    Http(HttpTrigger),
    ChangeFeed(ChangeFeedTrigger),
    #[serde(rename_all = "camelCase")]
    Timer { cron_expression: String },
    #[serde(rename_all = "camelCase")]
    Queue {
        connection: String,
        queue_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Topic {
        connection: String,
        topic_name: String,
        subscription_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Blob { connection: String, path: String },
    #[serde(rename_all = "camelCase")]
    EventHub {
        connection: String,
        event_hub_name: String,
    },
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::Http(_) => "http",
            Trigger::ChangeFeed(_) => "change_feed",
            Trigger::Timer { .. } => "timer",
            Trigger::Queue { .. } => "queue",
            Trigger::Topic { .. } => "topic",
            Trigger::Blob { .. } => "blob",
            Trigger::EventHub { .. } => "event_hub",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpVerb {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Head => "HEAD",
            HttpVerb::Options => "OPTIONS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationMode {
    Anonymous,
    #[default]
    Function,
    TokenValidation,
}

/// Maps command fields to request headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBindingConfiguration {
    #[serde(default)]
    pub enabled: bool,
    /// Field name to header name.
    #[serde(default)]
    pub mappings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteParameter {
    pub name: String,
    pub field_type: FieldType,
    pub is_optional: bool,
    pub is_nullable_type: bool,
    /// Placeholder name as written in the template.
    pub route_name: String,
    /// Type expression used for the route binding; `int?` for an optional
    /// placeholder over a bare `int` field.
    pub route_type_name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpParameter {
    pub name: String,
    pub field_type: FieldType,
    pub is_optional: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HttpTrigger {
    pub route: Option<String>,
    pub route_configuration: RouteId,
    pub verbs: BTreeSet<HttpVerb>,
    pub authorization: Option<AuthorizationMode>,
    pub claims_principal_authorization_type: Option<String>,
    pub header_binding: Option<HeaderBindingConfiguration>,
    pub response_handler_type: Option<String>,
    pub token_header: Option<String>,
    pub token_validator_type: Option<String>,

    pub validates_token: bool,
    pub is_validation_result: bool,
    pub is_stream_command: bool,

    pub route_parameters: Vec<RouteParameter>,
    pub query_parameters: Vec<HttpParameter>,
    pub form_parameters: Vec<HttpParameter>,
}

impl HttpTrigger {
    pub fn new(route: Option<String>, route_configuration: RouteId) -> Self {
        Self {
            route,
            route_configuration,
            verbs: BTreeSet::new(),
            authorization: None,
            claims_principal_authorization_type: None,
            header_binding: None,
            response_handler_type: None,
            token_header: None,
            token_validator_type: None,
            validates_token: false,
            is_validation_result: false,
            is_stream_command: false,
            route_parameters: Vec::new(),
            query_parameters: Vec::new(),
            form_parameters: Vec::new(),
        }
    }

    pub fn with_verb(mut self, verb: HttpVerb) -> Self {
        self.verbs.insert(verb);
        self
    }

    pub fn with_authorization(mut self, mode: AuthorizationMode) -> Self {
        self.authorization = Some(mode);
        self
    }
}

/// A field of a change-feed command as it appears in the document.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentProperty {
    pub name: String,
    pub wire_name: String,
    pub type_name: String,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeFeedTrigger {
    pub connection: String,
    pub database: String,
    pub collection: String,
    #[serde(default)]
    pub lease_collection: Option<String>,
    #[serde(default)]
    pub start_from_beginning: bool,
    /// Deserialize documents into the command instead of passing them raw.
    #[serde(default = "default_convert_to_command")]
    pub convert_to_command: bool,

    #[serde(skip_deserializing)]
    pub is_document_command: bool,
    #[serde(skip_deserializing)]
    pub is_document_batch_command: bool,
    #[serde(skip_deserializing)]
    pub command_properties: Vec<DocumentProperty>,
}

fn default_convert_to_command() -> bool {
    true
}

impl ChangeFeedTrigger {
    pub fn new(
        connection: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            connection: connection.into(),
            database: database.into(),
            collection: collection.into(),
            convert_to_command: true,
            ..Self::default()
        }
    }
}
