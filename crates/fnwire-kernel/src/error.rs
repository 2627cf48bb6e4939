//! Error types for fnwire kernel operations.

use crate::route::RouteId;

pub mod failure_class {
    pub const AMBIGUOUS_DOCUMENT_COMMAND: &str = "ambiguous_document_command";
    pub const MISSING_TOKEN_VALIDATOR: &str = "missing_token_validator";
    pub const MALFORMED_ROUTE: &str = "malformed_route";
    pub const UNRESOLVED_ROUTE_PARAMETER: &str = "unresolved_route_parameter";
    pub const UNKNOWN_ROUTE: &str = "unknown_route";
}

/// Configuration errors raised by the resolution pass. Any one of them
/// aborts resolution for the whole definition set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The command carries both change-feed classifications.
    #[error(
        "command {command} implements both the document and the document batch capability - it can only implement one of them"
    )]
    AmbiguousDocumentCommand { command: String },

    /// Token validation is requested but no validator type resolved.
    #[error(
        "command {command} expects to be authenticated with token validation but no token validator is registered"
    )]
    MissingTokenValidator { command: String },

    /// A placeholder in the route template has an empty body.
    #[error("bad route parameter in route {route} for command type {command}")]
    MalformedRoute { route: String, command: String },

    /// A placeholder names no command field, or several ambiguously.
    #[error("unable to match route parameter {parameter} to a field on command type {command}")]
    UnresolvedRouteParameter { parameter: String, command: String },

    /// The definition points at a route configuration that is not registered.
    #[error("command {command} references unknown route configuration {id}")]
    UnknownRoute { id: RouteId, command: String },
}

impl ResolveError {
    /// Stable snake_case class for machine-readable reports.
    pub fn class(&self) -> &'static str {
        match self {
            ResolveError::AmbiguousDocumentCommand { .. } => {
                failure_class::AMBIGUOUS_DOCUMENT_COMMAND
            }
            ResolveError::MissingTokenValidator { .. } => failure_class::MISSING_TOKEN_VALIDATOR,
            ResolveError::MalformedRoute { .. } => failure_class::MALFORMED_ROUTE,
            ResolveError::UnresolvedRouteParameter { .. } => {
                failure_class::UNRESOLVED_ROUTE_PARAMETER
            }
            ResolveError::UnknownRoute { .. } => failure_class::UNKNOWN_ROUTE,
        }
    }

    /// The offending command type.
    pub fn command(&self) -> &str {
        match self {
            ResolveError::AmbiguousDocumentCommand { command }
            | ResolveError::MissingTokenValidator { command }
            | ResolveError::MalformedRoute { command, .. }
            | ResolveError::UnresolvedRouteParameter { command, .. }
            | ResolveError::UnknownRoute { command, .. } => command,
        }
    }
}

/// Failures loading the resolver configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Failures loading a definition manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read file: {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json at {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid toml at {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("command type {0} is declared more than once")]
    DuplicateCommand(String),

    #[error("function {function} references unknown command type {command}")]
    UnknownCommand { function: String, command: String },

    /// Two route entries for one template set a shared field differently.
    #[error("route {route} is declared more than once with conflicting {field}")]
    ConflictingRoute { route: String, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_command_and_parameter() {
        let err = ResolveError::UnresolvedRouteParameter {
            parameter: "unknownField".to_string(),
            command: "GetOrderQuery".to_string(),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"unable to match route parameter unknownField to a field on command type GetOrderQuery"
        );
        assert_eq!(err.class(), failure_class::UNRESOLVED_ROUTE_PARAMETER);
        assert_eq!(err.command(), "GetOrderQuery");
    }

    #[test]
    fn missing_validator_message_is_actionable() {
        let err = ResolveError::MissingTokenValidator {
            command: "DeleteOrder".to_string(),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"command DeleteOrder expects to be authenticated with token validation but no token validator is registered"
        );
    }

    #[test]
    fn malformed_route_message_carries_route_text() {
        let err = ResolveError::MalformedRoute {
            route: "orders/{}".to_string(),
            command: "GetOrder".to_string(),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"bad route parameter in route orders/{} for command type GetOrder"
        );
        assert_eq!(err.class(), failure_class::MALFORMED_ROUTE);
    }
}
