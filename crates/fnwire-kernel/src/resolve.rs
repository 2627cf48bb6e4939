//! The resolution pass over a definition set.
//!
//! ```text
//! DefinitionSet ──normalize──▶ namespace, validator, deserializer, no-handler
//!       │
//!       └──dispatch by trigger──▶ Http        → complete_http_definition
//!                                 ChangeFeed  → complete_change_feed_definition
//!                                 other kinds → unchanged
//! ```
//!
//! The pass is all-or-nothing: it runs on a scratch copy and only replaces
//! the caller's set when every definition resolved.

use crate::change_feed::complete_change_feed_definition;
use crate::command_type::Capability;
use crate::config::ResolverConfig;
use crate::definition::{FunctionDefinition, Trigger};
use crate::error::ResolveError;
use crate::http::complete_http_definition;
use crate::route::RouteRegistry;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionSet {
    pub definitions: Vec<FunctionDefinition>,
    pub routes: RouteRegistry,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, definition: FunctionDefinition) {
        self.definitions.push(definition);
    }
}

/// Assigns the fields every definition shares regardless of trigger kind.
pub fn normalize_definition(definition: &mut FunctionDefinition, config: &ResolverConfig) {
    definition.namespace = Some(config.namespace.clone());
    definition.uses_validator = config.validator_type.is_some();
    if definition.deserializer_type.is_none() {
        definition.deserializer_type = config.defaults.deserializer_type.clone();
    }
    // Only ever sets the flag: it may also come from earlier configuration.
    if definition.command_type.implements(Capability::NoHandler) {
        definition.no_command_handler = true;
    }
}

/// Runs the completion routine matching the definition's trigger kind.
pub fn complete_definition(
    definition: &mut FunctionDefinition,
    routes: &mut RouteRegistry,
    config: &ResolverConfig,
) -> Result<(), ResolveError> {
    let command = &definition.command_type;
    match &mut definition.trigger {
        Trigger::Http(http) => complete_http_definition(command, http, routes, config),
        Trigger::ChangeFeed(change_feed) => complete_change_feed_definition(command, change_feed),
        Trigger::Timer { .. }
        | Trigger::Queue { .. }
        | Trigger::Topic { .. }
        | Trigger::Blob { .. }
        | Trigger::EventHub { .. } => Ok(()),
    }
}

/// Resolves every definition in `set`. On error `set` is left untouched.
pub fn resolve(set: &mut DefinitionSet, config: &ResolverConfig) -> Result<(), ResolveError> {
    let mut scratch = set.clone();
    for definition in &mut scratch.definitions {
        normalize_definition(definition, config);
        complete_definition(definition, &mut scratch.routes, config).inspect_err(|err| {
            tracing::debug!(
                function = %definition.name,
                failure_class = err.class(),
                "resolution aborted"
            );
        })?;
        tracing::debug!(
            function = %definition.name,
            trigger = definition.trigger.kind(),
            "resolved definition"
        );
    }
    *set = scratch;
    Ok(())
}

/// Consuming variant of [`resolve`].
pub fn resolve_owned(
    mut set: DefinitionSet,
    config: &ResolverConfig,
) -> Result<DefinitionSet, ResolveError> {
    resolve(&mut set, config)?;
    Ok(set)
}
