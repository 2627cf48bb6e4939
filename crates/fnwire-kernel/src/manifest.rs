//! Definition manifests: the declared input of a resolution pass.
//!
//! A manifest lists the command type descriptors, the HTTP routes (each with
//! the functions bound to it) and the functions of every other trigger kind.
//! JSON and TOML documents share one shape.

use crate::command_type::{CommandType, TypeRegistry};
use crate::definition::{
    AuthorizationMode, ChangeFeedTrigger, FunctionDefinition, HeaderBindingConfiguration,
    HttpTrigger, HttpVerb, Trigger,
};
use crate::error::ManifestError;
use crate::resolve::DefinitionSet;
use crate::route::RouteConfiguration;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub commands: Vec<CommandType>,
    #[serde(default)]
    pub routes: Vec<RouteInput>,
    #[serde(default)]
    pub functions: Vec<FunctionInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteInput {
    pub route: String,
    #[serde(default)]
    pub claims_principal_authorization_type: Option<String>,
    #[serde(default)]
    pub open_api_name: Option<String>,
    #[serde(default)]
    pub open_api_description: Option<String>,
    #[serde(default)]
    pub functions: Vec<HttpFunctionInput>,
}

/// Options shared by every function entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOptions {
    #[serde(default)]
    pub deserializer_type: Option<String>,
    #[serde(default)]
    pub no_command_handler: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpFunctionInput {
    #[serde(default)]
    pub name: Option<String>,
    pub command: String,
    #[serde(default)]
    pub verbs: BTreeSet<HttpVerb>,
    #[serde(default)]
    pub authorization: Option<AuthorizationMode>,
    #[serde(default)]
    pub claims_principal_authorization_type: Option<String>,
    #[serde(default)]
    pub header_binding: Option<HeaderBindingConfiguration>,
    #[serde(default)]
    pub response_handler_type: Option<String>,
    #[serde(default)]
    pub token_header: Option<String>,
    #[serde(default)]
    pub token_validator_type: Option<String>,
    #[serde(flatten)]
    pub options: FunctionOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInput {
    #[serde(default)]
    pub name: Option<String>,
    pub command: String,
    pub trigger: TriggerInput,
    #[serde(flatten)]
    pub options: FunctionOptions,
}

/// Trigger kinds declared outside a route. HTTP functions are declared under
/// `routes`, so this input type has no `http` kind and a stray one fails to
/// parse. `Trigger` itself is output only.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerInput {
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

impl From<TriggerInput> for Trigger {
    fn from(input: TriggerInput) -> Self {
        match input {
            TriggerInput::ChangeFeed(change_feed) => Trigger::ChangeFeed(change_feed),
            TriggerInput::Timer { cron_expression } => Trigger::Timer { cron_expression },
            TriggerInput::Queue {
                connection,
                queue_name,
            } => Trigger::Queue {
                connection,
                queue_name,
            },
            TriggerInput::Topic {
                connection,
                topic_name,
                subscription_name,
            } => Trigger::Topic {
                connection,
                topic_name,
                subscription_name,
            },
            TriggerInput::Blob { connection, path } => Trigger::Blob { connection, path },
            TriggerInput::EventHub {
                connection,
                event_hub_name,
            } => Trigger::EventHub {
                connection,
                event_hub_name,
            },
        }
    }
}

impl Manifest {
    pub fn from_json_str(text: &str, path: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(text).map_err(|source| ManifestError::ParseJson {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(text: &str, path: &str) -> Result<Self, ManifestError> {
        toml::from_str(text).map_err(|source| ManifestError::ParseToml {
            path: path.to_string(),
            source,
        })
    }

    /// Reads a manifest, choosing TOML for `.toml` files and JSON otherwise.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ManifestError::ReadFile {
            path: display.clone(),
            source,
        })?;
        let is_toml = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&text, &display)
        } else {
            Self::from_json_str(&text, &display)
        }
    }

    fn type_registry(&self) -> Result<TypeRegistry, ManifestError> {
        let mut registry = TypeRegistry::new();
        for command in &self.commands {
            registry
                .register(command.clone())
                .map_err(|rejected| ManifestError::DuplicateCommand(rejected.name))?;
        }
        Ok(registry)
    }

    /// Builds the unresolved definition set. HTTP functions of one route
    /// share one route configuration.
    pub fn into_definition_set(self) -> Result<DefinitionSet, ManifestError> {
        let registry = self.type_registry()?;
        let lookup = |function: &str, command: &str| {
            registry
                .get(command)
                .cloned()
                .ok_or_else(|| ManifestError::UnknownCommand {
                    function: function.to_string(),
                    command: command.to_string(),
                })
        };

        let mut set = DefinitionSet::new();
        for route in self.routes {
            let declared = RouteConfiguration {
                route: route.route.clone(),
                claims_principal_authorization_type: route.claims_principal_authorization_type,
                open_api_name: route.open_api_name,
                open_api_description: route.open_api_description,
            };
            let id = match set.routes.find_by_route(&route.route) {
                Some(id) => {
                    if let Some(existing) = set.routes.get_mut(id) {
                        merge_route(existing, declared)?;
                    }
                    id
                }
                None => set.routes.insert(declared),
            };
            for function in route.functions {
                let name = function.name.unwrap_or_else(|| function.command.clone());
                let command_type = lookup(&name, &function.command)?;
                let mut http = HttpTrigger::new(Some(route.route.clone()), id);
                http.verbs = function.verbs;
                http.authorization = function.authorization;
                http.claims_principal_authorization_type =
                    function.claims_principal_authorization_type;
                http.header_binding = function.header_binding;
                http.response_handler_type = function.response_handler_type;
                http.token_header = function.token_header;
                http.token_validator_type = function.token_validator_type;

                let mut definition =
                    FunctionDefinition::new(name, command_type, Trigger::Http(http));
                apply_options(&mut definition, function.options);
                set.push(definition);
            }
        }

        for function in self.functions {
            let name = function.name.unwrap_or_else(|| function.command.clone());
            let command_type = lookup(&name, &function.command)?;
            let mut definition =
                FunctionDefinition::new(name, command_type, function.trigger.into());
            apply_options(&mut definition, function.options);
            set.push(definition);
        }

        tracing::debug!(
            commands = registry.len(),
            routes = set.routes.len(),
            definitions = set.definitions.len(),
            "loaded manifest"
        );
        Ok(set)
    }
}

/// Folds a repeated route entry into the registered configuration. A field
/// set on only one entry is kept; differing values are rejected.
fn merge_route(
    existing: &mut RouteConfiguration,
    declared: RouteConfiguration,
) -> Result<(), ManifestError> {
    let route = existing.route.clone();
    let fields = [
        (
            &mut existing.claims_principal_authorization_type,
            declared.claims_principal_authorization_type,
            "claimsPrincipalAuthorizationType",
        ),
        (
            &mut existing.open_api_name,
            declared.open_api_name,
            "openApiName",
        ),
        (
            &mut existing.open_api_description,
            declared.open_api_description,
            "openApiDescription",
        ),
    ];
    for (slot, incoming, field) in fields {
        let Some(incoming) = incoming else {
            continue;
        };
        if slot.is_none() {
            *slot = Some(incoming);
        } else if slot.as_ref() != Some(&incoming) {
            return Err(ManifestError::ConflictingRoute {
                route: route.clone(),
                field,
            });
        }
    }
    Ok(())
}

fn apply_options(definition: &mut FunctionDefinition, options: FunctionOptions) {
    definition.deserializer_type = options.deserializer_type;
    definition.no_command_handler = options.no_command_handler;
}
