//! Completion of HTTP function definitions.
//!
//! Steps run in a fixed order: later steps read fields resolved by earlier
//! ones (token validation reads the resolved authorization mode, query
//! extraction reads the resolved route parameters).

use crate::binding::{form_parameters, query_parameters};
use crate::command_type::{Capability, CommandType};
use crate::config::ResolverConfig;
use crate::definition::{AuthorizationMode, HttpTrigger, HttpVerb};
use crate::error::ResolveError;
use crate::route::{RouteRegistry, ensure_open_api_name, strip_leading_separator};
use crate::route_match::match_route_parameters;

pub const DEFAULT_TOKEN_HEADER: &str = "Authorization";

pub fn complete_http_definition(
    command: &CommandType,
    http: &mut HttpTrigger,
    routes: &mut RouteRegistry,
    config: &ResolverConfig,
) -> Result<(), ResolveError> {
    let authorization = &config.authorization;
    let route_configuration =
        routes
            .get_mut(http.route_configuration)
            .ok_or_else(|| ResolveError::UnknownRoute {
                id: http.route_configuration,
                command: command.name.clone(),
            })?;

    let mode = *http
        .authorization
        .get_or_insert(authorization.default_authorization);
    if mode == AuthorizationMode::TokenValidation {
        http.validates_token = true;
    }

    if http.verbs.is_empty() {
        http.verbs.insert(HttpVerb::Get);
    }

    http.claims_principal_authorization_type = http
        .claims_principal_authorization_type
        .take()
        .or_else(|| {
            route_configuration
                .claims_principal_authorization_type
                .clone()
        })
        .or_else(|| authorization.claims_principal_authorization_type.clone());

    http.header_binding = http
        .header_binding
        .take()
        .or_else(|| config.defaults.header_binding.clone());
    http.response_handler_type = http
        .response_handler_type
        .take()
        .or_else(|| config.defaults.response_handler_type.clone());

    http.token_header = Some(
        http.token_header
            .take()
            .or_else(|| authorization.header_name.clone())
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string()),
    );

    http.is_validation_result = command
        .result
        .as_ref()
        .is_some_and(|result| result.is_validation_result());
    http.is_stream_command = command.implements(Capability::StreamCommand);

    http.token_validator_type = http
        .token_validator_type
        .take()
        .or_else(|| authorization.token_validator_type.clone());
    if http.validates_token && http.token_validator_type.is_none() {
        return Err(ResolveError::MissingTokenValidator {
            command: command.name.clone(),
        });
    }

    http.route = http
        .route
        .as_deref()
        .map(|route| strip_leading_separator(route).to_string());

    http.route_parameters = match_route_parameters(http.route.as_deref(), command)?;
    http.query_parameters = query_parameters(command, &http.route_parameters);
    http.form_parameters = form_parameters(command);

    if http.route.is_some() {
        ensure_open_api_name(route_configuration);
    }

    tracing::debug!(
        command = %command.name,
        route = http.route.as_deref().unwrap_or(""),
        verbs = http.verbs.len(),
        route_parameters = http.route_parameters.len(),
        query_parameters = http.query_parameters.len(),
        form_parameters = http.form_parameters.len(),
        validates_token = http.validates_token,
        "completed http definition"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_type::{CommandField, FieldType, ResultType};
    use crate::definition::HeaderBindingConfiguration;
    use crate::route::RouteConfiguration;
    use std::collections::BTreeSet;

    fn get_order() -> CommandType {
        CommandType::new("GetOrderQuery")
            .with_field(CommandField::new("orderId", FieldType::text()))
            .with_field(CommandField::new("includeLines", FieldType::value("bool")))
    }

    fn setup(route: &str) -> (RouteRegistry, HttpTrigger) {
        let mut routes = RouteRegistry::new();
        let id = routes.insert(RouteConfiguration::new(route));
        (routes, HttpTrigger::new(Some(route.to_string()), id))
    }

    #[test]
    fn defaults_verbs_authorization_and_token_header() {
        let (mut routes, mut http) = setup("/orders/{orderId}");
        complete_http_definition(
            &get_order(),
            &mut http,
            &mut routes,
            &ResolverConfig::new("App"),
        )
        .expect("resolves");

        assert_eq!(http.verbs, BTreeSet::from([HttpVerb::Get]));
        assert_eq!(http.authorization, Some(AuthorizationMode::Function));
        assert!(!http.validates_token);
        assert_eq!(http.token_header.as_deref(), Some(DEFAULT_TOKEN_HEADER));
        assert_eq!(http.route.as_deref(), Some("orders/{orderId}"));
        assert_eq!(http.route_parameters.len(), 1);
        assert_eq!(http.query_parameters.len(), 1);
        assert_eq!(http.query_parameters[0].name, "includeLines");
    }

    #[test]
    fn declared_verbs_are_kept() {
        let (mut routes, http) = setup("orders");
        let mut http = http.with_verb(HttpVerb::Post).with_verb(HttpVerb::Put);
        complete_http_definition(
            &get_order(),
            &mut http,
            &mut routes,
            &ResolverConfig::new("App"),
        )
        .expect("resolves");
        assert_eq!(http.verbs, BTreeSet::from([HttpVerb::Post, HttpVerb::Put]));
    }

    #[test]
    fn claims_type_prefers_definition_then_route_then_global() {
        let mut config = ResolverConfig::new("App");
        config.authorization.claims_principal_authorization_type = Some("Global".to_string());

        let (mut routes, mut http) = setup("orders");
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert_eq!(
            http.claims_principal_authorization_type.as_deref(),
            Some("Global")
        );

        let (mut routes, mut http) = setup("orders");
        if let Some(route) = routes.get_mut(http.route_configuration) {
            route.claims_principal_authorization_type = Some("Route".to_string());
        }
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert_eq!(
            http.claims_principal_authorization_type.as_deref(),
            Some("Route")
        );

        let (mut routes, mut http) = setup("orders");
        http.claims_principal_authorization_type = Some("Local".to_string());
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert_eq!(
            http.claims_principal_authorization_type.as_deref(),
            Some("Local")
        );
    }

    #[test]
    fn header_binding_and_response_handler_fall_back_to_globals() {
        let mut config = ResolverConfig::new("App");
        config.defaults.response_handler_type = Some("GlobalHandler".to_string());
        config.defaults.header_binding = Some(HeaderBindingConfiguration {
            enabled: true,
            ..HeaderBindingConfiguration::default()
        });

        let (mut routes, mut http) = setup("orders");
        http.response_handler_type = Some("LocalHandler".to_string());
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert_eq!(http.response_handler_type.as_deref(), Some("LocalHandler"));
        assert!(http.header_binding.as_ref().is_some_and(|h| h.enabled));
    }

    #[test]
    fn token_header_prefers_definition_then_builder() {
        let mut config = ResolverConfig::new("App");
        config.authorization.header_name = Some("X-Token".to_string());

        let (mut routes, mut http) = setup("orders");
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert_eq!(http.token_header.as_deref(), Some("X-Token"));

        let (mut routes, mut http) = setup("orders");
        http.token_header = Some("X-Local".to_string());
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert_eq!(http.token_header.as_deref(), Some("X-Local"));
    }

    #[test]
    fn token_validation_requires_a_validator() {
        let (mut routes, http) = setup("orders");
        let mut http = http.with_authorization(AuthorizationMode::TokenValidation);
        let err = complete_http_definition(
            &get_order(),
            &mut http,
            &mut routes,
            &ResolverConfig::new("App"),
        )
        .expect_err("no validator anywhere");
        assert_eq!(
            err,
            ResolveError::MissingTokenValidator {
                command: "GetOrderQuery".to_string()
            }
        );
    }

    #[test]
    fn default_token_validation_uses_builder_validator() {
        let mut config = ResolverConfig::new("App");
        config.authorization.default_authorization = AuthorizationMode::TokenValidation;
        config.authorization.token_validator_type = Some("JwtValidator".to_string());

        let (mut routes, mut http) = setup("orders");
        complete_http_definition(&get_order(), &mut http, &mut routes, &config)
            .expect("resolves");
        assert!(http.validates_token);
        assert_eq!(http.token_validator_type.as_deref(), Some("JwtValidator"));
    }

    #[test]
    fn computes_validation_result_and_stream_flags() {
        let command = get_order()
            .with_capability(Capability::StreamCommand)
            .with_result(ResultType::new("OrderValidation").with_capability(Capability::ValidationResult));
        let (mut routes, mut http) = setup("orders");
        complete_http_definition(&command, &mut http, &mut routes, &ResolverConfig::new("App"))
            .expect("resolves");
        assert!(http.is_stream_command);
        assert!(http.is_validation_result);

        let plain = get_order().with_result(ResultType::new("Order"));
        let (mut routes, mut http) = setup("orders");
        complete_http_definition(&plain, &mut http, &mut routes, &ResolverConfig::new("App"))
            .expect("resolves");
        assert!(!http.is_stream_command);
        assert!(!http.is_validation_result);
    }

    #[test]
    fn infers_open_api_name_on_shared_route() {
        let (mut routes, mut http) = setup("api/{version}/widgets/{orderId}");
        let command = get_order().with_field(CommandField::new("version", FieldType::text()));
        complete_http_definition(&command, &mut http, &mut routes, &ResolverConfig::new("App"))
            .expect("resolves");
        let route = routes.get(http.route_configuration).expect("route");
        assert_eq!(route.open_api_name.as_deref(), Some("widgets"));
    }

    #[test]
    fn routeless_definition_skips_parameters_and_naming() {
        let mut routes = RouteRegistry::new();
        let id = routes.insert(RouteConfiguration::new("orders"));
        let mut http = HttpTrigger::new(None, id);
        complete_http_definition(
            &get_order(),
            &mut http,
            &mut routes,
            &ResolverConfig::new("App"),
        )
        .expect("resolves");
        assert!(http.route_parameters.is_empty());
        assert_eq!(http.query_parameters.len(), 2);
        assert_eq!(routes.get(id).and_then(|r| r.open_api_name.clone()), None);
    }
}
