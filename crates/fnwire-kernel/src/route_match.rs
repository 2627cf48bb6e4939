//! Route template placeholder matching.
//!
//! Every `{...}` placeholder in a route template must bind to exactly one
//! route-eligible command field. Placeholders are matched left to right and
//! the resulting parameters keep template order.

use crate::command_type::{CommandField, CommandType};
use crate::definition::RouteParameter;
use crate::error::ResolveError;
use regex::Regex;
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(.*?)\}").expect("placeholder regex must compile"))
}

/// One `{...}` placeholder of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The text between the braces.
    pub body: &'a str,
    /// Candidate field name: the first `:` segment without a trailing `?`.
    pub name: &'a str,
    pub optional: bool,
    /// Constraint text after the first `:`, e.g. `int` in `{id:int}`.
    pub constraint: Option<&'a str>,
}

/// Placeholders of a template in left-to-right order.
pub fn placeholders(route: &str) -> Vec<Placeholder<'_>> {
    placeholder_re()
        .captures_iter(route)
        .filter_map(|caps| caps.get(1))
        .map(|body| parse_placeholder(body.as_str()))
        .collect()
}

fn parse_placeholder(body: &str) -> Placeholder<'_> {
    let optional = body.ends_with('?');
    let (head, constraint) = match body.split_once(':') {
        Some((head, rest)) => (head, Some(rest.trim_end_matches('?'))),
        None => (body, None),
    };
    Placeholder {
        body,
        name: head.trim_end_matches('?'),
        optional,
        constraint,
    }
}

/// Fields a route placeholder may bind to.
fn route_eligible_fields(command: &CommandType) -> Vec<&CommandField> {
    command
        .bindable_fields()
        .filter(|field| field.ty.is_route_eligible())
        .collect()
}

/// Case-insensitive match, narrowed to an exact-case match when more than
/// one field qualifies.
fn match_field<'c>(candidates: &[&'c CommandField], name: &str) -> Option<&'c CommandField> {
    let lowered = name.to_lowercase();
    let matching: Vec<&CommandField> = candidates
        .iter()
        .copied()
        .filter(|field| field.name.to_lowercase() == lowered)
        .collect();
    match matching.as_slice() {
        [] => None,
        [single] => Some(*single),
        several => {
            let mut exact = several.iter().filter(|field| field.name == name);
            match (exact.next(), exact.next()) {
                (Some(field), None) => Some(*field),
                _ => None,
            }
        }
    }
}

/// Derives the route parameters of `command` for `route`.
///
/// A missing template yields no parameters.
pub fn match_route_parameters(
    route: Option<&str>,
    command: &CommandType,
) -> Result<Vec<RouteParameter>, ResolveError> {
    let Some(route) = route else {
        return Ok(Vec::new());
    };

    let candidates = route_eligible_fields(command);
    let mut parameters = Vec::new();
    for placeholder in placeholders(route) {
        if placeholder.name.trim().is_empty() {
            return Err(ResolveError::MalformedRoute {
                route: route.to_string(),
                command: command.name.clone(),
            });
        }

        let field = match_field(&candidates, placeholder.name).ok_or_else(|| {
            ResolveError::UnresolvedRouteParameter {
                parameter: placeholder.name.to_string(),
                command: command.name.clone(),
            }
        })?;

        let route_type_name = if placeholder.optional && field.ty.is_bare_value() {
            format!("{}?", field.ty.type_name())
        } else {
            field.ty.type_name()
        };

        tracing::trace!(
            command = %command.name,
            placeholder = placeholder.body,
            field = %field.name,
            route_type = %route_type_name,
            "matched route placeholder"
        );

        parameters.push(RouteParameter {
            name: field.name.clone(),
            field_type: field.ty.clone(),
            is_optional: placeholder.optional,
            is_nullable_type: field.ty.is_nullable(),
            route_name: placeholder.name.to_string(),
            route_type_name,
        });
    }

    Ok(parameters)
}
