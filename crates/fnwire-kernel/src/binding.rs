//! Query-string and form-body candidates of an HTTP command.

use crate::command_type::CommandType;
use crate::definition::{HttpParameter, RouteParameter};

/// Fields that may be supplied through the query string. Fields already
/// bound to a route placeholder are excluded.
pub fn query_parameters(
    command: &CommandType,
    route_parameters: &[RouteParameter],
) -> Vec<HttpParameter> {
    command
        .bindable_fields()
        .filter(|field| field.ty.is_query_supported())
        .filter(|field| {
            route_parameters
                .iter()
                .all(|parameter| parameter.name != field.name)
        })
        .map(|field| HttpParameter {
            name: field.name.clone(),
            field_type: field.ty.clone(),
            is_optional: field.ty.is_nullable(),
        })
        .collect()
}

/// Fields of the form-collection type.
pub fn form_parameters(command: &CommandType) -> Vec<HttpParameter> {
    command
        .bindable_fields()
        .filter(|field| field.ty.is_form_collection())
        .map(|field| HttpParameter {
            name: field.name.clone(),
            field_type: field.ty.clone(),
            is_optional: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_type::{CommandField, FieldType};
    use crate::route_match::match_route_parameters;

    fn search_command() -> CommandType {
        CommandType::new("SearchOrders")
            .with_field(CommandField::new("customerId", FieldType::text()))
            .with_field(CommandField::new("page", FieldType::value("int")))
            .with_field(CommandField::new("pageSize", FieldType::nullable("int")))
            .with_field(CommandField::new(
                "tags",
                FieldType::sequence(FieldType::text()),
            ))
            .with_field(CommandField::new("filter", FieldType::object("OrderFilter")))
            .with_field(CommandField::new("apiKey", FieldType::text()).security_sensitive())
            .with_field(CommandField::new("total", FieldType::value("int")).read_only())
            .with_field(CommandField::new("upload", FieldType::FormCollection))
    }

    #[test]
    fn query_candidates_are_simple_writable_fields() {
        let parameters = query_parameters(&search_command(), &[]);
        let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["customerId", "page", "pageSize", "tags"]);
    }

    #[test]
    fn query_optionality_follows_nullability() {
        let parameters = query_parameters(&search_command(), &[]);
        let optional: Vec<(&str, bool)> = parameters
            .iter()
            .map(|p| (p.name.as_str(), p.is_optional))
            .collect();
        assert_eq!(
            optional,
            vec![
                ("customerId", true),
                ("page", false),
                ("pageSize", true),
                ("tags", true),
            ]
        );
    }

    #[test]
    fn route_parameters_are_not_query_candidates() {
        let command = search_command();
        let route = match_route_parameters(Some("customers/{customerId}/orders"), &command)
            .expect("route resolves");
        let parameters = query_parameters(&command, &route);
        assert!(parameters.iter().all(|p| p.name != "customerId"));
        assert_eq!(parameters.len(), 3);
    }

    #[test]
    fn form_candidates_are_form_collections_only() {
        let parameters = form_parameters(&search_command());
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name, "upload");
        assert!(!parameters[0].is_optional);
    }

    #[test]
    fn sensitive_form_collection_is_excluded() {
        let command = CommandType::new("Upload").with_field(
            CommandField::new("signedForm", FieldType::FormCollection).security_sensitive(),
        );
        assert!(form_parameters(&command).is_empty());
    }
}
