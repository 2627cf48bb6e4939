use crate::cli::InputArgs;
use crate::support::{exit_rejected, print_json_or_exit, resolve_inputs};
use serde_json::{Value, json};

pub fn run(inputs: InputArgs, json_output: bool) {
    let (set, _, result) = resolve_inputs(&inputs);
    if let Err(err) = result {
        exit_rejected(&err, json_output);
    }

    let rows: Vec<Value> = set
        .definitions
        .iter()
        .filter_map(|definition| {
            let http = definition.http()?;
            let open_api_name = set
                .routes
                .get(http.route_configuration)
                .and_then(|route| route.open_api_name.clone());
            Some(json!({
                "function": definition.name,
                "route": http.route,
                "verbs": http.verbs.iter().map(|verb| verb.as_str()).collect::<Vec<_>>(),
                "openApiName": open_api_name,
                "routeParameters": http.route_parameters.iter().map(|parameter| json!({
                    "name": parameter.name,
                    "routeName": parameter.route_name,
                    "type": parameter.route_type_name,
                    "optional": parameter.is_optional,
                })).collect::<Vec<_>>(),
            }))
        })
        .collect();

    if json_output {
        print_json_or_exit(&rows);
        return;
    }

    println!("fnwire routes");
    for row in &rows {
        let verbs: Vec<&str> = row["verbs"]
            .as_array()
            .map(|verbs| verbs.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        println!(
            "  {} /{} -> {} ({})",
            verbs.join(","),
            row["route"].as_str().unwrap_or(""),
            row["function"].as_str().unwrap_or(""),
            row["openApiName"].as_str().unwrap_or("-"),
        );
        if let Some(parameters) = row["routeParameters"].as_array() {
            for parameter in parameters {
                println!(
                    "      {{{}}}: {}",
                    parameter["routeName"].as_str().unwrap_or(""),
                    parameter["type"].as_str().unwrap_or("")
                );
            }
        }
    }
}
