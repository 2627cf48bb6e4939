use crate::cli::InputArgs;
use crate::support::{exit_rejected, print_json_or_exit, resolve_inputs};
use serde_json::json;

pub fn run(inputs: InputArgs, json_output: bool) {
    let (set, config, result) = resolve_inputs(&inputs);
    if let Err(err) = result {
        exit_rejected(&err, json_output);
    }

    if json_output {
        print_json_or_exit(&json!({
            "result": "accepted",
            "namespace": config.namespace,
            "definitions": set.definitions,
            "routes": set.routes,
        }));
        return;
    }

    println!("fnwire resolve");
    println!("  Manifest: {}", inputs.manifest);
    println!("  Namespace: {}", config.namespace);
    println!("  Definitions: {}", set.definitions.len());
    for definition in &set.definitions {
        println!(
            "  - {} [{}] command={}",
            definition.name,
            definition.trigger.kind(),
            definition.command_name()
        );
        if let Some(http) = definition.http() {
            let verbs: Vec<&str> = http.verbs.iter().map(|verb| verb.as_str()).collect();
            println!(
                "      {} /{}",
                verbs.join(","),
                http.route.as_deref().unwrap_or("")
            );
            let query: Vec<&str> = http
                .query_parameters
                .iter()
                .map(|parameter| parameter.name.as_str())
                .collect();
            if !query.is_empty() {
                println!("      query: {}", query.join(", "));
            }
            if http.validates_token {
                println!(
                    "      token: {} via {}",
                    http.token_header.as_deref().unwrap_or(""),
                    http.token_validator_type.as_deref().unwrap_or("")
                );
            }
        }
        if let Some(change_feed) = definition.change_feed() {
            let shape = if change_feed.is_document_batch_command {
                "batch"
            } else if change_feed.is_document_command {
                "document"
            } else {
                "command"
            };
            println!(
                "      {}/{} ({shape}, {} properties)",
                change_feed.database,
                change_feed.collection,
                change_feed.command_properties.len()
            );
        }
    }
}
