use crate::cli::InputArgs;
use crate::support::{exit_rejected, print_json_or_exit, resolve_inputs};
use serde_json::json;

pub fn run(inputs: InputArgs, json_output: bool) {
    let (set, _, result) = resolve_inputs(&inputs);
    if let Err(err) = result {
        exit_rejected(&err, json_output);
    }

    if json_output {
        print_json_or_exit(&json!({
            "result": "accepted",
            "definitionCount": set.definitions.len(),
            "routeCount": set.routes.len(),
        }));
    } else {
        println!("fnwire check");
        println!("  Manifest: {}", inputs.manifest);
        println!("  Result: accepted");
        println!("  Definitions: {}", set.definitions.len());
        println!("  Routes: {}", set.routes.len());
    }
}
