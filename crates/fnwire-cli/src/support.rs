use crate::cli::InputArgs;
use fnwire_kernel::{DefinitionSet, Manifest, ResolveError, ResolverConfig, resolve};
use serde::Serialize;
use serde_json::{Value, json};
use std::path::Path;

/// Exit code for a configuration error found by the resolver.
pub const EXIT_REJECTED: i32 = 1;
/// Exit code for unreadable or malformed inputs.
pub const EXIT_INPUT: i32 = 2;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "fnwire.toml";

pub fn load_config_or_exit(inputs: &InputArgs) -> ResolverConfig {
    let explicit = inputs.config.is_some();
    let path = Path::new(inputs.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH));
    let mut config = if path.exists() {
        ResolverConfig::load(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(EXIT_INPUT);
        })
    } else if explicit {
        eprintln!("error: resolver config not found: {}", path.display());
        std::process::exit(EXIT_INPUT);
    } else if inputs.namespace.is_some() {
        tracing::debug!(
            path = %path.display(),
            "no resolver config, using defaults"
        );
        ResolverConfig::default()
    } else {
        eprintln!(
            "error: resolver config not found: {} (pass --config or --namespace)",
            path.display()
        );
        std::process::exit(EXIT_INPUT);
    };
    if let Some(namespace) = inputs.namespace.as_ref() {
        config.namespace = namespace.clone();
    }
    tracing::debug!(
        path = %path.display(),
        namespace = %config.namespace,
        "loaded resolver config"
    );
    config
}

pub fn load_definitions_or_exit(inputs: &InputArgs) -> DefinitionSet {
    Manifest::load(Path::new(&inputs.manifest))
        .and_then(Manifest::into_definition_set)
        .unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(EXIT_INPUT);
        })
}

/// Loads both inputs and runs the resolution pass.
pub fn resolve_inputs(
    inputs: &InputArgs,
) -> (DefinitionSet, ResolverConfig, Result<(), ResolveError>) {
    let config = load_config_or_exit(inputs);
    let mut set = load_definitions_or_exit(inputs);
    let result = resolve(&mut set, &config);
    (set, config, result)
}

pub fn rejection_payload(err: &ResolveError) -> Value {
    json!({
        "result": "rejected",
        "failureClass": err.class(),
        "command": err.command(),
        "message": err.to_string(),
    })
}

pub fn print_json_or_exit<T: Serialize>(payload: &T) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render payload: {err}");
        std::process::exit(EXIT_INPUT);
    });
    println!("{rendered}");
}

/// Reports a rejected pass in the requested format and exits.
pub fn exit_rejected(err: &ResolveError, json_output: bool) -> ! {
    if json_output {
        print_json_or_exit(&rejection_payload(err));
    } else {
        println!("fnwire: rejected");
        println!("  Failure class: {}", err.class());
        println!("  Command: {}", err.command());
        println!("  Message: {err}");
    }
    std::process::exit(EXIT_REJECTED);
}
