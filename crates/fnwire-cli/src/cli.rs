use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fnwire",
    about = "fnwire: resolve declared function definitions into trigger binding descriptors",
    version
)]
pub struct Cli {
    /// Emit debug logs on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a manifest and print the resolved definitions
    Resolve {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a manifest and report only whether it is accepted
    Check {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List HTTP routes with their verbs, OpenAPI names and route parameters
    Routes {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the definition manifest (JSON, or TOML by extension)
    #[arg(long)]
    pub manifest: String,

    /// Path to the resolver configuration [default: fnwire.toml]
    #[arg(long)]
    pub config: Option<String>,

    /// Target namespace; overrides the configured one
    #[arg(long)]
    pub namespace: Option<String>,
}
