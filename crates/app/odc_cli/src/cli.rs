use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "odc", version, about = "Operator tooling for the odc trace catalogue")]
pub struct Cli {
    /// PostgreSQL connection URL.
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/odc"
    )]
    pub database_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the version.
    Version,

    /// Run database migrations.
    Migrate,

    /// Manage registered traces.
    Trace {
        #[command(subcommand)]
        command: TraceCommands,
    },

    /// Print a bearer token signed with the server's secret.
    Token {
        /// Token subject (caller id).
        #[arg(long)]
        sub: String,

        /// Caller email.
        #[arg(long)]
        email: Option<String>,

        /// Token lifetime in minutes.
        #[arg(long, default_value_t = odc_core::auth::jwt::ACCESS_TOKEN_EXPIRY_MINUTES)]
        ttl_minutes: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum TraceCommands {
    /// List traces as `id<TAB>name<TAB>type`.
    List,

    /// Register a trace.
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Trace type, e.g. VM or Workflow.
        #[arg(long = "type")]
        kind: String,
    },

    /// Remove a trace by id.
    Remove { id: String },
}
