use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

/// Generate the secrets and API keys for a self-hosted Supabase deployment.
///
/// Prints JWT_SECRET, ANON_KEY, SERVICE_ROLE_KEY and SECRET_KEY_BASE as
/// KEY=value lines, ready to append to a .env file.
#[derive(Parser, Debug)]
#[command(name = "supakeys", version)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries the generated keys.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    commands::generate::run()
}
