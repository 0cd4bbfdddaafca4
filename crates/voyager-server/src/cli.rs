use clap::Parser;
use voyager_config::VoyagerConfig;

/// Command-line flags for the `voyager` binary.
#[derive(Debug, Parser)]
#[command(name = "voyager", version, about = "Space Voyagers exoplanet catalog API")]
pub struct Cli {
    /// Port to listen on (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Local database path (overrides `database.path`)
    #[arg(short, long)]
    pub database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply flag overrides on top of the layered configuration.
    pub fn apply(&self, config: &mut VoyagerConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ref path) = self.database {
            if config.database.is_remote() {
                tracing::warn!(path, "--database ignored: a remote database is configured");
            }
            config.database.path.clone_from(path);
        }
    }
}
