//! Command-line interface definitions for the mock server.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the mock server.
///
/// Every option can also be supplied through the environment variable
/// named next to it.
#[derive(Debug, Parser)]
#[command(name = "http-mock")]
#[command(
    author,
    version,
    about = "HTTP mock server: register request/response pairs in groups and replay them"
)]
pub struct Cli {
    /// Address the admin API listens on
    #[arg(long, env = "MOCK_ADMIN_LISTEN", default_value = "127.0.0.1:8081")]
    pub admin_listen: String,

    /// Address the mock-serving endpoint listens on
    #[arg(long, env = "MOCK_LISTEN", default_value = "127.0.0.1:5081")]
    pub mock_listen: String,

    /// Path to a YAML seed file with groups and mocks to create at start-up
    #[arg(long, env = "MOCK_SEED")]
    pub seed: Option<PathBuf>,
}
