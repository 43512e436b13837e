use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration, read once at startup from CLI flags or environment.
///
/// The bearer token has no default on purpose: the service refuses to start
/// without one being injected.
#[derive(Debug, Clone, Parser)]
#[command(name = "filegate", version, about = "HTTP file API backend for document-retrieval integrations")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "FILEGATE_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Sandbox root directory all identifiers resolve beneath
    #[arg(long, env = "FILEGATE_ROOT", default_value = "resources")]
    pub root: PathBuf,

    /// Bearer token every /v1 request must present
    #[arg(long, env = "FILEGATE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Base URL embedded in access links returned by /v1/file/read
    #[arg(long, env = "FILEGATE_PUBLIC_URL", default_value = "http://localhost:8000")]
    pub public_url: String,
}
