// Public API exports
pub mod api;
pub mod config;
pub mod sandbox;
pub mod security;

// Re-export main types for convenience
pub use api::{AppState, Envelope};
pub use config::ServerConfig;
pub use sandbox::{EntryKind, FileEntry, Sandbox, SandboxError};
pub use security::PathSanitizer;
