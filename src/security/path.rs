use crate::sandbox::SandboxError;
use std::path::{Component, Path};

pub struct PathSanitizer;

impl PathSanitizer {
    /// Normalize a caller-supplied identifier into a clean relative path,
    /// rejecting anything that could name a location outside the sandbox:
    /// - Absolute paths (/etc/passwd)
    /// - Parent directory traversal (../)
    /// - Non-UTF-8 components
    ///
    /// `.` segments are dropped. Hidden names (leading `.`) are accepted
    /// here; the directory lister filters them from listings separately.
    pub fn sanitize(raw: &str) -> Result<String, SandboxError> {
        if raw.is_empty() {
            return Err(SandboxError::InvalidIdentifier("Empty identifier".to_string()));
        }

        let mut components = Vec::new();

        for component in Path::new(raw).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(SandboxError::InvalidIdentifier(format!(
                        "Absolute path not allowed: {}",
                        raw
                    )));
                }
                Component::ParentDir => {
                    return Err(SandboxError::InvalidIdentifier(format!(
                        "Parent directory traversal not allowed: {}",
                        raw
                    )));
                }
                Component::CurDir => continue,
                Component::Normal(part) => {
                    let part = part.to_str().ok_or_else(|| {
                        SandboxError::InvalidIdentifier(format!("Invalid UTF-8 in identifier: {:?}", part))
                    })?;
                    components.push(part);
                }
            }
        }

        if components.is_empty() {
            return Err(SandboxError::InvalidIdentifier(format!(
                "No valid components: {}",
                raw
            )));
        }

        Ok(components.join("/"))
    }
}
