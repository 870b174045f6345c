use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gymdock_domain::session::{SessionContext, SessionStore};
use gymdock_domain::DomainError;
use log::{debug, warn};

/// Session persisted as a small JSON document.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous session intact.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<SessionContext, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionContext::default())
            }
            Err(e) => {
                return Err(DomainError::Infrastructure(format!(
                    "Failed to read session {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        match serde_json::from_str::<SessionContext>(&content) {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!(
                    "[session] discarding unreadable session path={} error={}",
                    self.path.display(),
                    e
                );
                Ok(SessionContext::default())
            }
        }
    }

    async fn save(&self, session: &SessionContext) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| DomainError::Deserialization(e.to_string()))?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        debug!("[session] saved path={}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("[session] cleared path={}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Infrastructure(e.to_string())),
        }
    }
}
