// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! File access for the ssh configuration directory
//!
//! I/O failures surface as typed errors so callers can distinguish a
//! missing file from a permission problem. The ssh directory location is
//! resolved once per process; it cannot change at runtime.

use directories::BaseDirs;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

static SSH_DIR: OnceCell<PathBuf> = OnceCell::new();

/// Errors from the file-access service.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("failed to {action} {path}: {source}")]
    Io {
        path: String,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

fn classify(err: std::io::Error, path: &Path, action: &'static str) -> FileError {
    let path = path.display().to_string();
    match err.kind() {
        std::io::ErrorKind::NotFound => FileError::NotFound { path },
        std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
        _ => FileError::Io {
            path,
            action,
            source: err,
        },
    }
}

/// Read a file as UTF-8 text.
pub async fn read_text(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path)
        .await
        .map_err(|err| classify(err, path, "read"))
}

/// Read a file, treating a missing file as empty content. A config file
/// that does not exist yet is an empty document, not an error.
pub async fn read_text_or_empty(path: &Path) -> Result<String, FileError> {
    match read_text(path).await {
        Ok(text) => Ok(text),
        Err(FileError::NotFound { .. }) => Ok(String::new()),
        Err(err) => Err(err),
    }
}

/// Write text to a file, creating parent directories as needed.
pub async fn write_text(path: &Path, text: &str) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| classify(err, parent, "create directory"))?;
    }
    fs::write(path, text)
        .await
        .map_err(|err| classify(err, path, "write"))
}

pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// The user's ssh directory, resolved once per process.
pub fn ssh_dir() -> &'static Path {
    SSH_DIR
        .get_or_init(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".ssh")
        })
        .as_path()
}

/// Default location of the ssh client config file.
pub fn default_config_path() -> PathBuf {
    ssh_dir().join("config")
}

/// Get the default known_hosts file path.
pub fn default_known_hosts_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".ssh").join("known_hosts"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_io_errors() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            classify(not_found, Path::new("/x"), "read"),
            FileError::NotFound { .. }
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            classify(denied, Path::new("/x"), "read"),
            FileError::PermissionDenied { .. }
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(matches!(
            classify(other, Path::new("/x"), "write"),
            FileError::Io { action: "write", .. }
        ));
    }

    #[test]
    fn test_ssh_dir_is_stable_across_calls() {
        assert_eq!(ssh_dir(), ssh_dir());
        assert!(ssh_dir().ends_with(".ssh"));
    }

    #[test]
    fn test_default_known_hosts_path() {
        if let Some(path) = default_known_hosts_path() {
            assert!(path.ends_with(".ssh/known_hosts"));
        }
    }

    #[test]
    fn test_read_missing_file_is_typed() {
        let err = tokio_test::block_on(read_text(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, FileError::NotFound { .. }));

        let empty =
            tokio_test::block_on(read_text_or_empty(Path::new("/definitely/not/here"))).unwrap();
        assert_eq!(empty, "");
    }
}
