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

//! Key inventory and key-material health checks
//!
//! Discovery walks the ssh directory once and pairs private keys with their
//! public halves. Health checks run over the inventory without touching the
//! filesystem again.

use anyhow::Result;
use ssh_key::{PrivateKey, PublicKey};
use std::path::{Path, PathBuf};

use super::{SecurityAction, SecurityIssue, SecuritySeverity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Ed25519,
    Ecdsa,
    Rsa,
    Dsa,
    Unknown,
}

/// One discovered key pair.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInfo {
    /// File stem of the private key (e.g. `id_ed25519`)
    pub name: String,
    pub algorithm: KeyAlgorithm,
    /// Modulus size for RSA keys; `None` for other algorithms
    pub bit_size: Option<u32>,
    pub has_public_key: bool,
    /// Path of the private key file
    pub path: PathBuf,
}

/// Scan a directory for SSH key pairs.
///
/// A missing directory yields an empty inventory rather than an error; a
/// file that cannot be parsed still appears, with `Unknown` algorithm.
/// Results are sorted by name so repeated scans are identical.
pub async fn discover_keys(ssh_dir: &Path) -> Result<Vec<KeyInfo>> {
    let mut file_names: Vec<String> = Vec::new();
    let mut dir = match tokio::fs::read_dir(ssh_dir).await {
        Ok(dir) => dir,
        Err(err) => {
            tracing::debug!("ssh directory {:?} not readable: {}", ssh_dir, err);
            return Ok(Vec::new());
        }
    };
    while let Some(entry) = dir.next_entry().await? {
        if entry.file_type().await?.is_file() {
            if let Ok(name) = entry.file_name().into_string() {
                file_names.push(name);
            }
        }
    }
    file_names.sort();

    let mut keys = Vec::new();
    for name in &file_names {
        let Some(base) = name.strip_suffix(".pub") else {
            continue;
        };
        let content = tokio::fs::read_to_string(ssh_dir.join(name)).await?;
        let (algorithm, bit_size) = match PublicKey::from_openssh(content.trim()) {
            Ok(public) => (map_algorithm(&public.algorithm()), rsa_bits(&public)),
            Err(err) => {
                tracing::debug!("unparsable public key {:?}: {}", name, err);
                (KeyAlgorithm::Unknown, None)
            }
        };
        keys.push(KeyInfo {
            name: base.to_string(),
            algorithm,
            bit_size,
            has_public_key: true,
            path: ssh_dir.join(base),
        });
    }

    // Private keys whose public half is missing
    for name in &file_names {
        if name.ends_with(".pub") || file_names.iter().any(|f| f == &format!("{name}.pub")) {
            continue;
        }
        let path = ssh_dir.join(name);
        let Ok(content) = tokio::fs::read_to_string(&path).await else {
            continue;
        };
        if !content.starts_with("-----BEGIN") || !content.contains("PRIVATE KEY") {
            continue;
        }
        let (algorithm, bit_size) = match PrivateKey::from_openssh(&content) {
            Ok(private) => {
                let public = private.public_key();
                (map_algorithm(&public.algorithm()), rsa_bits(public))
            }
            Err(_) => (KeyAlgorithm::Unknown, None),
        };
        keys.push(KeyInfo {
            name: name.clone(),
            algorithm,
            bit_size,
            has_public_key: false,
            path,
        });
    }

    keys.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(keys)
}

fn map_algorithm(algorithm: &ssh_key::Algorithm) -> KeyAlgorithm {
    match algorithm {
        ssh_key::Algorithm::Ed25519 => KeyAlgorithm::Ed25519,
        ssh_key::Algorithm::Ecdsa { .. } => KeyAlgorithm::Ecdsa,
        ssh_key::Algorithm::Rsa { .. } => KeyAlgorithm::Rsa,
        ssh_key::Algorithm::Dsa => KeyAlgorithm::Dsa,
        _ => KeyAlgorithm::Unknown,
    }
}

fn rsa_bits(public: &PublicKey) -> Option<u32> {
    public
        .key_data()
        .rsa()
        .and_then(|rsa| rsa.n.as_positive_bytes())
        .map(|bytes| (bytes.len() * 8) as u32)
}

/// Check each key in the inventory against current recommendations.
pub fn check_key_health(keys: &[KeyInfo]) -> Vec<SecurityIssue> {
    let mut issues = Vec::new();

    for key in keys {
        if !key.has_public_key {
            issues.push(
                SecurityIssue::new(
                    SecuritySeverity::Warning,
                    "key-missing-public",
                    "Missing public key file",
                    format!("'{}' has no matching .pub file", key.name),
                )
                .affecting(&key.name)
                .suggesting(format!(
                    "regenerate it: ssh-keygen -y -f {} > {}.pub",
                    key.path.display(),
                    key.path.display()
                )),
            );
        }

        match key.algorithm {
            KeyAlgorithm::Dsa => issues.push(
                SecurityIssue::new(
                    SecuritySeverity::Error,
                    "key-dsa",
                    "DSA key",
                    format!(
                        "'{}' is a DSA key; DSA is broken and rejected by modern OpenSSH",
                        key.name
                    ),
                )
                .affecting(&key.name)
                .suggesting("replace it: ssh-keygen -t ed25519")
                .with_action(SecurityAction::Fix),
            ),
            KeyAlgorithm::Rsa => issues.push(rsa_issue(key)),
            KeyAlgorithm::Unknown => issues.push(
                SecurityIssue::new(
                    SecuritySeverity::Info,
                    "key-unknown",
                    "Unrecognized key type",
                    format!("'{}' uses a key type this scan does not recognize", key.name),
                )
                .affecting(&key.name),
            ),
            KeyAlgorithm::Ed25519 | KeyAlgorithm::Ecdsa => {}
        }
    }

    issues
}

fn rsa_issue(key: &KeyInfo) -> SecurityIssue {
    match key.bit_size {
        Some(bits) if bits < 2048 => SecurityIssue::new(
            SecuritySeverity::Error,
            "key-rsa-weak",
            "Weak RSA key",
            format!("'{}' is RSA-{bits}; keys under 2048 bits are factorable", key.name),
        )
        .affecting(&key.name)
        .suggesting("replace it: ssh-keygen -t ed25519")
        .with_action(SecurityAction::Fix),
        Some(bits) if bits < 3072 => SecurityIssue::new(
            SecuritySeverity::Warning,
            "key-rsa-short",
            "Short RSA key",
            format!(
                "'{}' is RSA-{bits}; 3072 bits is the current minimum recommendation",
                key.name
            ),
        )
        .affecting(&key.name)
        .suggesting("rotate to ed25519 or RSA-4096")
        .with_action(SecurityAction::Fix),
        Some(bits) => SecurityIssue::new(
            SecuritySeverity::Info,
            "key-rsa",
            "RSA key",
            format!(
                "'{}' is RSA-{bits}; ed25519 offers the same security with faster handshakes",
                key.name
            ),
        )
        .affecting(&key.name)
        .with_action(SecurityAction::Learn),
        None => SecurityIssue::new(
            SecuritySeverity::Info,
            "key-rsa",
            "RSA key",
            format!("'{}' is an RSA key of undetermined size", key.name),
        )
        .affecting(&key.name)
        .with_action(SecurityAction::Learn),
    }
}
