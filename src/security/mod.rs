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

//! Security scanning of key material and known_hosts hygiene
//!
//! Findings are data, not failures: a scan always returns its complete
//! result set, and repeated runs over identical inputs produce identical
//! issue lists.

pub mod keys;
pub mod known_hosts;

pub use keys::{check_key_health, discover_keys, KeyAlgorithm, KeyInfo};
pub use known_hosts::{
    check_known_hosts, parse_known_hosts, remove_known_host_by_name, remove_known_host_line,
    KnownHostEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecuritySeverity {
    Error,
    Warning,
    Info,
}

/// Action tag the UI layer can attach a button to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityAction {
    Fix,
    Learn,
}

/// One security finding.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityIssue {
    pub severity: SecuritySeverity,
    pub id: &'static str,
    pub title: String,
    pub description: String,
    pub affected: Option<String>,
    pub suggestion: Option<String>,
    pub action: Option<SecurityAction>,
}

impl SecurityIssue {
    fn new(
        severity: SecuritySeverity,
        id: &'static str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            id,
            title: title.into(),
            description: description.into(),
            affected: None,
            suggestion: None,
            action: None,
        }
    }

    fn affecting(mut self, affected: impl Into<String>) -> Self {
        self.affected = Some(affected.into());
        self
    }

    fn suggesting(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn with_action(mut self, action: SecurityAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Overall scan outcome; error takes precedence over warning over healthy.
/// Informational findings do not demote a healthy result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStatus {
    Healthy,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityReport {
    pub issues: Vec<SecurityIssue>,
    pub status: SecurityStatus,
}

/// Run both scans and aggregate the overall status.
pub fn run_security_scan(keys: &[KeyInfo], known_hosts_content: &str) -> SecurityReport {
    let mut issues = check_key_health(keys);
    issues.extend(check_known_hosts(known_hosts_content));
    let status = overall_status(&issues);
    SecurityReport { issues, status }
}

fn overall_status(issues: &[SecurityIssue]) -> SecurityStatus {
    if issues.iter().any(|i| i.severity == SecuritySeverity::Error) {
        SecurityStatus::Error
    } else if issues
        .iter()
        .any(|i| i.severity == SecuritySeverity::Warning)
    {
        SecurityStatus::Warning
    } else {
        SecurityStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key(name: &str, algorithm: KeyAlgorithm, bit_size: Option<u32>) -> KeyInfo {
        KeyInfo {
            name: name.to_string(),
            algorithm,
            bit_size,
            has_public_key: true,
            path: PathBuf::from(format!("/home/u/.ssh/{name}")),
        }
    }

    #[test]
    fn test_scan_is_deterministic() {
        let keys = vec![
            key("id_ed25519", KeyAlgorithm::Ed25519, None),
            key("id_rsa", KeyAlgorithm::Rsa, Some(2048)),
        ];
        let known_hosts = "h1 ssh-dss AAAA\nh2 ssh-ed25519 BBBB";
        let first = run_security_scan(&keys, known_hosts);
        let second = run_security_scan(&keys, known_hosts);
        assert_eq!(first, second);
    }

    #[test]
    fn test_status_precedence() {
        let healthy = run_security_scan(&[key("id_ed25519", KeyAlgorithm::Ed25519, None)], "");
        assert_eq!(healthy.status, SecurityStatus::Healthy);

        let warning = run_security_scan(&[key("id_rsa", KeyAlgorithm::Rsa, Some(2048))], "");
        assert_eq!(warning.status, SecurityStatus::Warning);

        let error = run_security_scan(&[key("id_dsa", KeyAlgorithm::Dsa, None)], "");
        assert_eq!(error.status, SecurityStatus::Error);
    }

    #[test]
    fn test_info_findings_keep_healthy_status() {
        let report = run_security_scan(&[key("id_rsa", KeyAlgorithm::Rsa, Some(4096))], "");
        assert!(!report.issues.is_empty());
        assert_eq!(report.status, SecurityStatus::Healthy);
    }
}
