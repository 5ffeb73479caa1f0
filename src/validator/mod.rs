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

//! Structural and security-posture validation of host entries
//!
//! Validation never fails and never mutates: it returns a complete issue
//! list plus a single blocking gate. Errors block a save; warnings never do.

mod address;

use crate::document::{IntValue, ParsedDocument, SshHostConfig};

/// Algorithms that should no longer appear in Ciphers/MACs/KexAlgorithms.
const DEPRECATED_ALGORITHMS: &[&str] = &[
    "3des-cbc",
    "arcfour",
    "arcfour128",
    "arcfour256",
    "blowfish-cbc",
    "cast128-cbc",
    "hmac-md5",
    "hmac-md5-96",
    "hmac-sha1",
    "hmac-sha1-96",
    "diffie-hellman-group1-sha1",
    "diffie-hellman-group14-sha1",
    "diffie-hellman-group-exchange-sha1",
];

/// Directives whose comma-separated values are checked against the
/// deprecation list.
const ALGORITHM_DIRECTIVES: &[&str] = &["ciphers", "macs", "kexalgorithms"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub field: Option<String>,
    pub message: String,
    pub hint: Option<String>,
}

impl ValidationIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: Some(field.to_string()),
            message: message.into(),
            hint: None,
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: Some(field.to_string()),
            message: message.into(),
            hint: None,
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Outcome of a validation run.
///
/// `has_blocking_errors` is the single gate callers use to block a save;
/// warnings never block.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub has_blocking_errors: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let blocking = issues.iter().any(|i| i.severity == Severity::Error);
        Self {
            is_valid: !blocking,
            has_blocking_errors: blocking,
            issues,
        }
    }
}

/// Validate a single host entry.
///
/// `existing_host_names` and `is_new_host` drive the duplicate-alias check:
/// a new entry may not reuse an alias that is already present.
pub fn validate_host(
    host: &SshHostConfig,
    existing_host_names: &[String],
    is_new_host: bool,
) -> ValidationReport {
    let mut issues = Vec::new();

    if host.host.is_empty() {
        issues.push(ValidationIssue::error("Host", "host alias must not be empty"));
    } else {
        if host.host.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue::error(
                "Host",
                "host alias must not contain whitespace",
            ));
        }
        if is_new_host && existing_host_names.iter().any(|n| n == &host.host) {
            issues.push(ValidationIssue::error(
                "Host",
                format!("a host named '{}' already exists", host.host),
            ));
        }
    }

    match &host.port {
        None => {}
        Some(IntValue::Valid(p)) if (1..=65535).contains(p) => {}
        Some(port) => issues.push(ValidationIssue::error(
            "Port",
            format!("'{port}' is not a valid port (expected an integer between 1 and 65535)"),
        )),
    }

    match &host.host_name {
        Some(host_name) if !address::is_valid_host_name(host_name) => {
            issues.push(ValidationIssue::error(
                "HostName",
                format!("'{host_name}' is not a valid hostname or IP address"),
            ));
        }
        Some(_) => {}
        None if host.host != "*" => {
            issues.push(
                ValidationIssue::warning("HostName", "no HostName set")
                    .with_hint("ssh will try to resolve the alias itself"),
            );
        }
        None => {}
    }

    match &host.identity_file {
        None => {
            issues.push(
                ValidationIssue::warning("IdentityFile", "no IdentityFile set")
                    .with_hint("ssh will fall back to its default identities"),
            );
        }
        Some(path)
            if !(path.starts_with('/') || path.starts_with('~') || path.starts_with('%')) =>
        {
            issues.push(ValidationIssue::warning(
                "IdentityFile",
                format!("'{path}' is relative; use an absolute path, '~', or a '%' token"),
            ));
        }
        Some(_) => {}
    }

    for (key, value) in &host.extras {
        if !ALGORITHM_DIRECTIVES.contains(&key.to_ascii_lowercase().as_str()) {
            continue;
        }
        let offenders: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|algo| {
                DEPRECATED_ALGORITHMS
                    .iter()
                    .any(|d| algo.eq_ignore_ascii_case(d))
            })
            .collect();
        if !offenders.is_empty() {
            issues.push(ValidationIssue::warning(
                key,
                format!("{key} lists deprecated algorithms: {}", offenders.join(", ")),
            ));
        }
    }

    if let Some(mode) = &host.strict_host_key_checking {
        if mode.eq_ignore_ascii_case("no") {
            issues.push(
                ValidationIssue::warning(
                    "StrictHostKeyChecking",
                    "host key checking is disabled",
                )
                .with_hint("connections are exposed to man-in-the-middle attacks"),
            );
        }
    }

    if host.forward_agent == Some(true) && host.identities_only.is_none() {
        issues.push(
            ValidationIssue::warning(
                "ForwardAgent",
                "agent forwarding without IdentitiesOnly offers every loaded key to the remote",
            )
            .with_hint("set IdentitiesOnly yes to limit offered identities"),
        );
    }

    ValidationReport::from_issues(issues)
}

/// Validate every host in a document, plus document-wide duplicate checks.
///
/// Per-host messages are prefixed with the host alias so the caller can
/// present one flat list.
pub fn validate_config(doc: &ParsedDocument) -> ValidationReport {
    let mut issues = Vec::new();

    let mut flagged: Vec<&str> = Vec::new();
    for host in &doc.hosts {
        let count = doc.hosts.iter().filter(|h| h.host == host.host).count();
        if count > 1 && !flagged.contains(&host.host.as_str()) {
            flagged.push(&host.host);
            issues.push(ValidationIssue::error(
                "Host",
                format!("duplicate host entry '{}'", host.host),
            ));
        }
    }

    for host in &doc.hosts {
        let report = validate_host(host, &[], false);
        issues.extend(report.issues.into_iter().map(|mut issue| {
            issue.message = format!("{}: {}", host.host, issue.message);
            issue
        }));
    }

    ValidationReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    fn errors(report: &ValidationReport) -> Vec<&ValidationIssue> {
        report
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .collect()
    }

    #[test]
    fn test_bare_host_only_warns() {
        let host = SshHostConfig::new("a");
        let report = validate_host(&host, &[], false);
        assert!(!report.has_blocking_errors);
        assert!(report.is_valid);
        // HostName and IdentityFile warnings
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn test_empty_alias_is_blocking() {
        let host = SshHostConfig::new("");
        let report = validate_host(&host, &[], false);
        assert!(report.has_blocking_errors);
        assert!(!report.is_valid);
        assert_eq!(errors(&report)[0].field.as_deref(), Some("Host"));
    }

    #[test]
    fn test_alias_with_whitespace_is_blocking() {
        let host = SshHostConfig::new("bad name");
        let report = validate_host(&host, &[], false);
        assert!(report.has_blocking_errors);
    }

    #[test]
    fn test_new_host_duplicate_alias_is_blocking() {
        let host = SshHostConfig::new("a");
        let report = validate_host(&host, &["a".to_string()], true);
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.field.as_deref() == Some("Host")));

        // the same alias is fine when editing an existing entry
        let report = validate_host(&host, &["a".to_string()], false);
        assert!(!report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_port_boundaries() {
        for bad in ["0", "65536", "-1", "ssh"] {
            let mut host = SshHostConfig::new("a");
            host.apply_option("Port", bad);
            let report = validate_host(&host, &[], false);
            assert!(
                errors(&report)
                    .iter()
                    .any(|i| i.field.as_deref() == Some("Port")),
                "expected a Port error for {bad:?}"
            );
        }
        for good in ["1", "65535"] {
            let mut host = SshHostConfig::new("a");
            host.apply_option("Port", good);
            let report = validate_host(&host, &[], false);
            assert!(
                !errors(&report)
                    .iter()
                    .any(|i| i.field.as_deref() == Some("Port")),
                "unexpected Port error for {good:?}"
            );
        }
    }

    #[test]
    fn test_host_name_shape() {
        let mut host = SshHostConfig::new("a");
        host.apply_option("HostName", "not a host");
        let report = validate_host(&host, &[], false);
        assert!(errors(&report)
            .iter()
            .any(|i| i.field.as_deref() == Some("HostName")));

        let mut host = SshHostConfig::new("a");
        host.apply_option("HostName", "10.0.0.1");
        let report = validate_host(&host, &[], false);
        assert!(errors(&report).is_empty());
    }

    #[test]
    fn test_wildcard_host_skips_host_name_warning() {
        let host = SshHostConfig::new("*");
        let report = validate_host(&host, &[], false);
        assert!(!report
            .issues
            .iter()
            .any(|i| i.field.as_deref() == Some("HostName")));
    }

    #[test]
    fn test_relative_identity_file_warns() {
        let mut host = SshHostConfig::new("a");
        host.apply_option("IdentityFile", "keys/id_ed25519");
        let report = validate_host(&host, &[], false);
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Warning
                && i.field.as_deref() == Some("IdentityFile")));

        for ok in ["~/.ssh/id_ed25519", "/etc/ssh/key", "%d/.ssh/key"] {
            let mut host = SshHostConfig::new("a");
            host.apply_option("IdentityFile", ok);
            let report = validate_host(&host, &[], false);
            assert!(
                !report.issues.iter().any(|i| i.field.as_deref() == Some("IdentityFile")),
                "unexpected IdentityFile issue for {ok:?}"
            );
        }
    }

    #[test]
    fn test_deprecated_algorithms_named_in_warning() {
        let mut host = SshHostConfig::new("a");
        host.apply_option("Ciphers", "aes256-ctr,3DES-CBC,arcfour");
        let report = validate_host(&host, &[], false);
        let issue = report
            .issues
            .iter()
            .find(|i| i.field.as_deref() == Some("Ciphers"))
            .expect("ciphers warning");
        assert_eq!(issue.severity, Severity::Warning);
        assert!(issue.message.contains("3DES-CBC"));
        assert!(issue.message.contains("arcfour"));
        assert!(!issue.message.contains("aes256-ctr"));
    }

    #[test]
    fn test_strict_host_key_checking_no_warns() {
        let mut host = SshHostConfig::new("a");
        host.apply_option("StrictHostKeyChecking", "no");
        let report = validate_host(&host, &[], false);
        assert!(report
            .issues
            .iter()
            .any(|i| i.field.as_deref() == Some("StrictHostKeyChecking")));
    }

    #[test]
    fn test_forward_agent_without_identities_only_warns() {
        let mut host = SshHostConfig::new("a");
        host.apply_option("ForwardAgent", "yes");
        let report = validate_host(&host, &[], false);
        assert!(report
            .issues
            .iter()
            .any(|i| i.field.as_deref() == Some("ForwardAgent")));

        host.apply_option("IdentitiesOnly", "yes");
        let report = validate_host(&host, &[], false);
        assert!(!report
            .issues
            .iter()
            .any(|i| i.field.as_deref() == Some("ForwardAgent")));
    }

    #[test]
    fn test_validate_config_flags_duplicates_once() {
        let doc = parse("Host a\n  Port 1\n\nHost a\n  Port 2\n\nHost b\n  Port 3");
        let report = validate_config(&doc);
        let dup_errors: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error && i.message.contains("duplicate"))
            .collect();
        assert_eq!(dup_errors.len(), 1);
        assert!(report.has_blocking_errors);
    }

    #[test]
    fn test_validate_config_prefixes_messages() {
        let doc = parse("Host web\n  Port 99999");
        let report = validate_config(&doc);
        assert!(report
            .issues
            .iter()
            .any(|i| i.severity == Severity::Error && i.message.starts_with("web: ")));
    }
}
