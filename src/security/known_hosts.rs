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

//! known_hosts parsing, hygiene checks, and entry removal
//!
//! The format is one entry per line: `hostnames algorithm base64key
//! [comment]`, where `hostnames` is comma-separated, or a hashed form
//! starting with `|`. Hashed hostnames cannot be decoded, so they are
//! surfaced as an opaque placeholder and can only be matched by literal
//! substring.

use super::{SecurityIssue, SecuritySeverity};

/// Placeholder pattern for hashed entries.
pub const HASHED_PLACEHOLDER: &str = "[hashed]";

/// One data line of a known_hosts file.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownHostEntry {
    /// 1-based line number in the source text
    pub line_number: usize,
    /// Comma-separated host patterns, or `["[hashed]"]` for hashed entries
    pub patterns: Vec<String>,
    pub algorithm: String,
    pub key_base64: String,
    pub raw_line: String,
}

impl KnownHostEntry {
    pub fn is_hashed(&self) -> bool {
        self.patterns.len() == 1 && self.patterns[0] == HASHED_PLACEHOLDER
    }

    /// Keys used for duplicate grouping. Hashed entries group on their raw
    /// hash token so distinct hashed hosts never collide.
    fn duplicate_keys(&self) -> Vec<(String, String)> {
        if self.is_hashed() {
            let token = self
                .raw_line
                .split_whitespace()
                .next()
                .unwrap_or(HASHED_PLACEHOLDER)
                .to_string();
            vec![(token, self.algorithm.clone())]
        } else {
            self.patterns
                .iter()
                .map(|p| (p.clone(), self.algorithm.clone()))
                .collect()
        }
    }
}

/// Parse known_hosts text, skipping blank and comment lines. Lines that do
/// not have at least `host algorithm key` fields are ignored.
pub fn parse_known_hosts(content: &str) -> Vec<KnownHostEntry> {
    let mut entries = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        let (Some(hosts), Some(algorithm), Some(key_base64)) =
            (fields.next(), fields.next(), fields.next())
        else {
            tracing::debug!("skipping short known_hosts line {}", idx + 1);
            continue;
        };

        let patterns = if hosts.starts_with('|') {
            vec![HASHED_PLACEHOLDER.to_string()]
        } else {
            hosts.split(',').map(|p| p.to_string()).collect()
        };

        entries.push(KnownHostEntry {
            line_number: idx + 1,
            patterns,
            algorithm: algorithm.to_string(),
            key_base64: key_base64.to_string(),
            raw_line: line.to_string(),
        });
    }

    entries
}

/// Flag deprecated host-key algorithms and exact duplicate entries.
///
/// Deprecation flags are per line; duplicate detection is an independent
/// pass grouping on `(host, algorithm)`. The same host appearing with
/// different algorithms is normal and is not flagged.
pub fn check_known_hosts(content: &str) -> Vec<SecurityIssue> {
    let entries = parse_known_hosts(content);
    let mut issues = Vec::new();

    for entry in &entries {
        let affected = format!("{} (line {})", entry.patterns.join(","), entry.line_number);
        match entry.algorithm.as_str() {
            "ssh-dss" => issues.push(
                SecurityIssue::new(
                    SecuritySeverity::Warning,
                    "known-hosts-dsa",
                    "DSA host key",
                    format!(
                        "line {} records a DSA host key; modern OpenSSH refuses these servers",
                        entry.line_number
                    ),
                )
                .affecting(affected)
                .suggesting("remove the entry and reconnect to record a current key"),
            ),
            "ssh-rsa" => issues.push(
                SecurityIssue::new(
                    SecuritySeverity::Info,
                    "known-hosts-legacy-rsa",
                    "Legacy RSA host key",
                    format!(
                        "line {} uses the pre-SHA2 ssh-rsa algorithm name",
                        entry.line_number
                    ),
                )
                .affecting(affected),
            ),
            _ => {}
        }
    }

    // Duplicate pass, first-seen order for deterministic output
    let mut groups: Vec<((String, String), Vec<usize>)> = Vec::new();
    for entry in &entries {
        for key in entry.duplicate_keys() {
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, lines)) => lines.push(entry.line_number),
                None => groups.push((key, vec![entry.line_number])),
            }
        }
    }
    for ((host, algorithm), lines) in groups {
        if lines.len() > 1 {
            issues.push(
                SecurityIssue::new(
                    SecuritySeverity::Warning,
                    "known-hosts-duplicate",
                    "Duplicate known_hosts entry",
                    format!(
                        "'{host}' appears {} times with {algorithm} (lines {})",
                        lines.len(),
                        lines
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
                .affecting(host)
                .suggesting("keep one entry per host and algorithm"),
            );
        }
    }

    issues
}

/// Remove the physical line at `line_number` (1-based). Out-of-range
/// numbers leave the text unchanged; all other lines stay byte-exact.
pub fn remove_known_host_line(content: &str, line_number: usize) -> String {
    content
        .split('\n')
        .enumerate()
        .filter(|(idx, _)| idx + 1 != line_number)
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove every data line whose host field contains `name`.
///
/// Comment and blank lines are always kept. Hashed entries can only match
/// by literal substring of the hash token, which in practice means they are
/// not removable by hostname.
pub fn remove_known_host_by_name(content: &str, name: &str) -> String {
    if name.is_empty() {
        return content.to_string();
    }
    content
        .split('\n')
        .filter(|line| !line_matches_host(line, name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn line_matches_host(line: &str, name: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    let Some(hosts) = trimmed.split_whitespace().next() else {
        return false;
    };
    if hosts.starts_with('|') {
        return hosts.contains(name);
    }
    hosts.split(',').any(|pattern| pattern.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "github.com ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl\n\
# trailing comment\n\
gitlab.com,altgit.example.com ssh-rsa AAAAB3NzaC1yc2EAAAA\n\
|1|kRjF1Yu0v2Nq|0uA3Fh1Gx ssh-ed25519 AAAAC3NzaC1lZDI1\n";

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let entries = parse_known_hosts(SAMPLE);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].line_number, 1);
        assert_eq!(entries[1].line_number, 3);
        assert_eq!(entries[2].line_number, 4);
    }

    #[test]
    fn test_parse_splits_comma_patterns() {
        let entries = parse_known_hosts(SAMPLE);
        assert_eq!(
            entries[1].patterns,
            vec!["gitlab.com".to_string(), "altgit.example.com".to_string()]
        );
        assert_eq!(entries[1].algorithm, "ssh-rsa");
    }

    #[test]
    fn test_parse_hashed_entry_uses_placeholder() {
        let entries = parse_known_hosts(SAMPLE);
        assert!(entries[2].is_hashed());
        assert_eq!(entries[2].patterns, vec![HASHED_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_deprecation_and_duplicates_are_independent_passes() {
        // two identical ssh-dss lines: one duplicate warning plus one
        // deprecation warning per line
        let issues = check_known_hosts("h1 ssh-dss AAAA\nh1 ssh-dss AAAA\n");
        let dsa: Vec<_> = issues.iter().filter(|i| i.id == "known-hosts-dsa").collect();
        let dup: Vec<_> = issues
            .iter()
            .filter(|i| i.id == "known-hosts-duplicate")
            .collect();
        assert_eq!(dsa.len(), 2);
        assert_eq!(dup.len(), 1);
        assert!(dup[0].description.contains("h1"));
        assert!(dup[0].description.contains("ssh-dss"));
    }

    #[test]
    fn test_same_host_different_algorithms_is_not_duplicate() {
        let content = "h1 ssh-ed25519 AAAA\nh1 ssh-rsa BBBB\nh1 ecdsa-sha2-nistp256 CCCC";
        let issues = check_known_hosts(content);
        assert!(!issues.iter().any(|i| i.id == "known-hosts-duplicate"));
    }

    #[test]
    fn test_distinct_hashed_entries_do_not_collide() {
        let content = "|1|saltA|hashA ssh-ed25519 AAAA\n|1|saltB|hashB ssh-ed25519 BBBB";
        let issues = check_known_hosts(content);
        assert!(!issues.iter().any(|i| i.id == "known-hosts-duplicate"));

        let repeated = "|1|saltA|hashA ssh-ed25519 AAAA\n|1|saltA|hashA ssh-ed25519 AAAA";
        let issues = check_known_hosts(repeated);
        assert!(issues.iter().any(|i| i.id == "known-hosts-duplicate"));
    }

    #[test]
    fn test_legacy_rsa_is_informational() {
        let issues = check_known_hosts("h1 ssh-rsa AAAA");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, SecuritySeverity::Info);
    }

    #[test]
    fn test_remove_line_keeps_other_lines_byte_exact() {
        let content = "a ssh-ed25519 AAAA\nb ssh-ed25519   BBBB\nc ssh-ed25519 CCCC";
        let updated = remove_known_host_line(content, 2);
        assert_eq!(updated, "a ssh-ed25519 AAAA\nc ssh-ed25519 CCCC");

        // out of range is a no-op
        assert_eq!(remove_known_host_line(content, 99), content);
    }

    #[test]
    fn test_remove_by_name() {
        let content = "github.com ssh-ed25519 AAAA\ngitlab.com,alt.example.com ssh-rsa BBBB\n# keep\n";
        let updated = remove_known_host_by_name(content, "gitlab.com");
        assert_eq!(updated, "github.com ssh-ed25519 AAAA\n# keep\n");
    }

    #[test]
    fn test_remove_by_name_matches_any_pattern_in_list() {
        let content = "gitlab.com,alt.example.com ssh-rsa BBBB";
        assert_eq!(remove_known_host_by_name(content, "alt.example.com"), "");
    }

    #[test]
    fn test_remove_by_name_cannot_match_hashed_by_hostname() {
        let content = "|1|salt|hash ssh-ed25519 AAAA";
        assert_eq!(remove_known_host_by_name(content, "github.com"), content);
    }

    #[test]
    fn test_remove_by_empty_name_is_noop() {
        let content = "a ssh-ed25519 AAAA";
        assert_eq!(remove_known_host_by_name(content, ""), content);
    }
}
