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

//! SSH client configuration document model
//!
//! This module owns the order-preserving representation of an ssh config
//! file and the mutations over it. The file is shared with the ssh client
//! itself, so the contract is strict: parse never fails, untouched lines
//! serialize back byte-exact, and every mutation leaves the document
//! re-parsable into the same host list it reports.

mod line;
mod mutate;
mod parser;
mod pattern;
mod types;

pub use line::{canonical_key, ConfigLine};
pub use pattern::host_matches_pattern;
pub use types::{parse_bool, IntValue, SshHostConfig};

/// An ordered line sequence plus its derived host projection.
///
/// Built fresh from file contents on every read; mutated in memory,
/// serialized, and discarded once written. No cross-session caching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub lines: Vec<ConfigLine>,
    pub hosts: Vec<SshHostConfig>,
}

/// Parse configuration text. Total: malformed input degrades, it never
/// fails.
pub fn parse(text: &str) -> ParsedDocument {
    parser::parse(text)
}

impl ParsedDocument {
    /// Render the document back to text. Each line variant has exactly one
    /// rendering; joining with `\n` restores the original physical lines.
    pub fn serialize(&self) -> String {
        self.lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn host_names(&self) -> Vec<String> {
        self.hosts.iter().map(|h| h.host.clone()).collect()
    }

    pub fn find_host(&self, name: &str) -> Option<&SshHostConfig> {
        self.hosts.iter().find(|h| h.host == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_parse_round_trip() {
        let text = "# global settings\nCompression yes\n\nHost web\n  HostName web.internal\n  Port 2222\n\n# production\nHost db\n  User admin";
        assert_eq!(parse(text).serialize(), text);
    }

    #[test]
    fn test_round_trip_with_trailing_newline() {
        let text = "Host a\n  Port 22\n";
        assert_eq!(parse(text).serialize(), text);
    }

    #[test]
    fn test_round_trip_empty() {
        assert_eq!(parse("").serialize(), "");
    }

    #[test]
    fn test_find_host() {
        let doc = parse("Host a\n  Port 1\n\nHost b\n  Port 2");
        assert!(doc.find_host("b").is_some());
        assert!(doc.find_host("c").is_none());
        assert_eq!(doc.host_names(), vec!["a".to_string(), "b".to_string()]);
    }
}
