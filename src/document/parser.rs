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

//! Parsing of SSH configuration text into the line model
//!
//! Parsing is total: a line that does not fit the `key value` shape is kept
//! as a verbatim comment instead of aborting. The file being edited belongs
//! to the ssh client, so nothing it contains may make this parser fail.

use super::line::{canonical_key, ConfigLine};
use super::types::SshHostConfig;
use super::ParsedDocument;

/// Parse configuration text into an ordered line sequence plus the derived
/// host projection.
pub fn parse(text: &str) -> ParsedDocument {
    let mut lines = Vec::new();
    let mut hosts = Vec::new();
    let mut current: Option<SshHostConfig> = None;

    if text.is_empty() {
        return ParsedDocument { lines, hosts };
    }

    for raw in text.split('\n') {
        if raw.trim().is_empty() {
            lines.push(ConfigLine::Blank);
            continue;
        }
        if raw.trim_start().starts_with('#') {
            lines.push(ConfigLine::Comment(raw.to_string()));
            continue;
        }

        let Some((key_raw, value)) = split_directive(raw.trim()) else {
            // Not key<ws>value shaped; degrade to a verbatim comment.
            lines.push(ConfigLine::Comment(raw.to_string()));
            continue;
        };

        let key = match canonical_key(key_raw) {
            Some(canonical) => canonical.to_string(),
            None => key_raw.to_string(),
        };

        if key == "Host" {
            if let Some(host) = current.take() {
                hosts.push(host);
            }
            lines.push(ConfigLine::HostHeader(value.to_string()));
            current = Some(SshHostConfig::new(value));
            continue;
        }

        match current.as_mut() {
            Some(host) => {
                host.apply_option(&key, value);
                lines.push(ConfigLine::HostOption {
                    key,
                    value: value.to_string(),
                });
            }
            None => lines.push(ConfigLine::GlobalDirective {
                key,
                value: value.to_string(),
            }),
        }
    }

    if let Some(host) = current {
        hosts.push(host);
    }

    ParsedDocument { lines, hosts }
}

/// Split a trimmed line on its first run of whitespace.
///
/// Returns `None` when there is no value part.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(|c: char| c.is_whitespace())?;
    let value = rest.trim();
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}
