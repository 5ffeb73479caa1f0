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

//! Line-level model of an SSH client configuration file
//!
//! The ordered sequence of `ConfigLine`s is the authoritative representation
//! of a config file. Untouched lines render back byte-exact; only lines
//! regenerated by a mutation take the canonical two-space form.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// A single physical line of an SSH configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// Comment (or unparsable line), stored verbatim including leading whitespace
    Comment(String),
    /// Whitespace-only line
    Blank,
    /// Directive appearing before the first `Host` block
    GlobalDirective { key: String, value: String },
    /// `Host <alias>` block header
    HostHeader(String),
    /// Directive inside a `Host` block
    HostOption { key: String, value: String },
}

impl ConfigLine {
    pub fn is_blank(&self) -> bool {
        matches!(self, ConfigLine::Blank)
    }
}

impl fmt::Display for ConfigLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLine::Comment(text) => write!(f, "{text}"),
            ConfigLine::Blank => Ok(()),
            ConfigLine::GlobalDirective { key, value } => write!(f, "{key} {value}"),
            ConfigLine::HostHeader(name) => write!(f, "Host {name}"),
            ConfigLine::HostOption { key, value } => write!(f, "  {key} {value}"),
        }
    }
}

/// Lowercase directive name -> canonical spelling, built once.
static CANONICAL_KEYS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("host", "Host"),
        ("hostname", "HostName"),
        ("user", "User"),
        ("port", "Port"),
        ("identityfile", "IdentityFile"),
        ("identitiesonly", "IdentitiesOnly"),
        ("proxyjump", "ProxyJump"),
        ("proxycommand", "ProxyCommand"),
        ("forwardagent", "ForwardAgent"),
        ("addkeystoagent", "AddKeysToAgent"),
        ("usekeychain", "UseKeychain"),
        ("serveraliveinterval", "ServerAliveInterval"),
        ("serveralivecountmax", "ServerAliveCountMax"),
        ("stricthostkeychecking", "StrictHostKeyChecking"),
        ("userknownhostsfile", "UserKnownHostsFile"),
        ("loglevel", "LogLevel"),
        ("compression", "Compression"),
    ]
    .into_iter()
    .collect()
});

/// Resolve a directive name to its canonical spelling, case-insensitively.
///
/// Returns `None` for directives outside the canonical set; those pass
/// through with their original casing.
pub fn canonical_key(key: &str) -> Option<&'static str> {
    CANONICAL_KEYS.get(key.to_ascii_lowercase().as_str()).copied()
}
