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

//! Typed host projection of a parsed configuration document

use std::fmt;

/// Value of an integer-typed directive.
///
/// The line text stays authoritative even when it is not a usable number, so
/// an unparsable value is carried as `Invalid` instead of being discarded.
/// Re-emission renders the original text back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntValue {
    Valid(u32),
    Invalid(String),
}

impl IntValue {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(n) => IntValue::Valid(n),
            Err(_) => IntValue::Invalid(raw.to_string()),
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            IntValue::Valid(n) => Some(*n),
            IntValue::Invalid(_) => None,
        }
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntValue::Valid(n) => write!(f, "{n}"),
            IntValue::Invalid(raw) => write!(f, "{raw}"),
        }
    }
}

/// Typed configuration of one `Host` block.
///
/// Canonical directives get typed fields; anything else lands in `extras`
/// in source order so a mutated block can be re-emitted without losing
/// unrecognized directives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SshHostConfig {
    /// The `Host` alias. Uniquely identifies a block in this model; real
    /// ssh pattern-matching semantics are not reproduced here.
    pub host: String,
    pub host_name: Option<String>,
    pub user: Option<String>,
    pub port: Option<IntValue>,
    pub identity_file: Option<String>,
    pub identities_only: Option<bool>,
    pub proxy_jump: Option<String>,
    pub proxy_command: Option<String>,
    pub forward_agent: Option<bool>,
    pub add_keys_to_agent: Option<bool>,
    pub use_keychain: Option<bool>,
    pub server_alive_interval: Option<IntValue>,
    pub server_alive_count_max: Option<IntValue>,
    pub strict_host_key_checking: Option<String>,
    pub user_known_hosts_file: Option<String>,
    pub log_level: Option<String>,
    pub compression: Option<bool>,
    /// Unrecognized directives, ordered as they appeared.
    pub extras: Vec<(String, String)>,
}

impl SshHostConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// A new host entry seeded with the defaults the editor offers for a
    /// freshly created alias.
    pub fn with_defaults(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Some(IntValue::Valid(22)),
            add_keys_to_agent: Some(true),
            use_keychain: Some(true),
            ..Self::default()
        }
    }

    /// Fold one directive into the typed projection.
    ///
    /// `key` is the canonicalized spelling for recognized directives and the
    /// original spelling otherwise. Type coercion happens here, not in the
    /// line model: a repeated directive overwrites the earlier value, and a
    /// failed integer parse is carried as `IntValue::Invalid`.
    pub fn apply_option(&mut self, key: &str, value: &str) {
        match key {
            "HostName" => self.host_name = Some(value.to_string()),
            "User" => self.user = Some(value.to_string()),
            "Port" => self.port = Some(IntValue::parse(value)),
            "IdentityFile" => self.identity_file = Some(value.to_string()),
            "IdentitiesOnly" => self.identities_only = Some(parse_bool(value)),
            "ProxyJump" => self.proxy_jump = Some(value.to_string()),
            "ProxyCommand" => self.proxy_command = Some(value.to_string()),
            "ForwardAgent" => self.forward_agent = Some(parse_bool(value)),
            "AddKeysToAgent" => self.add_keys_to_agent = Some(parse_bool(value)),
            "UseKeychain" => self.use_keychain = Some(parse_bool(value)),
            "ServerAliveInterval" => self.server_alive_interval = Some(IntValue::parse(value)),
            "ServerAliveCountMax" => self.server_alive_count_max = Some(IntValue::parse(value)),
            "StrictHostKeyChecking" => self.strict_host_key_checking = Some(value.to_string()),
            "UserKnownHostsFile" => self.user_known_hosts_file = Some(value.to_string()),
            "LogLevel" => self.log_level = Some(value.to_string()),
            "Compression" => self.compression = Some(parse_bool(value)),
            _ => self.extras.push((key.to_string(), value.to_string())),
        }
    }

    /// Emit the option lines for this host, canonical fields first in a
    /// fixed order, then the extras in source order. Empty values are
    /// skipped entirely.
    pub fn to_options(&self) -> Vec<(String, String)> {
        let mut opts: Vec<(String, String)> = Vec::new();

        push_str(&mut opts, "HostName", &self.host_name);
        push_str(&mut opts, "User", &self.user);
        if let Some(port) = &self.port {
            opts.push(("Port".to_string(), port.to_string()));
        }
        push_str(&mut opts, "IdentityFile", &self.identity_file);
        push_bool(&mut opts, "IdentitiesOnly", self.identities_only);
        push_str(&mut opts, "ProxyJump", &self.proxy_jump);
        push_str(&mut opts, "ProxyCommand", &self.proxy_command);
        push_bool(&mut opts, "ForwardAgent", self.forward_agent);
        push_bool(&mut opts, "AddKeysToAgent", self.add_keys_to_agent);
        push_bool(&mut opts, "UseKeychain", self.use_keychain);
        if let Some(v) = &self.server_alive_interval {
            opts.push(("ServerAliveInterval".to_string(), v.to_string()));
        }
        if let Some(v) = &self.server_alive_count_max {
            opts.push(("ServerAliveCountMax".to_string(), v.to_string()));
        }
        push_str(&mut opts, "StrictHostKeyChecking", &self.strict_host_key_checking);
        push_str(&mut opts, "UserKnownHostsFile", &self.user_known_hosts_file);
        push_str(&mut opts, "LogLevel", &self.log_level);
        push_bool(&mut opts, "Compression", self.compression);

        for (key, value) in &self.extras {
            if !value.is_empty() {
                opts.push((key.clone(), value.clone()));
            }
        }

        opts
    }

    /// The port as a usable number, when it is one.
    pub fn port_number(&self) -> Option<u16> {
        self.port
            .as_ref()
            .and_then(IntValue::as_u32)
            .and_then(|n| u16::try_from(n).ok())
    }
}

impl fmt::Display for SshHostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Host {}", self.host)?;
        if let Some(ref host_name) = self.host_name {
            write!(f, " ({host_name})")?;
        }
        if let Some(ref user) = self.user {
            write!(f, " user={user}")?;
        }
        if let Some(port) = self.port_number() {
            write!(f, " port={port}")?;
        }
        Ok(())
    }
}

/// Boolean directive coercion: `yes`/`true` (case-insensitive) are true,
/// everything else is false.
pub fn parse_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("yes") || raw.eq_ignore_ascii_case("true")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn push_str(opts: &mut Vec<(String, String)>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        if !v.is_empty() {
            opts.push((key.to_string(), v.clone()));
        }
    }
}

fn push_bool(opts: &mut Vec<(String, String)>, key: &str, value: Option<bool>) {
    if let Some(v) = value {
        opts.push((key.to_string(), yes_no(v).to_string()));
    }
}
