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

//! Add, update, and remove host entries
//!
//! Every edit validates first and only writes when nothing blocks. The
//! document is re-read from disk for each command, so concurrent edits are
//! last-writer-wins.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::path::Path;

use super::{load_document, print_validation_issues, save_document};
use crate::cli::HostArgs;
use crate::document::{IntValue, SshHostConfig};
use crate::validator::validate_host;

fn apply_args(host: &mut SshHostConfig, args: &HostArgs) {
    if let Some(hostname) = &args.hostname {
        host.host_name = Some(hostname.clone());
    }
    if let Some(user) = &args.user {
        host.user = Some(user.clone());
    }
    if let Some(port) = args.port {
        host.port = Some(IntValue::Valid(u32::from(port)));
    }
    if let Some(identity) = &args.identity {
        host.identity_file = Some(identity.clone());
    }
    if let Some(jump) = &args.proxy_jump {
        host.proxy_jump = Some(jump.clone());
    }
}

pub async fn add_host(config_path: &Path, name: &str, args: &HostArgs) -> Result<i32> {
    let mut doc = load_document(config_path).await?;

    let mut host = SshHostConfig::with_defaults(name);
    apply_args(&mut host, args);

    let report = validate_host(&host, &doc.host_names(), true);
    print_validation_issues(&report.issues);
    if report.has_blocking_errors {
        println!("{}", "Not saved: fix the errors above first".red());
        return Ok(1);
    }

    doc.add_host(host);
    save_document(config_path, &doc).await?;
    tracing::info!(host = name, "host added");
    println!("{} Added host '{}'", "✓".green(), name.bold());
    Ok(0)
}

pub async fn set_host(config_path: &Path, name: &str, args: &HostArgs) -> Result<i32> {
    let mut doc = load_document(config_path).await?;

    // Start from the current entry when there is one; otherwise this
    // behaves like add.
    let mut host = match doc.find_host(name) {
        Some(existing) => existing.clone(),
        None => SshHostConfig::with_defaults(name),
    };
    apply_args(&mut host, args);

    let report = validate_host(&host, &doc.host_names(), false);
    print_validation_issues(&report.issues);
    if report.has_blocking_errors {
        println!("{}", "Not saved: fix the errors above first".red());
        return Ok(1);
    }

    doc.update_host(name, host);
    save_document(config_path, &doc).await?;
    tracing::info!(host = name, "host updated");
    println!("{} Updated host '{}'", "✓".green(), name.bold());
    Ok(0)
}

pub async fn remove_host(config_path: &Path, name: &str) -> Result<i32> {
    let mut doc = load_document(config_path).await?;

    if doc.find_host(name).is_none() {
        println!("{}", format!("No host named '{name}'").dimmed());
        return Ok(0);
    }

    doc.remove_host(name);
    save_document(config_path, &doc).await?;
    tracing::info!(host = name, "host removed");
    println!("{} Removed host '{}'", "✓".green(), name.bold());
    Ok(0)
}
