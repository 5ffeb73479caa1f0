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

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::files;
use crate::security::{discover_keys, run_security_scan, SecuritySeverity, SecurityStatus};

pub async fn audit_security() -> Result<i32> {
    let keys = discover_keys(files::ssh_dir()).await?;

    let known_hosts = match files::default_known_hosts_path() {
        Some(path) => files::read_text_or_empty(&path).await?,
        None => {
            tracing::warn!("could not determine known_hosts path; skipping that scan");
            String::new()
        }
    };

    let report = run_security_scan(&keys, &known_hosts);

    println!(
        "\n{} {} ({} {})\n",
        "▶".cyan(),
        "Security audit".bold(),
        keys.len().to_string().yellow(),
        if keys.len() == 1 { "key" } else { "keys" }
    );

    if report.issues.is_empty() {
        println!("  {} nothing to report", "✓".green());
    }
    for issue in &report.issues {
        let marker = match issue.severity {
            SecuritySeverity::Error => "✗".red().to_string(),
            SecuritySeverity::Warning => "!".yellow().to_string(),
            SecuritySeverity::Info => "i".blue().to_string(),
        };
        println!("  {} {}", marker, issue.title.bold());
        println!("      {}", issue.description);
        if let Some(suggestion) = &issue.suggestion {
            println!("      {}", suggestion.dimmed());
        }
    }

    println!();
    match report.status {
        SecurityStatus::Healthy => {
            println!("{}", "Overall: healthy".green().bold());
            Ok(0)
        }
        SecurityStatus::Warning => {
            println!("{}", "Overall: warnings".yellow().bold());
            Ok(0)
        }
        SecurityStatus::Error => {
            println!("{}", "Overall: action required".red().bold());
            Ok(1)
        }
    }
}
