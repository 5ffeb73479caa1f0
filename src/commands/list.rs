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
use std::path::Path;

use super::load_document;

pub async fn list_hosts(config_path: &Path) -> Result<i32> {
    let doc = load_document(config_path).await?;

    if doc.hosts.is_empty() {
        println!("{}", "No hosts configured".dimmed());
        return Ok(0);
    }

    println!(
        "\n{} {} ({})\n",
        "▶".cyan(),
        "Configured hosts".bold(),
        config_path.display().to_string().dimmed()
    );
    for host in &doc.hosts {
        println!("  {} {}", "●".blue(), host.host.bold());
        let mut details = Vec::new();
        if let Some(host_name) = &host.host_name {
            details.push(host_name.clone());
        }
        if let Some(user) = &host.user {
            details.push(format!("user {user}"));
        }
        if let Some(port) = host.port_number() {
            if port != 22 {
                details.push(format!("port {port}"));
            }
        }
        if let Some(jump) = &host.proxy_jump {
            details.push(format!("via {jump}"));
        }
        if !details.is_empty() {
            println!("    {} {}", "•".dimmed(), details.join(", ").dimmed());
        }
    }
    println!();

    Ok(0)
}
