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

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::files;
use crate::security::remove_known_host_by_name;

pub async fn forget_known_host(name: &str) -> Result<i32> {
    let path = files::default_known_hosts_path()
        .context("Could not determine the known_hosts path")?;

    let content = files::read_text_or_empty(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let updated = remove_known_host_by_name(&content, name);
    if updated == content {
        println!("{}", format!("No known_hosts entries match '{name}'").dimmed());
        return Ok(0);
    }

    let removed = content.split('\n').count() - updated.split('\n').count();
    files::write_text(&path, &updated)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(host = name, removed, "known_hosts entries removed");
    println!(
        "{} Removed {} {} for '{}'",
        "✓".green(),
        removed.to_string().yellow(),
        if removed == 1 { "entry" } else { "entries" },
        name.bold()
    );
    Ok(0)
}
