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

use super::{load_document, print_validation_issues};
use crate::validator::validate_config;

pub async fn check_config(config_path: &Path) -> Result<i32> {
    let doc = load_document(config_path).await?;
    let report = validate_config(&doc);

    println!(
        "\n{} {} ({} {})\n",
        "▶".cyan(),
        "Config validation".bold(),
        doc.hosts.len().to_string().yellow(),
        if doc.hosts.len() == 1 {
            "host"
        } else {
            "hosts"
        }
    );

    if report.issues.is_empty() {
        println!("  {} no issues found", "✓".green());
        return Ok(0);
    }

    print_validation_issues(&report.issues);
    println!();

    if report.has_blocking_errors {
        println!("{}", "Errors found".red().bold());
        Ok(1)
    } else {
        println!("{}", "Warnings only; nothing blocks a save".yellow());
        Ok(0)
    }
}
