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

//! Command implementations behind the CLI
//!
//! Each mutation is one read -> parse -> mutate -> serialize -> write round
//! trip against the config file; there is no cross-command state.

pub mod audit;
pub mod check;
pub mod edit;
pub mod forget;
pub mod list;

pub use audit::audit_security;
pub use check::check_config;
pub use edit::{add_host, remove_host, set_host};
pub use forget::forget_known_host;
pub use list::list_hosts;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

use crate::document::{self, ParsedDocument};
use crate::files;
use crate::validator::{Severity, ValidationIssue};

pub(crate) async fn load_document(path: &Path) -> Result<ParsedDocument> {
    let text = files::read_text_or_empty(path)
        .await
        .with_context(|| format!("Failed to read SSH config file: {}", path.display()))?;
    Ok(document::parse(&text))
}

pub(crate) async fn save_document(path: &Path, doc: &ParsedDocument) -> Result<()> {
    files::write_text(path, &doc.serialize())
        .await
        .with_context(|| format!("Failed to write SSH config file: {}", path.display()))
}

pub(crate) fn print_validation_issues(issues: &[ValidationIssue]) {
    for issue in issues {
        let field = issue
            .field
            .as_deref()
            .map(|f| format!("[{f}] "))
            .unwrap_or_default();
        match issue.severity {
            Severity::Error => {
                println!("  {} {}{}", "✗".red(), field.bold(), issue.message);
            }
            Severity::Warning => {
                println!("  {} {}{}", "!".yellow(), field.bold(), issue.message);
            }
        }
        if let Some(hint) = &issue.hint {
            println!("      {}", hint.dimmed());
        }
    }
}
