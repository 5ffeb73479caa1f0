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

//! Mutation of a parsed document: add, update, and remove host blocks
//!
//! All three operations are pure in-memory edits with no I/O and no failure
//! states. They keep the derived host list in step with the line sequence,
//! and never touch lines outside the affected block.

use super::line::ConfigLine;
use super::types::SshHostConfig;
use super::ParsedDocument;

impl ParsedDocument {
    /// Append a new host block at the end of the document, separated from
    /// existing content by a single blank line.
    ///
    /// Not idempotent: adding the same alias twice produces two blocks.
    /// Duplicate prevention is the validator's job.
    pub fn add_host(&mut self, host: SshHostConfig) {
        if !matches!(self.lines.last(), None | Some(ConfigLine::Blank)) {
            self.lines.push(ConfigLine::Blank);
        }
        self.lines.push(ConfigLine::HostHeader(host.host.clone()));
        for (key, value) in host.to_options() {
            self.lines.push(ConfigLine::HostOption { key, value });
        }
        self.hosts.push(host);
    }

    /// Replace the block whose header matches `old_name` with a freshly
    /// emitted block for `host`. Falls back to [`add_host`](Self::add_host)
    /// when no such block exists.
    ///
    /// The whole block is rewritten from the typed host, so comments that
    /// were interleaved inside it are dropped. Blocks outside the target are
    /// preserved verbatim.
    pub fn update_host(&mut self, old_name: &str, host: SshHostConfig) {
        let Some(start) = self.header_index(old_name) else {
            self.add_host(host);
            return;
        };
        let end = self.block_end(start);

        let mut block = Vec::with_capacity(host.to_options().len() + 1);
        block.push(ConfigLine::HostHeader(host.host.clone()));
        for (key, value) in host.to_options() {
            block.push(ConfigLine::HostOption { key, value });
        }
        self.lines.splice(start..end, block);

        if let Some(slot) = self.hosts.iter_mut().find(|h| h.host == old_name) {
            *slot = host;
        }
    }

    /// Delete the block whose header matches `host_name`, then tidy up the
    /// blank-line structure left behind. A missing host is a no-op.
    pub fn remove_host(&mut self, host_name: &str) {
        let Some(start) = self.header_index(host_name) else {
            return;
        };
        let end = self.block_end(start);
        self.lines.drain(start..end);

        self.lines
            .dedup_by(|a, b| a.is_blank() && b.is_blank());
        while self.lines.first().is_some_and(ConfigLine::is_blank) {
            self.lines.remove(0);
        }
        while self.lines.last().is_some_and(ConfigLine::is_blank) {
            self.lines.pop();
        }

        self.hosts.retain(|h| h.host != host_name);
    }

    fn header_index(&self, name: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| matches!(line, ConfigLine::HostHeader(n) if n == name))
    }

    /// Index one past the last line belonging to the block starting at
    /// `header`: the block runs until the next blank line or host header.
    fn block_end(&self, header: usize) -> usize {
        let mut end = header + 1;
        while end < self.lines.len()
            && !matches!(
                self.lines[end],
                ConfigLine::Blank | ConfigLine::HostHeader(_)
            )
        {
            end += 1;
        }
        end
    }
}
