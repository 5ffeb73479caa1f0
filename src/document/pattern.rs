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

//! Wildcard pattern matching for host names
//!
//! Supports `*` (any run of characters) and `?` (any single character);
//! every other character matches itself, case-insensitively.

/// Check whether a hostname matches a single host pattern.
pub fn host_matches_pattern(hostname: &str, pattern: &str) -> bool {
    if pattern.contains('*') || pattern.contains('?') {
        wildcard_match(hostname, pattern)
    } else {
        hostname.eq_ignore_ascii_case(pattern)
    }
}

fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text_chars: Vec<char> = text.chars().collect();
    let pattern_chars: Vec<char> = pattern.chars().collect();
    match_recursive(&text_chars, &pattern_chars, 0, 0)
}

fn match_recursive(
    text_chars: &[char],
    pattern_chars: &[char],
    text_idx: usize,
    pattern_idx: usize,
) -> bool {
    if pattern_idx >= pattern_chars.len() {
        return text_idx >= text_chars.len();
    }

    if text_idx >= text_chars.len() {
        // Only a tail of '*' can match the empty remainder
        return pattern_chars[pattern_idx..].iter().all(|&c| c == '*');
    }

    match pattern_chars[pattern_idx] {
        '*' => {
            // Zero characters, then one or more
            match_recursive(text_chars, pattern_chars, text_idx, pattern_idx + 1)
                || match_recursive(text_chars, pattern_chars, text_idx + 1, pattern_idx)
        }
        '?' => match_recursive(text_chars, pattern_chars, text_idx + 1, pattern_idx + 1),
        c => {
            text_chars[text_idx].eq_ignore_ascii_case(&c)
                && match_recursive(text_chars, pattern_chars, text_idx + 1, pattern_idx + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert!(host_matches_pattern("Example.COM", "example.com"));
        assert!(!host_matches_pattern("example.org", "example.com"));
    }

    #[test]
    fn test_star_wildcard() {
        assert!(host_matches_pattern("web1.example.com", "web*.example.com"));
        assert!(host_matches_pattern("web123.example.com", "web*.example.com"));
        assert!(!host_matches_pattern("db1.example.com", "web*.example.com"));
        assert!(host_matches_pattern("anything", "*"));
    }

    #[test]
    fn test_question_mark_wildcard() {
        assert!(host_matches_pattern("test", "?est"));
        assert!(!host_matches_pattern("testing", "?est"));
        assert!(host_matches_pattern("node1", "node?"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert!(host_matches_pattern("a.b", "a.b"));
        assert!(!host_matches_pattern("axb", "a.b"));
        assert!(host_matches_pattern("host[1]", "host[1]"));
    }
}
