// Copyright (C) 2024 Jelmer Vernooij <jelmer@samba.org>
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Matching engine boundary.
//!
//! Rule generation only produces template strings; executing them
//! against real source text is the job of a matching engine behind the
//! `MatchEngine` trait. `RegexEngine` is a line-oriented reference
//! implementation good enough for module-level configuration
//! assignments; it does not attempt balanced-expression matching.

use anyhow::{bail, Result};
use regex::Regex;
use std::collections::HashMap;

use crate::template::CONCRETE_SYNTAX_PREFIX;

/// A successful match of one template against source text.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Byte range of the matched text within the source
    pub start: usize,
    pub end: usize,
    /// The matched text itself
    pub matched_text: String,
    /// Captured hole bindings, keyed by hole name
    pub bindings: HashMap<String, String>,
}

/// Compiles a template with holes and finds its first match in source
/// text, returning the captured bindings.
pub trait MatchEngine {
    fn find_match(&self, template: &str, source: &str) -> Result<Option<MatchOutcome>>;
}

#[derive(Debug, Default)]
pub struct RegexEngine;

impl RegexEngine {
    pub fn new() -> Self {
        Self
    }

    /// Translate a concrete-syntax template into an anchored line regex.
    ///
    /// Literal text is escaped, runs of whitespace match flexibly, and
    /// each `:[name]` hole becomes a named capture group taking the
    /// rest of the expression on that line.
    fn compile(template: &str) -> Result<Regex> {
        let body = template
            .strip_prefix(CONCRETE_SYNTAX_PREFIX)
            .unwrap_or(template);

        let mut pattern = String::from(r"(?m)^[ \t]*");
        let mut rest = body;
        while !rest.is_empty() {
            if let Some(hole_start) = rest.find(":[") {
                push_literal(&mut pattern, &rest[..hole_start]);
                let after = &rest[hole_start + 2..];
                let Some(hole_end) = after.find(']') else {
                    bail!("unterminated hole in template: {}", template);
                };
                let name = &after[..hole_end];
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    bail!("invalid hole name ':[{}]' in template: {}", name, template);
                }
                pattern.push_str(&format!("(?P<{}>.+?)", name));
                rest = &after[hole_end + 1..];
            } else {
                push_literal(&mut pattern, rest);
                rest = "";
            }
        }
        pattern.push_str(r"[ \t]*$");
        Ok(Regex::new(&pattern)?)
    }
}

/// Escape a literal template chunk, letting whitespace match loosely.
fn push_literal(pattern: &mut String, literal: &str) {
    let mut first = true;
    for word in literal.split_whitespace() {
        if !first {
            pattern.push_str(r"[ \t]*");
        } else if literal.starts_with(char::is_whitespace) {
            pattern.push_str(r"[ \t]*");
        }
        pattern.push_str(&regex::escape(word));
        first = false;
    }
    if !literal.is_empty() && literal.ends_with(char::is_whitespace) {
        pattern.push_str(r"[ \t]*");
    }
}

impl MatchEngine for RegexEngine {
    fn find_match(&self, template: &str, source: &str) -> Result<Option<MatchOutcome>> {
        let re = Self::compile(template)?;
        let Some(captures) = re.captures(source) else {
            return Ok(None);
        };
        let whole = captures.get(0).expect("group 0 always present");

        let mut bindings = HashMap::new();
        for name in re.capture_names().flatten() {
            if let Some(m) = captures.name(name) {
                bindings.insert(name.to_string(), m.as_str().trim().to_string());
            }
        }

        Ok(Some(MatchOutcome {
            start: whole.start(),
            end: whole.end(),
            matched_text: whole.as_str().to_string(),
            bindings,
        }))
    }
}
