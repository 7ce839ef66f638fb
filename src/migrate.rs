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

//! Apply a generated rule set to Python source text.
//!
//! This is the reference driver for the rules `generate_rules` emits:
//! each matched assignment line is deleted and its captured value is
//! substituted into the corresponding renamed fragment; the composed
//! constructor call is inserted at the first rewrite site. Entries with
//! no match in the source are skipped with a warning.

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::MigrationConfig;
use crate::engine::MatchEngine;
use crate::template;

/// Rewrite one source string according to `config`.
///
/// Returns the source unchanged when none of the mapped assignments
/// are present.
pub fn migrate_source(
    source: &str,
    config: &MigrationConfig,
    engine: &impl MatchEngine,
) -> Result<String> {
    let mut working = source.to_string();
    let mut fragments: Vec<String> = Vec::new();
    let mut insert_at: Option<usize> = None;
    let mut indent = String::new();

    for (source_key, destination_key) in config.mapping.iter() {
        let match_template = template::delete_assignment(&config.receiver, source_key);
        let Some(outcome) = engine.find_match(&match_template, &working)? else {
            warn!(
                "No assignment of '{}' on '{}' found, skipping",
                source_key, config.receiver
            );
            continue;
        };
        debug!(
            "Deleting assignment of '{}': {}",
            source_key, outcome.matched_text
        );

        fragments.push(template::instantiate(
            &template::fragment(destination_key),
            &outcome.bindings,
        ));

        let (line_start, line_end) = expand_to_line(&working, outcome.start, outcome.end);
        working.replace_range(line_start..line_end, "");

        // Track the first rewrite site, shifting it left when a later
        // deletion lands before it.
        insert_at = Some(match insert_at {
            None => {
                indent = outcome
                    .matched_text
                    .chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .collect();
                line_start
            }
            Some(at) if line_end <= at => at - (line_end - line_start),
            Some(at) => at,
        });
    }

    if fragments.is_empty() {
        return Ok(source.to_string());
    }

    let call = template::constructor_call(&config.destination_type, &fragments);
    let at = insert_at.unwrap_or(working.len());
    working.insert_str(at, &format!("{}{}\n", indent, call));

    Ok(working)
}

/// Widen a match range to cover its full line, including the trailing
/// newline, so deleting it leaves no blank line behind.
fn expand_to_line(source: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = source[..start].rfind('\n').map_or(0, |p| p + 1);
    let line_end = source[end..]
        .find('\n')
        .map_or(source.len(), |p| end + p + 1);
    (line_start, line_end)
}
