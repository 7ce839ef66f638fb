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

//! Template text construction for concrete-syntax match/replace rules.
//!
//! Templates are plain strings mixing literal source text with holes.
//! A hole (`:[name]`) binds to arbitrary captured text when the matching
//! engine executes the rule; this module only builds the strings.

use std::collections::HashMap;

/// The capture hole used for assignment values.
pub const HOLE: &str = ":[x]";

/// Prefix marking a template as a concrete-syntax query.
pub const CONCRETE_SYNTAX_PREFIX: &str = "cs ";

/// Match template for one keyword assignment on the receiver,
/// capturing the assigned value: `cs <receiver>.<key> = :[x]`
pub fn delete_assignment(receiver: &str, source_key: &str) -> String {
    format!("{CONCRETE_SYNTAX_PREFIX}{receiver}.{source_key} = {HOLE}")
}

/// One renamed keyword-argument fragment: `<key> = :[x]`
pub fn fragment(destination_key: &str) -> String {
    format!("{destination_key} = {HOLE}")
}

/// Assemble the destination constructor call from fragments, in order.
/// Zero fragments yield a zero-argument call.
pub fn constructor_call(destination_type: &str, fragments: &[String]) -> String {
    format!("{}({})", destination_type, fragments.join(", "))
}

/// Substitute captured bindings into a template.
///
/// Both hole spellings are recognized: `:[tag]` (concrete syntax) and
/// `@tag` (tree-sitter query style). Tags with no binding are left
/// untouched.
pub fn instantiate(template: &str, bindings: &HashMap<String, String>) -> String {
    let mut output = template.to_string();
    for (tag, substitute) in bindings {
        let key_at_tag = format!("@{tag}");
        let key_colon_tag = format!(":[{tag}]");
        for key in &[key_at_tag, key_colon_tag] {
            output = output.replace(key, substitute);
        }
    }
    output
}
