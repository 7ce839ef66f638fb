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

//! Rule generation: one delete directive per mapped argument, then one
//! append directive carrying the composed destination constructor call.
//!
//! Fragment order always equals mapping declaration order. The fragment
//! list has a single writer (the emission loop) and a single reader
//! (`compose_final`), which consumes the accumulator so no further
//! directives can be emitted after composition.

use tracing::{debug, trace};

use crate::config::MigrationConfig;
use crate::directive::Directive;
use crate::template;

pub struct RuleAccumulator<'a> {
    config: &'a MigrationConfig,
    directives: Vec<Directive>,
    fragments: Vec<String>,
}

impl<'a> RuleAccumulator<'a> {
    pub fn new(config: &'a MigrationConfig) -> Self {
        Self {
            config,
            directives: Vec::with_capacity(config.mapping.len() + 1),
            fragments: Vec::with_capacity(config.mapping.len()),
        }
    }

    /// Emit the delete directive for one mapping entry and record the
    /// renamed fragment that will carry its captured value.
    pub fn emit_directive_for(&mut self, source_key: &str, destination_key: &str) {
        let directive = Directive::delete(template::delete_assignment(
            &self.config.receiver,
            source_key,
        ));
        trace!("Emitting {}", directive);
        self.directives.push(directive);
        self.fragments.push(template::fragment(destination_key));
    }

    /// Fragments recorded so far, in emission order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Append the composed constructor call and return the complete
    /// directive sequence. Consumes the accumulator.
    pub fn compose_final(mut self) -> Vec<Directive> {
        let call = template::constructor_call(&self.config.destination_type, &self.fragments);
        debug!("Composed replacement call: {}", call);
        self.directives.push(Directive::append(call));
        self.directives
    }
}

/// Generate the full rule set for a migration: n delete directives in
/// mapping order followed by one append directive. Deterministic for a
/// fixed config.
pub fn generate_rules(config: &MigrationConfig) -> Vec<Directive> {
    let mut accumulator = RuleAccumulator::new(config);
    for (source_key, destination_key) in config.mapping.iter() {
        accumulator.emit_directive_for(source_key, destination_key);
    }
    accumulator.compose_final()
}
