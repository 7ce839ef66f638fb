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

//! One unit of work handed to the matching engine: a match template
//! plus its replacement template.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Concrete-syntax template locating the rewrite site; empty for
    /// directives that only insert new text
    pub match_template: String,
    /// Text substituted at the match site; empty deletes the match
    pub replace_template: String,
}

impl Directive {
    /// A directive that deletes whatever the template matches.
    pub fn delete(match_template: String) -> Self {
        Self {
            match_template,
            replace_template: String::new(),
        }
    }

    /// A directive that inserts `replace_template` at the rewrite site
    /// without matching any existing text.
    pub fn append(replace_template: String) -> Self {
        Self {
            match_template: String::new(),
            replace_template,
        }
    }

    pub fn is_delete(&self) -> bool {
        !self.match_template.is_empty() && self.replace_template.trim().is_empty()
    }

    pub fn is_append(&self) -> bool {
        self.match_template.is_empty()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_append() {
            write!(f, "append: {}", self.replace_template)
        } else if self.is_delete() {
            write!(f, "delete: {}", self.match_template)
        } else {
            write!(
                f,
                "replace: {} -> {}",
                self.match_template, self.replace_template
            )
        }
    }
}
