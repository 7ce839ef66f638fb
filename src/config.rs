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

//! Migration configuration: the keyword-argument rename table plus the
//! receiver expression and destination constructor it applies to.
//!
//! All validation happens here, before any rule generation runs. A
//! `MigrationConfig` that exists is well-formed.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("duplicate source argument '{0}' in mapping")]
    DuplicateSourceKey(String),
    #[error("'{0}' is not a valid Python identifier")]
    InvalidIdentifier(String),
    #[error("'{0}' is not a valid receiver expression")]
    InvalidReceiver(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

fn is_identifier(text: &str) -> bool {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
    re.is_match(text)
}

/// A dotted attribute path such as `openai` or `client.config.openai_api`
fn is_receiver_path(text: &str) -> bool {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
    });
    re.is_match(text)
}

/// Ordered table of `(source_key, destination_key)` keyword renames.
///
/// Declaration order is semantically significant: it fixes the argument
/// order of the composed constructor call, regardless of the order in
/// which the assignments appear in any actual source file. Source keys
/// are unique; construction fails otherwise.
///
/// Serialized as an array of pairs rather than a JSON object so that
/// order survives a round trip and duplicate source keys are caught at
/// load time instead of being silently collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(String, String)>", into = "Vec<(String, String)>")]
pub struct ArgumentMapping {
    entries: IndexMap<String, String>,
}

impl ArgumentMapping {
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = IndexMap::new();
        for (source, destination) in pairs {
            if !is_identifier(&source) {
                return Err(ConfigError::InvalidIdentifier(source));
            }
            if !is_identifier(&destination) {
                return Err(ConfigError::InvalidIdentifier(destination));
            }
            if entries.contains_key(&source) {
                return Err(ConfigError::DuplicateSourceKey(source));
            }
            entries.insert(source, destination);
        }
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, d)| (s.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<(String, String)>> for ArgumentMapping {
    type Error = ConfigError;

    fn try_from(pairs: Vec<(String, String)>) -> Result<Self, Self::Error> {
        Self::from_pairs(pairs)
    }
}

impl From<ArgumentMapping> for Vec<(String, String)> {
    fn from(mapping: ArgumentMapping) -> Self {
        mapping
            .entries
            .into_iter()
            .collect()
    }
}

/// Complete description of one constructor migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// The attribute path whose assignments are being collected, e.g.
    /// `openai_api` in `openai_api.api_key = ...`
    pub receiver: String,
    /// Name of the constructor the collected arguments are handed to
    pub destination_type: String,
    pub mapping: ArgumentMapping,
}

static AZURE_OPENAI: Lazy<MigrationConfig> = Lazy::new(|| {
    let mapping = ArgumentMapping::from_pairs([
        ("api_type".to_string(), "api_type".to_string()),
        ("api_key".to_string(), "api_key".to_string()),
        ("api_base".to_string(), "azure_endpoint".to_string()),
        ("api_version".to_string(), "api_version".to_string()),
    ])
    .expect("builtin mapping is well-formed");
    MigrationConfig {
        receiver: "openai_api".to_string(),
        destination_type: "AzureOpenAI".to_string(),
        mapping,
    }
});

impl MigrationConfig {
    pub fn new(
        receiver: &str,
        destination_type: &str,
        mapping: ArgumentMapping,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            receiver: receiver.to_string(),
            destination_type: destination_type.to_string(),
            mapping,
        };
        config.validate()?;
        Ok(config)
    }

    /// The builtin migration: module-level `openai_api.*` configuration
    /// assignments into an `AzureOpenAI(...)` client construction.
    pub fn azure_openai() -> Self {
        AZURE_OPENAI.clone()
    }

    /// Load a migration from a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: MigrationConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_receiver_path(&self.receiver) {
            return Err(ConfigError::InvalidReceiver(self.receiver.clone()));
        }
        if !is_identifier(&self.destination_type) {
            return Err(ConfigError::InvalidIdentifier(
                self.destination_type.clone(),
            ));
        }
        Ok(())
    }
}
