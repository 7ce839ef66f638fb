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

//! Command-line interface for the rekey tool.
//!
//! This binary provides the entry point for the rekey CLI, which offers
//! commands for:
//!
//! - `generate`: Print the structural match/replace rule set for a
//!   keyword-argument migration, for consumption by a rewrite engine.
//! - `migrate`: Apply the rule set to Python source files, replacing the
//!   mapped configuration assignments with the destination constructor call.
//! - `info`: Show the active migration table and the rules it produces.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use rekey_python::{generate_rules, migrate_source, MigrationConfig, RegexEngine};

#[derive(Parser)]
#[command(name = "rekey")]
#[command(about = "Rekey - Rename constructor keyword arguments across a codebase")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated match/replace rule set
    Generate {
        /// Migration config file (JSON); defaults to the builtin AzureOpenAI migration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Migrate Python files by rewriting mapped configuration assignments
    Migrate {
        /// Python files or directories to migrate
        paths: Vec<String>,

        /// Migration config file (JSON); defaults to the builtin AzureOpenAI migration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write changes back to files (default: print to stdout)
        #[arg(short, long, group = "mode")]
        write: bool,

        /// Check if files need migration without modifying them (exit 1 if changes needed)
        #[arg(long, group = "mode")]
        check: bool,
    },

    /// Show the active migration table and its directive count
    Info {
        /// Migration config file (JSON); defaults to the builtin AzureOpenAI migration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone)]
enum OutputFormat {
    Text,
    Json,
}

/// Discover Python files in a directory or resolve a path argument
fn discover_python_files(path: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(path);

    // If it's already a Python file, return it
    if path.is_file() && path.extension().is_some_and(|ext| ext == "py") {
        return Ok(vec![path.to_path_buf()]);
    }

    // If it's a directory, scan recursively for Python files
    if path.is_dir() {
        let mut python_files = Vec::new();
        visit_python_files(path, &mut python_files)?;
        python_files.sort();
        return Ok(python_files);
    }

    // Try glob pattern matching for file paths
    if path.to_string_lossy().contains('*') || path.to_string_lossy().contains('?') {
        let pattern = path.to_string_lossy();
        let glob_results = glob::glob(&pattern)?;
        let mut files = Vec::new();
        for entry in glob_results {
            let entry = entry?;
            if entry.extension().is_some_and(|ext| ext == "py") {
                files.push(entry);
            }
        }
        files.sort();
        return Ok(files);
    }

    // Fall back to treating it as a file path (may not exist)
    Ok(vec![path.to_path_buf()])
}

fn visit_python_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                // Skip hidden directories and __pycache__
                if let Some(name) = path.file_name() {
                    let name = name.to_string_lossy();
                    if !name.starts_with('.') && name != "__pycache__" {
                        visit_python_files(&path, files)?;
                    }
                }
            } else if path.extension().is_some_and(|ext| ext == "py") {
                files.push(path);
            }
        }
    }
    Ok(())
}

/// Expand a list of path arguments into a deduplicated file list
fn expand_paths(paths: &[String]) -> Result<Vec<PathBuf>> {
    use indexmap::IndexSet;

    let mut expanded = IndexSet::new();
    for path in paths {
        expanded.extend(discover_python_files(path)?);
    }

    Ok(expanded.into_iter().collect())
}

/// Load the migration config, falling back to the builtin AzureOpenAI table
fn load_config(config: Option<&Path>) -> Result<MigrationConfig> {
    match config {
        Some(path) => MigrationConfig::from_file(path)
            .with_context(|| format!("Failed to load migration config from {}", path.display())),
        None => Ok(MigrationConfig::azure_openai()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    if cli.debug || std::env::var("RUST_LOG").is_ok() {
        let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => {
                if cli.debug {
                    tracing_subscriber::EnvFilter::new("debug")
                } else {
                    tracing_subscriber::EnvFilter::new("warn")
                }
            }
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    match cli.command {
        Commands::Generate { config, format } => {
            let migration = load_config(config.as_deref())?;
            let rules = generate_rules(&migration);

            match format {
                OutputFormat::Text => {
                    for rule in &rules {
                        println!("{}", rule);
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&rules)?);
                }
            }

            Ok(())
        }

        Commands::Migrate {
            paths,
            config,
            write,
            check,
        } => {
            let migration = load_config(config.as_deref())?;
            let engine = RegexEngine::new();
            let files = expand_paths(&paths)?;

            let mut needs_changes = false;
            for filepath in &files {
                let original = fs::read_to_string(filepath)
                    .with_context(|| format!("Failed to read file: {}", filepath.display()))?;
                let result = migrate_source(&original, &migration, &engine)?;
                let has_changes = result != original;

                if check {
                    // Check mode: just report if changes are needed
                    if has_changes {
                        println!("{}: needs migration", filepath.display());
                        needs_changes = true;
                    } else {
                        println!("{}: up to date", filepath.display());
                    }
                } else if write {
                    // Write mode: update file if changed
                    if has_changes {
                        fs::write(filepath, &result)?;
                        println!("Modified: {}", filepath.display());
                    } else {
                        println!("Unchanged: {}", filepath.display());
                    }
                } else {
                    // Default: print rewritten source to stdout
                    if has_changes {
                        println!("# migration: {}", filepath.display());
                        print!("{}", result);
                    }
                }
            }

            std::process::exit(if check && needs_changes { 1 } else { 0 });
        }

        Commands::Info { config } => {
            let migration = load_config(config.as_deref())?;

            println!("Receiver: {}", migration.receiver);
            println!("Destination type: {}", migration.destination_type);
            println!("Mapped arguments: {}", migration.mapping.len());
            for (source_key, destination_key) in migration.mapping.iter() {
                if source_key == destination_key {
                    println!("  - {}", source_key);
                } else {
                    println!("  - {} -> {}", source_key, destination_key);
                }
            }

            let rules = generate_rules(&migration);
            println!("Directives generated: {}", rules.len());

            Ok(())
        }
    }
}
