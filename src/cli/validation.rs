//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use std::fs;
use std::path::PathBuf;

/// Validate that a file path is accessible (exists and is readable)
fn validate_readable_file(kind: &str, path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    // Check if file exists
    if !path.exists() {
        return Err(format!("{kind} file does not exist: '{path_str}'"));
    }

    // Check if it's a file (not a directory)
    if !path.is_file() {
        return Err(format!("{kind} path is not a file: '{path_str}'"));
    }

    // Check if file is readable
    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read {} file '{path_str}': {e}", kind.to_lowercase())),
    }
}

pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    validate_readable_file("Configuration", path_str)
}

pub fn validate_content_file_path(path_str: &str) -> Result<PathBuf, String> {
    validate_readable_file("Content", path_str)
}

/// Rejects empty or whitespace-only values
pub fn validate_non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("Value cannot be empty".to_string());
    }
    Ok(value.to_string())
}
