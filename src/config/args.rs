//! Command-line argument parsing
//!
//! This module provides utilities for parsing command-line arguments,
//! particularly for extracting the configuration file path.

/// Parse configuration file path from command-line arguments
///
/// Supports multiple formats:
/// - `-c path` / `--config path`
/// - `-c=path` / `--config=path`
///
/// # Arguments
/// * `args` - The command-line arguments (including program name at index 0)
///
/// # Returns
/// * `Some(String)` - The configuration file path if found
/// * `None` - No configuration file specified
///
/// # Examples
/// ```
/// use clicktally::config::args::parse_config_path;
/// let args = vec!["program".to_string(), "-c".to_string(), "custom.toml".to_string()];
/// assert_eq!(parse_config_path(&args), Some("custom.toml".to_string()));
/// ```
pub fn parse_config_path(args: &[String]) -> Option<String> {
    let mut i = 1; // Skip program name
    while i < args.len() {
        let arg = &args[i];

        // Check for -c or --config with value after space
        if (arg == "-c" || arg == "--config") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }

        // Check for -c=value or --config=value
        if let Some(path) = arg.strip_prefix("-c=") {
            return Some(path.to_string());
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }

        i += 1;
    }

    None
}
