//! Variable lookup against a flat `key=value` definitions file
//!
//! The definitions file is the same one passed to `hurl --variables-file`.
//! Lookups re-read the file on every call so external edits are picked up
//! without any invalidation step.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of looking up a variable in the configured definitions file.
///
/// Every failure mode is a variant rather than an error so callers can
/// render it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The variable is defined; holds its trimmed value
    Found(String),
    /// No definitions file is configured
    NoEnvironmentConfigured,
    /// The configured definitions file does not exist at the resolved path
    EnvironmentFileMissing(PathBuf),
    /// The file exists but does not define the variable
    NotFound,
    /// The file exists but could not be read
    ReadError(String),
}

impl fmt::Display for ResolutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionOutcome::Found(value) => write!(f, "{}", value),
            ResolutionOutcome::NoEnvironmentConfigured => {
                write!(f, "No environment file configured")
            }
            ResolutionOutcome::EnvironmentFileMissing(path) => {
                write!(f, "Environment file not found: {}", path.display())
            }
            ResolutionOutcome::NotFound => write!(f, "Variable not found in environment file"),
            ResolutionOutcome::ReadError(message) => {
                write!(f, "Error reading environment file: {}", message)
            }
        }
    }
}

/// Resolves the configured definitions file to a path.
///
/// Returns `None` when the setting is empty. Absolute settings are used
/// verbatim; relative ones are joined onto `base_path`.
///
/// # Examples
///
/// ```
/// use hurler::variables::resolve_environment_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_environment_path("", Path::new("/ws")), None);
/// assert_eq!(
///     resolve_environment_path("env/dev.env", Path::new("/ws")),
///     Some(PathBuf::from("/ws/env/dev.env"))
/// );
/// ```
pub fn resolve_environment_path(environment_file: &str, base_path: &Path) -> Option<PathBuf> {
    if environment_file.is_empty() {
        return None;
    }

    let setting = Path::new(environment_file);
    if setting.is_absolute() {
        Some(setting.to_path_buf())
    } else {
        Some(base_path.join(setting))
    }
}

/// Finds the value of `name` in definitions text.
///
/// Blank lines and `#` comments are skipped. Each remaining line is split on
/// its first `=`; the rest of the line is the value, `=` characters included.
/// The first line whose trimmed key equals `name` wins. Lines with an empty
/// key never match, so `{{ }}` resolves to nothing.
///
/// # Examples
///
/// ```
/// use hurler::variables::lookup_definition;
///
/// let content = "base=https://x\napi_key=abc=123\n";
/// assert_eq!(lookup_definition(content, "api_key"), Some("abc=123".to_string()));
/// assert_eq!(lookup_definition(content, "missing"), None);
/// ```
pub fn lookup_definition(content: &str, name: &str) -> Option<String> {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = trimmed.split_once('=').unwrap_or((trimmed, ""));
        let key = key.trim();
        if !key.is_empty() && key == name {
            return Some(value.trim().to_string());
        }
    }

    None
}

/// Looks up `variable_name` in the definitions file named by `environment_file`.
///
/// # Arguments
///
/// * `variable_name` - Placeholder name to look up
/// * `environment_file` - The `environmentFile` setting, possibly empty
/// * `base_path` - Directory that relative settings are joined onto
///
/// # Returns
///
/// Always one of the [`ResolutionOutcome`] variants; I/O failures are folded
/// into [`ResolutionOutcome::ReadError`].
pub fn resolve(variable_name: &str, environment_file: &str, base_path: &Path) -> ResolutionOutcome {
    let path = match resolve_environment_path(environment_file, base_path) {
        Some(path) => path,
        None => return ResolutionOutcome::NoEnvironmentConfigured,
    };

    if !path.exists() {
        log::debug!("environment file {} does not exist", path.display());
        return ResolutionOutcome::EnvironmentFileMissing(path);
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("failed to read environment file {}: {}", path.display(), e);
            return ResolutionOutcome::ReadError(e.to_string());
        }
    };

    match lookup_definition(&content, variable_name) {
        Some(value) => ResolutionOutcome::Found(value),
        None => ResolutionOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_env(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_resolve_environment_path_absolute() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("vars.env");
        let setting = absolute.to_str().unwrap();

        assert_eq!(
            resolve_environment_path(setting, Path::new("/elsewhere")),
            Some(absolute.clone())
        );
    }

    #[test]
    fn test_resolve_environment_path_empty_base() {
        assert_eq!(
            resolve_environment_path("vars.env", Path::new("")),
            Some(PathBuf::from("vars.env"))
        );
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let content = "# header\nhost=first\nport=80\n\nhost=second\n";
        assert_eq!(lookup_definition(content, "host"), Some("first".to_string()));
    }

    #[test]
    fn test_lookup_skips_comments() {
        let content = "#host=commented\n  # host=indented\nhost=real";
        assert_eq!(lookup_definition(content, "host"), Some("real".to_string()));
        assert_eq!(lookup_definition("#host=only", "#host"), None);
    }

    #[test]
    fn test_lookup_trims_key_and_value() {
        let content = "  user  =   alice   \n";
        assert_eq!(lookup_definition(content, "user"), Some("alice".to_string()));
    }

    #[test]
    fn test_lookup_line_without_equals() {
        assert_eq!(lookup_definition("flag\n", "flag"), Some(String::new()));
    }

    #[test]
    fn test_lookup_ignores_empty_key() {
        let content = "=secret\n  = other\nhost=example.com\n";
        assert_eq!(lookup_definition(content, ""), None);
        assert_eq!(lookup_definition(content, "host"), Some("example.com".to_string()));
    }

    #[test]
    fn test_lookup_handles_crlf() {
        let content = "host=example.com\r\ntoken=abc\r\n";
        assert_eq!(lookup_definition(content, "token"), Some("abc".to_string()));
    }

    #[test]
    fn test_resolve_no_environment_configured() {
        assert_eq!(
            resolve("host", "", Path::new("/ws")),
            ResolutionOutcome::NoEnvironmentConfigured
        );
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = TempDir::new().unwrap();
        let outcome = resolve("host", "missing.env", dir.path());

        assert_eq!(
            outcome,
            ResolutionOutcome::EnvironmentFileMissing(dir.path().join("missing.env"))
        );
    }

    #[test]
    fn test_resolve_found_relative() {
        let dir = TempDir::new().unwrap();
        write_env(&dir, "vars.env", "base=https://x\napi_key=abc=123\n");

        assert_eq!(
            resolve("api_key", "vars.env", dir.path()),
            ResolutionOutcome::Found("abc=123".to_string())
        );
    }

    #[test]
    fn test_resolve_not_found() {
        let dir = TempDir::new().unwrap();
        write_env(&dir, "vars.env", "base=https://x\n");

        assert_eq!(
            resolve("token", "vars.env", dir.path()),
            ResolutionOutcome::NotFound
        );
    }

    #[test]
    fn test_resolve_directory_is_read_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("vars.env")).unwrap();

        let outcome = resolve("host", "vars.env", dir.path());
        assert!(matches!(outcome, ResolutionOutcome::ReadError(_)));
    }

    #[test]
    fn test_resolve_rereads_file() {
        let dir = TempDir::new().unwrap();
        let path = write_env(&dir, "vars.env", "host=old\n");
        assert_eq!(
            resolve("host", "vars.env", dir.path()),
            ResolutionOutcome::Found("old".to_string())
        );

        fs::write(&path, "host=new\n").unwrap();
        assert_eq!(
            resolve("host", "vars.env", dir.path()),
            ResolutionOutcome::Found("new".to_string())
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            ResolutionOutcome::NoEnvironmentConfigured.to_string(),
            "No environment file configured"
        );
        assert_eq!(
            ResolutionOutcome::EnvironmentFileMissing(PathBuf::from("/ws/vars.env")).to_string(),
            "Environment file not found: /ws/vars.env"
        );
        assert_eq!(
            ResolutionOutcome::NotFound.to_string(),
            "Variable not found in environment file"
        );
    }
}
