//! Seeding the process environment from a local `.env` file.
//!
//! Variables that are already set in the process environment always win over
//! the file. A missing file is not an error: production deployments inject
//! their variables directly and ship no `.env`.
//!
//! Parse errors never include the offending line, since it may hold a secret.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ConfigError;

/// Conventional file name for local environment definitions.
pub const DOTENV_FILENAME: &str = ".env";

/// Load `.env` from the current directory or the nearest ancestor that has one.
///
/// Returns the path of the file that was loaded, or `None` if no file was found.
///
/// # Errors
/// Returns `ConfigError::Dotenv` if the file cannot be parsed and
/// `ConfigError::DotenvIo` if it cannot be read.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    let cwd = std::env::current_dir().map_err(|source| ConfigError::DotenvIo {
        path: PathBuf::from(DOTENV_FILENAME),
        source,
    })?;

    match find_dotenv(&cwd) {
        Some(path) => Ok(load_dotenv_from(&path)?.then_some(path)),
        None => {
            debug!(start = %cwd.display(), "No .env file found");
            Ok(None)
        }
    }
}

/// Load the given file into the process environment.
///
/// The whole file is parsed before anything is exported, so a malformed file
/// leaves the environment untouched. When a key appears more than once the
/// first occurrence wins.
///
/// Returns `false` if the file does not exist.
///
/// # Errors
/// Returns `ConfigError::Dotenv` if the file cannot be parsed and
/// `ConfigError::DotenvIo` if it exists but cannot be read.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Environment file not present, skipping");
            return Ok(false);
        }
        Err(source) => {
            return Err(ConfigError::DotenvIo {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let entries = parse_entries(path, &contents)?;

    let mut exported = 0usize;
    for (key, value) in entries {
        if std::env::var_os(&key).is_some() {
            continue;
        }
        // SAFETY: seeding runs at startup, before any other thread reads the environment.
        unsafe { std::env::set_var(&key, value) };
        exported += 1;
    }

    info!(path = %path.display(), exported, "Loaded environment from file");
    Ok(true)
}

fn parse_entries(path: &Path, contents: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

    let mut entries = Vec::new();
    for item in dotenvy::Iter::new(contents.as_bytes()) {
        match item {
            Ok(entry) => entries.push(entry),
            Err(dotenvy::Error::LineParse(text, column)) => {
                return Err(ConfigError::Dotenv {
                    path: path.to_path_buf(),
                    line: line_of(contents, entries.len(), &text),
                    column,
                });
            }
            Err(dotenvy::Error::Io(source)) => {
                return Err(ConfigError::DotenvIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
            Err(other) => {
                return Err(ConfigError::DotenvIo {
                    path: path.to_path_buf(),
                    source: io::Error::other(other.to_string()),
                });
            }
        }
    }
    Ok(entries)
}

/// 1-based line of the entry that failed to parse.
///
/// Skips the `parsed` entries before it, then looks for the first line of the
/// reported `text`, which is either the whole entry or just its value.
fn line_of(contents: &str, parsed: usize, text: &str) -> usize {
    let lines: Vec<&str> = contents.lines().collect();
    let start = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .nth(parsed)
        .map_or(0, |(index, _)| index);

    let needle = text.lines().next().unwrap_or_default();
    lines[start..]
        .iter()
        .position(|line| line.contains(needle))
        .map_or(start + 1, |offset| start + offset + 1)
}

/// Walk from `start` up to the filesystem root looking for a `.env` file.
pub fn find_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DOTENV_FILENAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;
    use crate::test_util::capture_logs;

    #[test]
    fn test_find_dotenv_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();

        assert_eq!(find_dotenv(dir.path()), Some(dir.path().join(".env")));
    }

    #[test]
    fn test_find_dotenv_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("backend").join("core");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".env"), "A=1\n").unwrap();

        assert_eq!(find_dotenv(&nested), Some(dir.path().join(".env")));
    }

    #[test]
    fn test_find_dotenv_prefers_nearest() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("service");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".env"), "A=outer\n").unwrap();
        fs::write(nested.join(".env"), "A=inner\n").unwrap();

        assert_eq!(find_dotenv(&nested), Some(nested.join(".env")));
    }

    #[test]
    fn test_find_dotenv_ignores_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".env")).unwrap();

        assert_ne!(find_dotenv(dir.path()), Some(dir.path().join(".env")));
    }

    #[test]
    #[serial]
    fn test_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let result = load_dotenv_from(dir.path().join(".env"));
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    #[serial]
    fn test_file_values_are_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "# local overrides\nLEXAI_DOTENV_UNIT_A=from-file\n").unwrap();

        temp_env::with_var_unset("LEXAI_DOTENV_UNIT_A", || {
            assert!(load_dotenv_from(&path).unwrap());
            assert_eq!(
                std::env::var("LEXAI_DOTENV_UNIT_A").as_deref(),
                Ok("from-file")
            );
        });
    }

    #[test]
    #[serial]
    fn test_existing_values_are_not_overridden() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "LEXAI_DOTENV_UNIT_B=from-file\n").unwrap();

        temp_env::with_var("LEXAI_DOTENV_UNIT_B", Some("from-process"), || {
            assert!(load_dotenv_from(&path).unwrap());
            assert_eq!(
                std::env::var("LEXAI_DOTENV_UNIT_B").as_deref(),
                Ok("from-process")
            );
        });
    }

    #[test]
    #[serial]
    fn test_parse_error_does_not_leak_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "GEMINI_API_KEY super-secret-value\n").unwrap();

        let err = load_dotenv_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Dotenv { .. }));

        let msg = err.to_string();
        assert!(msg.contains(".env"), "Should name the file: {}", msg);
        assert!(!msg.contains("super-secret-value"), "Leaked secret: {}", msg);
    }

    #[test]
    #[serial]
    fn test_parse_error_leaves_environment_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "LEXAI_DOTENV_UNIT_C=from-file\nnot a valid line\n").unwrap();

        temp_env::with_var_unset("LEXAI_DOTENV_UNIT_C", || {
            let err = load_dotenv_from(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Dotenv { line: 2, .. }), "got: {:?}", err);
            assert!(std::env::var_os("LEXAI_DOTENV_UNIT_C").is_none());
        });
    }

    #[test]
    fn test_parse_error_reports_physical_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# local overrides\nPROJECT_ID=proj-1\n\nBUCKET_NAME=bkt-1\nGEMINI_API_KEY AIza-hidden\n",
        )
        .unwrap();

        let err = load_dotenv_from(&path).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, ConfigError::Dotenv { line: 5, .. }), "got: {:?}", err);
        assert!(msg.contains("line 5"), "got: {}", msg);
        assert!(!msg.contains("AIza-hidden"), "Leaked secret: {}", msg);
    }

    #[test]
    #[serial]
    fn test_first_occurrence_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "LEXAI_DOTENV_UNIT_D=first\nLEXAI_DOTENV_UNIT_D=second\n").unwrap();

        temp_env::with_var_unset("LEXAI_DOTENV_UNIT_D", || {
            assert!(load_dotenv_from(&path).unwrap());
            assert_eq!(std::env::var("LEXAI_DOTENV_UNIT_D").as_deref(), Ok("first"));
        });
    }

    #[test]
    #[serial]
    fn test_byte_order_mark_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "\u{feff}LEXAI_DOTENV_UNIT_E=from-file\n").unwrap();

        temp_env::with_var_unset("LEXAI_DOTENV_UNIT_E", || {
            assert!(load_dotenv_from(&path).unwrap());
            assert_eq!(std::env::var("LEXAI_DOTENV_UNIT_E").as_deref(), Ok("from-file"));
        });
    }

    #[test]
    fn test_line_of() {
        let contents = "# header\nA=1\n\nAB=2\n  bad\nC=v w\n";
        assert_eq!(line_of(contents, 0, "A=1"), 2);
        assert_eq!(line_of(contents, 2, "  bad"), 5);
        assert_eq!(line_of(contents, 3, "v w"), 6);
    }

    #[test]
    fn test_value_parse_error_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "PROJECT_ID=proj-1\n\nBUCKET_NAME=bkt 1\n").unwrap();

        let err = load_dotenv_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Dotenv { line: 3, .. }), "got: {:?}", err);
        assert!(!err.to_string().contains("bkt 1"));
    }

    #[test]
    #[serial]
    fn test_loading_logs_path_at_info() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "LEXAI_DOTENV_UNIT_F=hidden-file-value\n").unwrap();

        temp_env::with_var_unset("LEXAI_DOTENV_UNIT_F", || {
            let (loaded, logs) = capture_logs(|| load_dotenv_from(&path));
            assert!(loaded.unwrap());
            assert!(
                logs.lines()
                    .any(|l| l.contains("INFO") && l.contains("Loaded environment from file")),
                "got: {}",
                logs
            );
            assert!(!logs.contains("hidden-file-value"), "got: {}", logs);
        });
    }
}
