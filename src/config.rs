use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".hanliftrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default = "default_checked_attributes")]
    pub checked_attributes: Vec<String>,
    #[serde(default = "default_skip_markers")]
    pub skip_markers: Vec<String>,
    #[serde(default = "default_structural_dirs")]
    pub structural_dirs: Vec<String>,
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
    #[serde(default = "default_store_file_stem")]
    pub store_file_stem: String,
    #[serde(default = "default_store_suffix")]
    pub store_suffix: String,
    #[serde(default = "default_source_root")]
    pub source_root: String,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_extensions() -> Vec<String> {
    vec!["tsx".to_string()]
}

fn default_checked_attributes() -> Vec<String> {
    [
        "title",
        "placeholder",
        "label",
        "description",
        "header",
        "alt",
        "aria-label",
        "buttonText",
        "emptyText",
        "heading",
        "subheading",
    ]
    .map(String::from)
    .to_vec()
}

/// Lines containing any of these substrings are already migrated or are
/// diagnostic text (logging, toasts, thrown errors) and must not be extracted.
fn default_skip_markers() -> Vec<String> {
    [
        "toast.",
        "toast(",
        "console.",
        "throw ",
        "new Error(",
        "logger.",
        "LABELS.",
        "LABELS[",
    ]
    .map(String::from)
    .to_vec()
}

/// Directory names that group files without naming a domain; export names are
/// derived from the nearest ancestor outside this set.
fn default_structural_dirs() -> Vec<String> {
    ["components", "sections", "tabs", "hooks", "editors"]
        .map(String::from)
        .to_vec()
}

fn default_store_dir() -> String {
    "constants".to_string()
}

fn default_store_file_stem() -> String {
    "labels".to_string()
}

fn default_store_suffix() -> String {
    "_LABELS".to_string()
}

fn default_source_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            source_extensions: default_source_extensions(),
            checked_attributes: default_checked_attributes(),
            skip_markers: default_skip_markers(),
            structural_dirs: default_structural_dirs(),
            store_dir: default_store_dir(),
            store_file_stem: default_store_file_stem(),
            store_suffix: default_store_suffix(),
            source_root: default_source_root(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Include patterns without wildcards are treated as literal directory
        // paths, so [locale] (Next.js dynamic route) is valid without escaping.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.includes, vec!["src"]);
        assert_eq!(config.source_extensions, vec!["tsx"]);
        assert!(!config.checked_attributes.is_empty());
        assert_eq!(config.store_dir, "constants");
        assert_eq!(config.store_file_stem, "labels");
        assert_eq!(config.store_suffix, "_LABELS");
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/dist/**"],
              "includes": ["app"],
              "checkedAttributes": ["placeholder"]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.includes, vec!["app"]);
        assert_eq!(config.checked_attributes, vec!["placeholder"]);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "ignores": ["**/dist/**"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.includes, default_includes());
        assert_eq!(config.skip_markers, default_skip_markers());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "storeDir": "shared" }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.store_dir, "shared");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.ignores.is_empty());
        assert_eq!(result.config.includes, default_includes());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()], // unclosed bracket
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_nextjs_locale_pattern_is_valid() {
        // [locale] without wildcards is a literal path, not a glob
        let config = Config {
            includes: vec!["app/[locale]".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["[invalid"] }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }
}
