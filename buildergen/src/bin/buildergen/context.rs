use anyhow::{Context, Result};
use buildergen_build::SetterStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "buildergen.toml";

/// Project context for buildergen operations
pub struct ProjectContext {
    /// Root directory of the project (where Cargo.toml is)
    pub project_root: PathBuf,
    pub config_path: PathBuf,
    /// Loaded configuration, if `buildergen.toml` exists
    pub config: Option<BuildergenConfig>,
}

/// Configuration stored in buildergen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildergenConfig {
    #[serde(default)]
    pub generate: GenerateSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSettings {
    /// Source roots, relative to the project root
    #[serde(default = "default_scan_paths")]
    pub scan_paths: Vec<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_crate_root")]
    pub crate_root: String,
    /// `snake` or `camel`
    #[serde(default = "default_setter_style")]
    pub setter_style: String,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            scan_paths: default_scan_paths(),
            output_dir: default_output_dir(),
            crate_root: default_crate_root(),
            setter_style: default_setter_style(),
        }
    }
}

fn default_scan_paths() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_output_dir() -> String {
    "target/buildergen".to_string()
}

fn default_crate_root() -> String {
    "crate".to_string()
}

fn default_setter_style() -> String {
    "snake".to_string()
}

impl GenerateSettings {
    pub fn setter_style(&self) -> Result<SetterStyle> {
        self.setter_style
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid setter_style in {CONFIG_FILE}"))
    }
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory
    pub fn find_from(start: &Path) -> Result<Self> {
        let project_root = Self::find_project_root(start)?;
        Self::from_root(project_root)
    }

    /// Create context from a known project root
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: BuildergenConfig =
                toml::from_str(&content).with_context(|| format!("Failed to parse {}", config_path.display()))?;
            Some(config)
        } else {
            None
        };

        Ok(Self {
            project_root,
            config_path,
            config,
        })
    }

    /// Find project root by looking for Cargo.toml
    fn find_project_root(start: &Path) -> Result<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join("Cargo.toml").exists() {
                return Ok(current);
            }

            if !current.pop() {
                anyhow::bail!(
                    "Could not find Cargo.toml in {start:?} or any parent directory. \
                     Are you in a Rust project?"
                );
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.config_path.exists()
    }

    /// Settings from buildergen.toml, or the defaults.
    pub fn settings(&self) -> GenerateSettings {
        self.config
            .as_ref()
            .map(|config| config.generate.clone())
            .unwrap_or_default()
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuildergenConfig::default();
        assert_eq!(config.generate.scan_paths, ["src"]);
        assert_eq!(config.generate.output_dir, "target/buildergen");
        assert_eq!(config.generate.crate_root, "crate");
        assert_eq!(config.generate.setter_style().unwrap(), SetterStyle::Snake);
    }

    #[test]
    fn test_config_serialization() {
        let config = BuildergenConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[generate]"));
        assert!(toml_str.contains("scan_paths"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BuildergenConfig = toml::from_str("[generate]\nsetter_style = \"camel\"\n").unwrap();
        assert_eq!(config.generate.setter_style().unwrap(), SetterStyle::Camel);
        assert_eq!(config.generate.crate_root, "crate");

        let bad: BuildergenConfig = toml::from_str("[generate]\nsetter_style = \"kebab\"\n").unwrap();
        assert!(bad.generate.setter_style().is_err());
    }

    #[test]
    fn test_find_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[generate]\ncrate_root = \"demo\"\n").unwrap();
        let nested = dir.path().join("src").join("geometry");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = ProjectContext::find_from(&nested).unwrap();
        assert_eq!(ctx.project_root, dir.path());
        assert!(ctx.is_initialized());
        assert_eq!(ctx.settings().crate_root, "demo");
    }
}
