use crate::error::{FnkitError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Service plugin identifiers offered when no `services` list is configured.
pub const DEFAULT_SERVICES: &[&str] = &["node", "go", "python", "deno", "bun"];

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PluginConfig / InstanceConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Folder copied into a function directory by `function:attach-action`.
    /// Relative paths resolve against the project root.
    pub action_template: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub name: String,
    /// Key into `plugins`.
    pub plugin: String,
    /// Directory holding the instance's `functions/`, relative to the root.
    pub installation_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default = "default_services")]
    pub services: Vec<String>,
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginConfig>,
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_version() -> u32 {
    1
}

fn default_services() -> Vec<String> {
    DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: default_version(),
            project: ProjectConfig {
                name: project_name.into(),
                description: None,
            },
            services: default_services(),
            plugins: BTreeMap::new(),
            instances: Vec::new(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(FnkitError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self, root: &Path) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Every instance must point at a registered plugin
        for inst in &self.instances {
            if !self.plugins.contains_key(&inst.plugin) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "instance '{}' references unknown plugin '{}'",
                        inst.name, inst.plugin
                    ),
                });
            }
        }

        // 2. Instance names are the prompt labels, so they must be unique
        let mut seen = HashSet::new();
        for inst in &self.instances {
            if !seen.insert(inst.name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate instance name '{}'", inst.name),
                });
            }
        }

        // 3. Services offered in the picker that nothing backs
        for service in &self.services {
            if !self.plugins.contains_key(service) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("service '{service}' has no entry in plugins"),
                });
            }
        }

        // 4. Template folders that are not on disk
        for (name, plugin) in &self.plugins {
            let template = root.join(&plugin.action_template);
            if !template.is_dir() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "plugin '{}' action template not found: {}",
                        name,
                        plugin.action_template.display()
                    ),
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::new("demo");
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.project.name, "demo");
        assert_eq!(loaded.services, default_services());
        assert!(loaded.instances.is_empty());
    }

    #[test]
    fn load_without_config_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(FnkitError::NotInitialized)
        ));
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = r#"
project:
  name: demo
plugins:
  node:
    action_template: templates/node
instances:
  - name: api
    plugin: node
    installation_path: backend/api
"#;
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.services.len(), DEFAULT_SERVICES.len());
        assert_eq!(cfg.instances[0].installation_path, PathBuf::from("backend/api"));
    }

    #[test]
    fn validate_flags_unknown_plugin_and_duplicates() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("templates/node")).unwrap();
        let mut cfg = Config::new("demo");
        cfg.services = vec!["node".into(), "go".into()];
        cfg.plugins.insert(
            "node".into(),
            PluginConfig {
                action_template: PathBuf::from("templates/node"),
            },
        );
        for (name, plugin) in [("api", "node"), ("api", "node"), ("worker", "rust")] {
            cfg.instances.push(InstanceConfig {
                name: name.into(),
                plugin: plugin.into(),
                installation_path: PathBuf::from(name),
            });
        }

        let warnings = cfg.validate(dir.path());
        let errors: Vec<_> = warnings
            .iter()
            .filter(|w| w.level == WarnLevel::Error)
            .collect();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|w| w.message.contains("unknown plugin 'rust'")));
        assert!(errors.iter().any(|w| w.message.contains("duplicate instance name 'api'")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("service 'go'")));
    }

    #[test]
    fn validate_warns_on_missing_template() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::new("demo");
        cfg.services = vec!["node".into()];
        cfg.plugins.insert(
            "node".into(),
            PluginConfig {
                action_template: PathBuf::from("templates/missing"),
            },
        );
        let warnings = cfg.validate(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(warnings[0].message.contains("templates/missing"));
    }
}
