//! Service plugins and their instances, resolved from the project config.
//!
//! A plugin owns an action template folder; an instance owns an installation
//! directory and remembers which plugin created it, which is how the
//! attach-action workflow finds the template to copy.

use crate::config::Config;
use crate::error::{FnkitError, Result};
use std::path::{Path, PathBuf};

/// What the workflows need to know about a service instance.
pub trait Instance {
    fn name(&self) -> &str;

    /// Name of the plugin that created this instance.
    fn plugin_name(&self) -> &str;

    /// Directory holding `functions/`, relative to the project root.
    fn installation_path(&self) -> &Path;

    /// Action template folder of the originating plugin.
    fn action_template_path(&self) -> &Path;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServicePlugin {
    pub name: String,
    pub action_template: PathBuf,
    instances: Vec<String>,
}

impl ServicePlugin {
    /// Names of the instances this plugin created.
    pub fn instances(&self) -> &[String] {
        &self.instances
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInstance {
    pub name: String,
    pub plugin: String,
    pub installation_path: PathBuf,
    action_template: PathBuf,
}

impl Instance for ServiceInstance {
    fn name(&self) -> &str {
        &self.name
    }

    fn plugin_name(&self) -> &str {
        &self.plugin
    }

    fn installation_path(&self) -> &Path {
        &self.installation_path
    }

    fn action_template_path(&self) -> &Path {
        &self.action_template
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    plugins: Vec<ServicePlugin>,
    instances: Vec<ServiceInstance>,
}

impl Registry {
    /// Build the registry from `config`. Template paths are resolved against
    /// `root`. An instance naming an unregistered plugin is an error.
    pub fn from_config(root: &Path, config: &Config) -> Result<Self> {
        let mut plugins: Vec<ServicePlugin> = config
            .plugins
            .iter()
            .map(|(name, p)| ServicePlugin {
                name: name.clone(),
                action_template: root.join(&p.action_template),
                instances: Vec::new(),
            })
            .collect();

        let mut instances = Vec::with_capacity(config.instances.len());
        for inst in &config.instances {
            let plugin = plugins
                .iter_mut()
                .find(|p| p.name == inst.plugin)
                .ok_or_else(|| FnkitError::PluginNotFound(inst.plugin.clone()))?;
            plugin.instances.push(inst.name.clone());
            instances.push(ServiceInstance {
                name: inst.name.clone(),
                plugin: inst.plugin.clone(),
                installation_path: inst.installation_path.clone(),
                action_template: plugin.action_template.clone(),
            });
        }

        Ok(Self { plugins, instances })
    }

    pub fn load(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        Self::from_config(root, &config)
    }

    pub fn plugin_by_name(&self, name: &str) -> Option<&ServicePlugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Every instance in the project, across all plugins.
    pub fn instances(&self) -> &[ServiceInstance] {
        &self.instances
    }

    pub fn instance_by_name(&self, name: &str) -> Option<&ServiceInstance> {
        self.instances.iter().find(|i| i.name == name)
    }
}
