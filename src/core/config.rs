//! Publisher configuration from YAML

use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::Result;

/// Placeholder replaced by the organization name in the index URL template
pub const ORG_PLACEHOLDER: &str = "{org}";

/// An upload destination: anaconda.org organization plus the env var holding its token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Organization (user) name on anaconda.org
    pub org: String,

    /// Name of the environment variable holding the upload token
    pub token_env: String,
}

/// Top-level publisher configuration
///
/// Every field has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Destination for scheduled (cron) builds
    pub nightly: ChannelConfig,

    /// Destination for every other publishing build
    pub staging: ChannelConfig,

    /// Env var holding the wheel-build flag
    pub build_wheel_env: String,

    /// Env var holding the CI event type
    pub event_type_env: String,

    /// Glob of local files to upload
    pub artifacts: String,

    /// Upload client program followed by any leading arguments
    pub upload_command: Vec<String>,

    /// Command that installs the upload client when it is missing
    pub install_command: Vec<String>,

    /// Browsable index URL, `{org}` is replaced by the organization
    pub index_url_template: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            nightly: ChannelConfig {
                org: "scipy-wheels-nightly".to_string(),
                token_env: "SCIPY_WHEELS_NIGHTLY".to_string(),
            },
            staging: ChannelConfig {
                org: "multibuild-wheels-staging".to_string(),
                token_env: "MULTIBUILD_WHEELS_STAGING_ACCESS".to_string(),
            },
            build_wheel_env: "BUILD_WHEEL".to_string(),
            event_type_env: "TRAVIS_EVENT_TYPE".to_string(),
            artifacts: "wheelhouse/*.whl".to_string(),
            upload_command: vec!["anaconda".to_string()],
            install_command: ["python", "-m", "pip", "install", "anaconda-client"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            index_url_template: format!("https://pypi.anaconda.org/{}/simple", ORG_PLACEHOLDER),
        }
    }
}

impl PublisherConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map
        let config: PublisherConfig = if yaml.trim().is_empty() {
            PublisherConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, channel) in [("nightly", &self.nightly), ("staging", &self.staging)] {
            if channel.org.trim().is_empty() {
                anyhow::bail!("Channel '{}' has an empty org name", name);
            }
            if channel.org.chars().any(char::is_whitespace) {
                anyhow::bail!(
                    "Channel '{}' org name '{}' contains whitespace",
                    name,
                    channel.org
                );
            }
            if channel.token_env.trim().is_empty() {
                anyhow::bail!("Channel '{}' has an empty token_env", name);
            }
        }

        if self.upload_command.is_empty() {
            anyhow::bail!("upload_command must name a program");
        }

        if self.artifacts.trim().is_empty() {
            anyhow::bail!("artifacts pattern must not be empty");
        }

        if !self.index_url_template.contains(ORG_PLACEHOLDER) {
            anyhow::bail!(
                "index_url_template '{}' does not contain {}",
                self.index_url_template,
                ORG_PLACEHOLDER
            );
        }

        Ok(())
    }

    /// Build the browsable index URL for an organization
    pub fn index_url(&self, org: &str) -> String {
        self.index_url_template.replace(ORG_PLACEHOLDER, org)
    }
}
