//! Premium upgrade messaging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Settings for the upgrade offer returned to under-entitled callers
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumConfig {
    /// Where the client can learn about upgrading
    #[serde(default = "default_upgrade_url")]
    pub upgrade_url: String,

    /// Invitation text shown alongside the upgrade link
    #[serde(default = "default_upgrade_message")]
    pub upgrade_message: String,

    /// Include feature details and upgrade info in upgrade offers.
    /// Off keeps the body to the bare message.
    #[serde(default)]
    pub detailed_upgrade_info: bool,
}

impl PremiumConfig {
    /// Validate premium configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upgrade_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PREMIUM__UPGRADE_URL"));
        }
        Ok(())
    }
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            upgrade_url: default_upgrade_url(),
            upgrade_message: default_upgrade_message(),
            detailed_upgrade_info: false,
        }
    }
}

fn default_upgrade_url() -> String {
    "/premium/learn-more".to_string()
}

fn default_upgrade_message() -> String {
    "Enhance your prayer journey".to_string()
}
