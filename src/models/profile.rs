use serde::{Deserialize, Serialize};

/// Subset of `/api/profile/` the storefront uses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub date_format: Option<String>,
    /// Dark theme flag; not used by the terminal client
    #[serde(default)]
    pub theme: Option<bool>,
}
