use crate::config::constants::school;
use serde::{Deserialize, Serialize};

/// Identity of the school printed in the document header and signature block
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SchoolProfile {
    #[serde(default = "default_name")]
    pub name: String,

    /// City used in the signature date line
    #[serde(default = "default_city")]
    pub city: String,

    #[serde(default = "default_principal_name")]
    pub principal_name: String,

    #[serde(default = "default_principal_nip")]
    pub principal_nip: String,
}

impl Default for SchoolProfile {
    fn default() -> Self {
        Self {
            name: default_name(),
            city: default_city(),
            principal_name: default_principal_name(),
            principal_nip: default_principal_nip(),
        }
    }
}

fn default_name() -> String {
    school::NAME.to_string()
}
fn default_city() -> String {
    school::CITY.to_string()
}
fn default_principal_name() -> String {
    school::PRINCIPAL_NAME.to_string()
}
fn default_principal_nip() -> String {
    school::PRINCIPAL_NIP.to_string()
}
