use serde::{Deserialize, Serialize};

/// One entry of `accounts.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,

    #[serde(default)]
    pub verified_email: String,
}
