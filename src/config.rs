// Keyslot: Record configuration
//
// Names the single record the accessor manages. Host applications can embed
// this in their own config files; every field has a default.

use serde::{Deserialize, Serialize};

use crate::backend::RecordId;

/// Default service name used to identify the record in the platform keyring.
pub const DEFAULT_SERVICE: &str = "keyslot";

/// Default account name for the record.
pub const DEFAULT_ACCOUNT: &str = "generic-record";

pub const SERVICE_ENV: &str = "KEYSLOT_SERVICE";
pub const ACCOUNT_ENV: &str = "KEYSLOT_ACCOUNT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    pub service: String,
    pub account: String,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            account: DEFAULT_ACCOUNT.to_string(),
        }
    }
}

impl RecordConfig {
    /// Creates a config with custom service/account names (useful for test isolation).
    pub fn with_names(service: &str, account: &str) -> Self {
        Self {
            service: service.to_string(),
            account: account.to_string(),
        }
    }

    /// Apply `KEYSLOT_SERVICE` / `KEYSLOT_ACCOUNT` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(service) = lookup(SERVICE_ENV).filter(|s| !s.trim().is_empty()) {
            self.service = service;
        }
        if let Some(account) = lookup(ACCOUNT_ENV).filter(|s| !s.trim().is_empty()) {
            self.account = account;
        }
        self
    }

    pub fn record_id(&self) -> RecordId {
        RecordId::new(&self.service, &self.account)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let config = RecordConfig::default();
        assert_eq!(config.service, DEFAULT_SERVICE);
        assert_eq!(config.account, DEFAULT_ACCOUNT);
        assert_eq!(config.record_id(), RecordId::new("keyslot", "generic-record"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: RecordConfig =
            serde_json::from_str(r#"{"service": "com.example.app"}"#).unwrap();
        assert_eq!(config.service, "com.example.app");
        assert_eq!(config.account, DEFAULT_ACCOUNT);
    }

    #[test]
    fn test_overrides_replace_names() {
        let config = RecordConfig::default().with_overrides(|name| match name {
            SERVICE_ENV => Some("svc".to_string()),
            ACCOUNT_ENV => Some("acct".to_string()),
            _ => None,
        });
        assert_eq!(config, RecordConfig::with_names("svc", "acct"));
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = RecordConfig::with_names("svc", "acct").with_overrides(|name| match name {
            SERVICE_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config, RecordConfig::with_names("svc", "acct"));
    }
}
