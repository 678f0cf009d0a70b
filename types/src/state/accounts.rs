use jr_codec::serde_utils;
use jr_common::{Balance, CoreIndex, Hash32, ServiceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub balance: Balance,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl Account {
    pub fn with_balance(balance: Balance) -> Self {
        Self {
            balance,
            data: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreStatus {
    #[default]
    Available,
    Engaged,
}

/// Registration of an authorization service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Declared program hash; reports against this service must match it.
    #[serde(default, with = "serde_utils::hex_option")]
    pub code_hash: Option<Hash32>,
    pub owner: String,
}

/// The conceptual global state that accumulation executes against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    pub accounts: BTreeMap<String, Account>,
    pub core_status: BTreeMap<CoreIndex, CoreStatus>,
    pub service_registry: BTreeMap<ServiceId, ServiceRecord>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log: String,
}

impl GlobalState {
    pub fn core_is_engaged(&self, core: CoreIndex) -> bool {
        matches!(self.core_status.get(&core), Some(CoreStatus::Engaged))
    }

    pub fn service(&self, id: &str) -> Option<&ServiceRecord> {
        self.service_registry.get(id)
    }

    /// Applies a delta: mentioned sections are replaced or merged, absent
    /// sections are untouched.
    pub fn apply(&mut self, delta: &StateDelta) {
        if let Some(accounts) = &delta.accounts {
            for (id, account) in accounts {
                self.accounts.insert(id.clone(), account.clone());
            }
        }
        if let Some(data) = &delta.data {
            for (key, value) in data {
                self.data.insert(key.clone(), value.clone());
            }
        }
        if let Some(log) = &delta.log {
            if !self.log.is_empty() {
                self.log.push('\n');
            }
            self.log.push_str(log);
        }
    }
}

/// Pure-data output of a work item's execution. Accounts are merged by key
/// (each record replaced whole), the data map is shallow-merged, the log is
/// appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<BTreeMap<String, Account>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_none() && self.data.is_none() && self.log.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_state() -> GlobalState {
        let mut state = GlobalState::default();
        state
            .accounts
            .insert("alice".into(), Account::with_balance(1000));
        state
            .accounts
            .insert("bob".into(), Account::with_balance(500));
        state
    }

    #[test]
    fn delta_replaces_account_records_by_key() {
        let mut state = seeded_state();
        let mut accounts = BTreeMap::new();
        accounts.insert("alice".into(), Account::with_balance(900));
        state.apply(&StateDelta {
            accounts: Some(accounts),
            ..Default::default()
        });
        assert_eq!(state.accounts["alice"].balance, 900);
        assert_eq!(state.accounts["bob"].balance, 500);
    }

    #[test]
    fn delta_merges_data_and_appends_log() {
        let mut state = seeded_state();
        let mut data = BTreeMap::new();
        data.insert("k".into(), "v".into());
        state.apply(&StateDelta {
            data: Some(data),
            log: Some("first".into()),
            ..Default::default()
        });
        state.apply(&StateDelta {
            log: Some("second".into()),
            ..Default::default()
        });
        assert_eq!(state.data["k"], "v");
        assert_eq!(state.log, "first\nsecond");
    }

    #[test]
    fn empty_delta_leaves_state_unchanged() {
        let mut state = seeded_state();
        let before = state.clone();
        state.apply(&StateDelta::default());
        assert_eq!(state, before);
    }

    #[test]
    fn engaged_core_lookup() {
        let mut state = seeded_state();
        state.core_status.insert(3, CoreStatus::Engaged);
        assert!(state.core_is_engaged(3));
        assert!(!state.core_is_engaged(4));
    }
}
