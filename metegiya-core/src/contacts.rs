//! Emergency contact catalog and the user-managed trusted-numbers list.
//!
//! The catalog is fixed: emergency services and diplomatic missions
//! reachable by direct dial. Trusted numbers are the user's own circle —
//! the people an emergency alert is sent to. Every mutation of the trusted
//! list is written straight back to the preference store so the persisted
//! collection always equals the in-memory one.

use crate::error::{Error, Result};
use crate::prefs::{keys, PreferenceStore};
use std::sync::Arc;
use tracing::{debug, info};

/// A fixed catalog entry reachable by direct dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: &'static str,
    pub number: &'static str,
}

/// Emergency services and diplomatic contacts for the UAE.
pub const EMERGENCY_CONTACTS: [EmergencyContact; 4] = [
    EmergencyContact {
        name: "UAE Police",
        number: "999",
    },
    EmergencyContact {
        name: "Labour Office",
        number: "80084",
    },
    EmergencyContact {
        name: "Embassy Dubai",
        number: "+97142699111",
    },
    EmergencyContact {
        name: "Embassy Abu Dhabi",
        number: "+97126655111",
    },
];

/// Look up a catalog contact by name, case-insensitively.
pub fn find_contact(name: &str) -> Option<&'static EmergencyContact> {
    let name = name.trim();
    EMERGENCY_CONTACTS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Trusted phone numbers persisted across runs.
///
/// Set semantics with insertion order preserved: duplicates are rejected as
/// no-ops, removal keeps the relative order of the rest.
#[derive(Debug)]
pub struct TrustedNumbers {
    store: Arc<PreferenceStore>,
    numbers: Vec<String>,
}

impl TrustedNumbers {
    /// Load the trusted list from the store. Missing or corrupt data starts
    /// the list empty.
    pub fn load(store: Arc<PreferenceStore>) -> Self {
        let numbers = store.load(keys::TRUSTED_NUMBERS);
        Self { store, numbers }
    }

    /// Numbers in insertion order.
    pub fn list(&self) -> &[String] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, number: &str) -> bool {
        let number = number.trim();
        self.numbers.iter().any(|n| n == number)
    }

    /// Add a number. Returns `Ok(false)` when it was already present
    /// (no-op, nothing written). Empty input is invalid.
    pub fn add(&mut self, number: &str) -> Result<bool> {
        let number = number.trim();
        if number.is_empty() {
            return Err(Error::InvalidNumber("empty".to_string()));
        }
        if self.contains(number) {
            debug!("Trusted number already present: {}", number);
            return Ok(false);
        }

        self.numbers.push(number.to_string());
        self.store.save(keys::TRUSTED_NUMBERS, &self.numbers)?;
        info!("Added trusted number ({} total)", self.numbers.len());
        Ok(true)
    }

    /// Remove a number. Returns `Ok(false)` when it was not present.
    pub fn remove(&mut self, number: &str) -> Result<bool> {
        let number = number.trim();
        let before = self.numbers.len();
        self.numbers.retain(|n| n != number);
        if self.numbers.len() == before {
            debug!("Trusted number not present: {}", number);
            return Ok(false);
        }

        self.store.save(keys::TRUSTED_NUMBERS, &self.numbers)?;
        info!("Removed trusted number ({} remaining)", self.numbers.len());
        Ok(true)
    }
}
