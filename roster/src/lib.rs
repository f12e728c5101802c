mod registry;
mod seed;

pub use crate::registry::InMemoryRegistry;
pub use crate::seed::Seed;

use failure::Fail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Full registry listing, keyed by activity name.
pub type Activities = BTreeMap<String, ActivityRecord>;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String,
    /// Advertised capacity. Informational only, signups do not check it.
    pub max_participants: u32,
    #[serde(default)]
    pub participants: ParticipantSet,
}

impl ActivityRecord {
    pub fn spots_left(&self) -> u32 {
        let taken = self.participants.len() as u32;
        self.max_participants.saturating_sub(taken)
    }
}

/// Duplicate-free list of participant emails.
///
/// Keeps insertion order so listings are stable, but membership is what
/// matters: use `same_members` rather than `==` when order is irrelevant.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ParticipantSet(Vec<String>);

impl ParticipantSet {
    pub fn new() -> Self {
        ParticipantSet(Vec::new())
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.iter().any(|p| p == email)
    }

    /// Returns false if the email was already present.
    pub fn insert(&mut self, email: &str) -> bool {
        if self.contains(email) {
            return false;
        }
        self.0.push(email.to_owned());
        true
    }

    /// Returns false if the email was not present.
    pub fn remove(&mut self, email: &str) -> bool {
        match self.0.iter().position(|p| p == email) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn same_members(&self, other: &ParticipantSet) -> bool {
        self.len() == other.len() && self.iter().all(|p| other.contains(p))
    }
}

impl From<Vec<String>> for ParticipantSet {
    fn from(emails: Vec<String>) -> Self {
        let mut set = ParticipantSet::new();
        for email in &emails {
            set.insert(email);
        }
        set
    }
}

impl From<ParticipantSet> for Vec<String> {
    fn from(set: ParticipantSet) -> Self {
        set.0
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    SignedUp,
    Unregistered,
}

/// Successful mutation receipt.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub action: Action,
    pub activity: String,
    pub email: String,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.action {
            Action::SignedUp => write!(f, "Signed up {} for {}", self.email, self.activity),
            Action::Unregistered => write!(f, "Unregistered {} from {}", self.email, self.activity),
        }
    }
}

/// Caller errors. None of these leave the registry modified.
#[derive(Clone, Debug, Eq, PartialEq, Fail)]
pub enum RegistryError {
    #[fail(display = "Activity not found")]
    NotFound { activity: String },
    #[fail(display = "Student is already signed up for this activity")]
    DuplicateRegistration { activity: String, email: String },
    #[fail(display = "Student is not signed up for this activity")]
    NotRegistered { activity: String, email: String },
    #[fail(display = "participant email must not be empty")]
    InvalidEmail,
}

pub trait ActivityStore {
    fn list(&self) -> Activities;
    fn activity(&self, name: &str) -> Result<ActivityRecord, RegistryError>;
    fn signup(&mut self, activity: &str, email: &str) -> Result<Confirmation, RegistryError>;
    fn unregister(&mut self, activity: &str, email: &str) -> Result<Confirmation, RegistryError>;
}
