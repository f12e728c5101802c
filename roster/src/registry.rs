use log::{debug, info};

use crate::seed::Seed;
use crate::{Action, Activities, ActivityRecord, ActivityStore, Confirmation, RegistryError};

/// Process-lifetime registry. Restarting resets it to the seed it was built from.
#[derive(Clone, Debug)]
pub struct InMemoryRegistry {
    activities: Activities,
}

impl InMemoryRegistry {
    pub fn new(seed: Seed) -> Self {
        info!("registry initialized with {} activities", seed.activities.len());
        InMemoryRegistry {
            activities: seed.activities,
        }
    }

    fn record_mut(&mut self, activity: &str) -> Result<&mut ActivityRecord, RegistryError> {
        self.activities.get_mut(activity).ok_or_else(|| {
            debug!("unknown activity {:?}", activity);
            RegistryError::NotFound {
                activity: activity.to_owned(),
            }
        })
    }
}

fn check_email(email: &str) -> Result<(), RegistryError> {
    if email.is_empty() {
        debug!("rejected empty participant email");
        return Err(RegistryError::InvalidEmail);
    }
    Ok(())
}

impl ActivityStore for InMemoryRegistry {
    fn list(&self) -> Activities {
        self.activities.clone()
    }

    fn activity(&self, name: &str) -> Result<ActivityRecord, RegistryError> {
        self.activities
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                activity: name.to_owned(),
            })
    }

    fn signup(&mut self, activity: &str, email: &str) -> Result<Confirmation, RegistryError> {
        let record = self.record_mut(activity)?;
        check_email(email)?;

        if !record.participants.insert(email) {
            debug!("{} is already signed up for {:?}", email, activity);
            return Err(RegistryError::DuplicateRegistration {
                activity: activity.to_owned(),
                email: email.to_owned(),
            });
        }

        info!("signed up {} for {:?}", email, activity);
        Ok(Confirmation {
            action: Action::SignedUp,
            activity: activity.to_owned(),
            email: email.to_owned(),
        })
    }

    fn unregister(&mut self, activity: &str, email: &str) -> Result<Confirmation, RegistryError> {
        let record = self.record_mut(activity)?;

        if !record.participants.remove(email) {
            debug!("{} is not signed up for {:?}", email, activity);
            return Err(RegistryError::NotRegistered {
                activity: activity.to_owned(),
                email: email.to_owned(),
            });
        }

        info!("unregistered {} from {:?}", email, activity);
        Ok(Confirmation {
            action: Action::Unregistered,
            activity: activity.to_owned(),
            email: email.to_owned(),
        })
    }
}
