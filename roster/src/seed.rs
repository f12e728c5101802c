use failure::{format_err, Error};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Activities;

static MERGINGTON: &str = include_str!("../seed/mergington.toml");

/// Initial registry state.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Seed {
    pub activities: Activities,
}

impl Seed {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| format_err!("failed to open seed file {}: {}", path.display(), e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let seed = Self::from_toml(&contents)?;
        info!(
            "loaded {} activities from {}",
            seed.activities.len(),
            path.display()
        );
        Ok(seed)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let seed: Seed = toml::from_str(contents)?;
        seed.check()?;
        Ok(seed)
    }

    /// Built-in Mergington High School activities.
    pub fn mergington() -> Result<Self, Error> {
        Self::from_toml(MERGINGTON)
    }

    fn check(&self) -> Result<(), Error> {
        if self.activities.is_empty() {
            return Err(format_err!("seed contains no activities"));
        }

        for (name, record) in &self.activities {
            if name.is_empty() {
                return Err(format_err!("seed contains an activity with an empty name"));
            }
            if record.participants.iter().any(str::is_empty) {
                return Err(format_err!(
                    "activity {:?} lists an empty participant email",
                    name
                ));
            }
        }

        Ok(())
    }
}
