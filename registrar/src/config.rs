use failure::{format_err, Error};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use roster::Seed;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub seed: SeedSource,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, Error> {
        let config: Config = toml::from_str(contents)?;

        // Check invariants
        Self::check_field_ranges("network.workers", config.network.workers, 1, 64)?;

        Ok(config)
    }

    /// Same as `load`, but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if path.exists() {
            info!("loading config from {}", path.display());
            Self::load(path)
        } else {
            warn!("config {} not found, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Applies `REGISTRAR_ADDR` / `REGISTRAR_SEED` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, Error> {
        let overrides = envy::prefixed("REGISTRAR_").from_env::<Overrides>()?;
        Ok(self.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(addr) = overrides.addr {
            self.network.addr = addr;
        }
        if let Some(path) = overrides.seed {
            self.seed.path = Some(path);
        }
        self
    }

    fn check_field_ranges<T: Ord + Display>(
        name: &str,
        field: T,
        lower: T,
        upper: T,
    ) -> Result<(), Error> {
        if field < lower || field > upper {
            Err(format_err!(
                "value of the field {:?} = {} is out of range {} <= value <= {}",
                name,
                field,
                lower,
                upper
            ))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    #[serde(default = "Network::default_addr")]
    pub addr: String,
    #[serde(default = "Network::default_workers")]
    pub workers: usize,
}

impl Network {
    fn default_addr() -> String {
        "127.0.0.1:8000".into()
    }

    fn default_workers() -> usize {
        2
    }
}

impl Default for Network {
    fn default() -> Self {
        Network {
            addr: Self::default_addr(),
            workers: Self::default_workers(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedSource {
    /// TOML file with the initial activities; built-in Mergington data when unset
    pub path: Option<PathBuf>,
}

impl SeedSource {
    pub fn load(&self) -> Result<Seed, Error> {
        match &self.path {
            Some(path) => Seed::load(path),
            None => {
                info!("using built-in Mergington seed");
                Seed::mergington()
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overrides {
    pub addr: Option<String>,
    pub seed: Option<PathBuf>,
}
