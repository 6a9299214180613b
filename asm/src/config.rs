use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compiler::DEFAULT_RAM;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Ram size in words, signature included.
    pub ram: usize,
    /// Output directory name prefix.
    pub prefix: String,
    /// Write `agc.la` and `agc.alias`.
    pub listing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ram: DEFAULT_RAM,
            prefix: "AgcGen".to_string(),
            listing: true,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)
            .map_err(|err| Error::FileOpen(path.display().to_string(), err))?;
        let config: Config = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|err| Error::Config(format!("{}: {}", path.display(), err)))?;
        config.validate()
    }

    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        let config: Config =
            serde_yaml::from_str(text).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, Error> {
        if self.ram == 0 {
            return Err(Error::Config("ram must hold at least the signature word".into()));
        }
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(Error::Config(format!("bad prefix `{}`", self.prefix)));
        }
        Ok(self)
    }
}

/// Band suffix for an output directory, taken from the input file name.
pub fn band(file: &str) -> String {
    let band = if file.contains("hb") {
        "_hb"
    } else if file.contains("lb") {
        "_lb"
    } else {
        "_"
    };
    let bw = ["20", "40", "80"]
        .into_iter()
        .find(|bw| file.contains(&format!("CBW{}", bw)))
        .unwrap_or("");
    format!("{}{}", band, bw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
        let config = Config::from_yaml("ram: 256\nlisting: false").unwrap();
        assert_eq!(config.ram, 256);
        assert_eq!(config.prefix, "AgcGen");
        assert!(!config.listing);
    }

    #[test]
    fn rejects() {
        assert!(matches!(Config::from_yaml("ram: 0"), Err(Error::Config(_))));
        assert!(matches!(Config::from_yaml("rom: 4"), Err(Error::Config(_))));
        assert!(matches!(
            Config::from_yaml("prefix: a/b"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn band_suffix() {
        assert_eq!(band("agc_hb_CBW80.txt"), "_hb80");
        assert_eq!(band("lb_CBW20.fsm"), "_lb20");
        assert_eq!(band("main.fsm"), "_");
        assert_eq!(band("x_CBW40"), "_40");
    }
}
