//! Game options and configuration
//!
//! Options are read from an rc file of `OPTIONS=` lines:
//!
//! ```text
//! # arcana configuration
//! OPTIONS=use_menu,!always_show_list
//! OPTIONS=over_exert
//! OPTIONS=class:Mage,realm1:Chaos
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::magic::Realm;
use crate::player::{Class, Race};

/// User-configurable options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Cursor-driven menus instead of letter prompts
    pub use_menu: bool,
    /// Show the candidate list as soon as a selector opens
    pub always_show_list: bool,
    /// Allow casting without enough mana after confirmation
    pub over_exert: bool,
    /// Discard typeahead when a cast fails
    pub flush_failure: bool,

    // Character defaults for new games
    pub name: Option<String>,
    pub class: Option<Class>,
    pub race: Option<Race>,
    pub realm1: Option<Realm>,
    pub realm2: Option<Realm>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            use_menu: false,
            always_show_list: false,
            over_exert: false,
            flush_failure: true,
            name: None,
            class: None,
            race: None,
            realm1: None,
            realm2: None,
        }
    }
}

impl Options {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }

        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "use_menu" => self.use_menu = value,
            "always_show_list" => self.always_show_list = value,
            "over_exert" => self.over_exert = value,
            "flush_failure" => self.flush_failure = value,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        if value.is_empty() {
            return Err(OptionsError::MissingValue(name.to_string()));
        }
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "name" => self.name = Some(value.to_string()),
            "class" => self.class = Some(value.parse().map_err(|_| invalid())?),
            "race" => self.race = Some(value.parse().map_err(|_| invalid())?),
            "realm1" => self.realm1 = Some(value.parse().map_err(|_| invalid())?),
            "realm2" => self.realm2 = Some(value.parse().map_err(|_| invalid())?),
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string())?;
        Ok(())
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        fn flag(name: &str, on: bool) -> String {
            if on {
                format!("OPTIONS={}", name)
            } else {
                format!("OPTIONS=!{}", name)
            }
        }

        let mut lines = vec!["# arcana configuration".to_string(), String::new()];
        lines.push(flag("use_menu", self.use_menu));
        lines.push(flag("always_show_list", self.always_show_list));
        lines.push(flag("over_exert", self.over_exert));
        lines.push(flag("flush_failure", self.flush_failure));

        if let Some(ref name) = self.name {
            lines.push(format!("OPTIONS=name:{}", name));
        }
        if let Some(class) = self.class {
            lines.push(format!("OPTIONS=class:{:?}", class));
        }
        if let Some(race) = self.race {
            lines.push(format!("OPTIONS=race:{:?}", race));
        }
        if let Some(realm) = self.realm1 {
            lines.push(format!("OPTIONS=realm1:{}", realm));
        }
        if let Some(realm) = self.realm2 {
            lines.push(format!("OPTIONS=realm2:{}", realm));
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Errors raised while loading options
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),
    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}
