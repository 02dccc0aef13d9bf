//! arcana-save: Save/restore of arcana characters
//!
//! A save file is one JSON document: a header carrying a magic string and
//! format version, then the character, the turn count, the RNG seed and
//! stream position, and the repeat buffer.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use arcana_core::GameState;
use arcana_core::player::Actor;
use arcana_core::world::RepeatBuffer;
use arcana_rng::GameRng;

/// Current save file format version
pub const SAVE_VERSION: u32 = 2;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    pub player_name: String,
    /// Turn count at save time
    pub turns: u64,
    pub level: i32,
    /// Seconds since the epoch
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "ARCS";

    pub fn new(state: &GameState) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            player_name: state.actor.name.clone(),
            turns: state.turns,
            level: state.actor.level,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Persistent part of a game. The RNG carries its stream position, so
/// draws after a reload continue where the saved game stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub actor: Actor,
    pub turns: u64,
    pub rng: GameRng,
    #[serde(default)]
    pub repeat: RepeatBuffer,
}

impl SavedGame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            actor: state.actor.clone(),
            turns: state.turns,
            rng: state.rng.clone(),
            repeat: state.repeat.clone(),
        }
    }

    /// Rebuild a game with the built-in catalog and powers
    pub fn into_state(self) -> GameState {
        let mut state = GameState::new(self.actor, self.rng);
        state.turns = self.turns;
        state.repeat = self.repeat;
        state
    }
}

/// Complete save file structure
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub game: SavedGame,
}

/// Save game state to a file
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let save_file = SaveFile {
        header: SaveHeader::new(state),
        game: SavedGame::capture(state),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &save_file)?;
    tracing::info!(path = %path.display(), "game saved");
    Ok(())
}

/// Load game state from a file
pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let save_file: SaveFile = serde_json::from_reader(BufReader::new(file))?;
    save_file.header.validate()?;
    tracing::info!(path = %path.display(), "game loaded");
    Ok(save_file.game.into_state())
}

/// Resume the game saved at `path`, if there is one. A save that exists but
/// cannot be read is reported and left where it is.
pub fn resume_game(path: impl AsRef<Path>) -> Result<Option<GameState>, SaveError> {
    let path = path.as_ref();
    if !save_exists(path) {
        return Ok(None);
    }
    load_game(path).map(Some).inspect_err(|err| {
        tracing::warn!(path = %path.display(), %err, "save file could not be read");
    })
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Directory holding save files
pub fn save_directory() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("arcana");
    path.push("saves");
    path
}

/// Get the default save path for a player name
pub fn default_save_path(player_name: &str) -> Result<PathBuf, SaveError> {
    let mut path = save_directory();
    std::fs::create_dir_all(&path)?;
    path.push(format!("{}.json", player_name));
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::magic::{Realm, RealmSlot, Spellbook};
    use arcana_core::player::{Class, Race};
    use arcana_core::world::RepeatedCommand;
    use arcana_rng::RandomSource;

    fn test_state() -> GameState {
        let mut actor = Actor::new("Saver", Class::Mage, Race::Elf);
        actor.realm1 = Some(Realm::Chaos);
        actor.set_level(12);
        actor.spells.learn(RealmSlot::Primary, 3);
        let mut state = GameState::new(actor, GameRng::new(42));
        state.turns = 77;
        state.repeat.begin(RepeatedCommand::Cast {
            book: Spellbook::new(Realm::Chaos, 0),
        });
        state.repeat.push(3);
        state
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("arcana_test_save.json");
        let mut state = test_state();
        for _ in 0..5 {
            state.rng.randint0(100);
        }
        save_game(&state, &path).unwrap();
        assert!(save_exists(&path));

        let mut loaded = load_game(&path).unwrap();
        assert_eq!(loaded.actor, state.actor);
        assert_eq!(loaded.turns, 77);
        assert_eq!(loaded.rng.seed(), 42);
        for _ in 0..10 {
            assert_eq!(loaded.rng.randint0(100), state.rng.randint0(100));
        }
        assert_eq!(loaded.repeat.last_code(), Some(3));

        delete_save(&path).unwrap();
        assert!(!save_exists(&path));
    }

    #[test]
    fn test_header_validation() {
        let header = SaveHeader::new(&test_state());
        assert!(header.validate().is_ok());

        let mut bad_header = header.clone();
        bad_header.magic = "XXXX".to_string();
        assert!(matches!(
            bad_header.validate(),
            Err(SaveError::InvalidHeader)
        ));

        let mut old_header = header;
        old_header.version = 999;
        assert!(matches!(
            old_header.validate(),
            Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: 999
            })
        ));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_game("/nonexistent/path/save.json");
        assert!(matches!(result, Err(SaveError::NotFound)));
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        let path = std::env::temp_dir().join("arcana_test_garbage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_game(&path),
            Err(SaveError::Serialization(_))
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resume_without_save_starts_fresh() {
        let path = std::env::temp_dir().join("arcana_test_resume_missing.json");
        std::fs::remove_file(&path).ok();
        assert!(resume_game(&path).unwrap().is_none());
    }

    #[test]
    fn test_resume_keeps_unreadable_save() {
        let path = std::env::temp_dir().join("arcana_test_resume_corrupt.json");
        std::fs::write(&path, "{\"header\": 12").unwrap();
        assert!(matches!(
            resume_game(&path),
            Err(SaveError::Serialization(_))
        ));
        assert!(save_exists(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"header\": 12");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resume_keeps_save_from_other_version() {
        let path = std::env::temp_dir().join("arcana_test_resume_version.json");
        save_game(&test_state(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        doc["header"]["version"] = serde_json::json!(SAVE_VERSION + 1);
        std::fs::write(&path, doc.to_string()).unwrap();

        assert!(matches!(
            resume_game(&path),
            Err(SaveError::IncompatibleVersion { .. })
        ));
        assert!(save_exists(&path));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_resume_loads_good_save() {
        let path = std::env::temp_dir().join("arcana_test_resume_good.json");
        save_game(&test_state(), &path).unwrap();
        let state = resume_game(&path).unwrap().unwrap();
        assert_eq!(state.actor.name, "Saver");
        std::fs::remove_file(&path).ok();
    }
}
