//! Engine constants
//!
//! Limits and thresholds shared by the selector, the resolver and the
//! proficiency rules.

/// Maximum character level
pub const PY_MAX_LEVEL: i32 = 50;

/// Number of spells in one realm
pub const SPELLS_PER_REALM: usize = 32;

/// Spells bound into one book
pub const SPELLS_PER_BOOK: usize = 8;

/// Books printed for each realm
pub const BOOKS_PER_REALM: u8 = 4;

/// Candidate lists hold at most a-z plus 0-9
pub const MAX_CANDIDATES: usize = 36;

/// Rows per column in the two-column power list
pub const MENU_COLUMN_ROWS: usize = 18;

/// Spell level marking a slot the class can never use
pub const SPELL_LEVEL_NEVER: i32 = 99;

/// Proficiency experience thresholds
pub const SPELL_EXP_UNSKILLED: i16 = 0;
pub const SPELL_EXP_BEGINNER: i16 = 900;
pub const SPELL_EXP_SKILLED: i16 = 1200;
pub const SPELL_EXP_EXPERT: i16 = 1400;
pub const SPELL_EXP_MASTER: i16 = 1600;

/// Mana formula constants
pub const MANA_CONST: i32 = 2400;
pub const MANA_DIV: i32 = 4;
pub const DEC_MANA_DIV: i32 = 3;

/// Energy used by a full action
pub const ENERGY_FULL_TURN: i32 = 100;

/// Highest failure chance any spell can reach
pub const MAX_FAIL_CHANCE: i32 = 95;

/// Bounds of a virtue counter
pub const VIRTUE_MAX: i16 = 1000;

/// Stat values are stored as 3..=18 then 18/10 = 28 ... 18/220 = 238
pub const STAT_MIN: i16 = 3;
pub const STAT_MAX: i16 = 18 + 220;
