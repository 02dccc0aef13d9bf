//! Spellbooks
//!
//! Each realm is printed in four books of eight spells; book `n` holds
//! spells `8n..8n+8` of its realm.

use serde::{Deserialize, Serialize};

use super::{AbilitySet, Realm};
use crate::consts::{BOOKS_PER_REALM, SPELLS_PER_BOOK};

/// One book of one realm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spellbook {
    pub realm: Realm,
    /// Book number within the realm (0..4)
    pub sval: u8,
}

impl Spellbook {
    pub const fn new(realm: Realm, sval: u8) -> Self {
        Self { realm, sval }
    }

    /// The four books of a realm, in order
    pub fn all_of(realm: Realm) -> impl Iterator<Item = Spellbook> {
        (0..BOOKS_PER_REALM).map(move |sval| Spellbook::new(realm, sval))
    }

    /// Spells bound into this book
    pub fn spells(&self) -> AbilitySet {
        let first = usize::from(self.sval) * SPELLS_PER_BOOK;
        AbilitySet::range(first, first + SPELLS_PER_BOOK)
    }

    /// Town books are the first two of each realm
    pub const fn is_town_book(&self) -> bool {
        self.sval < 2
    }

    pub fn title(&self) -> &'static str {
        let titles: [&'static str; 4] = match self.realm {
            Realm::Life => [
                "Book of Common Prayers",
                "High Mass",
                "Book of the Unicorn",
                "Blessings of the Grail",
            ],
            Realm::Sorcery => [
                "Magic for Beginners",
                "Conjurings and Tricks",
                "Sorcery and Evocations",
                "Grimoire of Power",
            ],
            Realm::Nature => [
                "Call of the Wild",
                "Nature Mastery",
                "Nature's Gifts",
                "Nature's Wrath",
            ],
            Realm::Chaos => [
                "Sign of Chaos",
                "Chaos Mastery",
                "Chaos Channels",
                "Armageddon Tome",
            ],
            Realm::Death => [
                "Black Prayers",
                "Black Mass",
                "Necronomicon of Geb",
                "Death Mastery",
            ],
            Realm::Arcane => [
                "Cantrips for Beginners",
                "Minor Arcana",
                "Major Arcana",
                "Manual of Mastery",
            ],
            Realm::Daemon => [
                "Dark Incantations",
                "Grimoire of Hell",
                "Tome of the Abyss",
                "Infernal Testament",
            ],
            Realm::Crusade => [
                "Call of the Crusade",
                "Holy Wars",
                "Divine Judgement",
                "Wrath of God",
            ],
            Realm::Music => [
                "Song of the Morning Star",
                "Ballad of Heroes",
                "Lay of the Firmament",
                "Hymn of Ruin",
            ],
        };
        titles[usize::from(self.sval).min(titles.len() - 1)]
    }
}

impl std::fmt::Display for Spellbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ({})", self.title(), self.realm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_spells() {
        let book = Spellbook::new(Realm::Chaos, 2);
        let spells: Vec<_> = book.spells().iter().collect();
        assert_eq!(spells, (16..24).collect::<Vec<_>>());
    }

    #[test]
    fn test_all_of() {
        let books: Vec<_> = Spellbook::all_of(Realm::Life).collect();
        assert_eq!(books.len(), 4);
        assert!(books[1].is_town_book());
        assert!(!books[2].is_town_book());
    }

    #[test]
    fn test_display() {
        let book = Spellbook::new(Realm::Sorcery, 0);
        assert_eq!(book.to_string(), "[Magic for Beginners] (Sorcery)");
    }
}
