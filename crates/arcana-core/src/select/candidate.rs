//! Candidates and candidate lists
//!
//! A [`CandidateList`] is rebuilt for every command from a spellbook or from
//! the character's innate powers. Position in the list is what the player
//! types: `a`-`z` for the first 26 entries, then `0`-`9`.

use std::ops::Index;

use crate::consts::MAX_CANDIDATES;
use crate::magic::Realm;
use crate::player::Mutations;
use crate::racial::Power;

/// Where a candidate comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Spell { realm: Realm, spell: usize },
    Racial { power: Power },
    Mutation { mutation: Mutations },
}

/// One selectable entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Index within the source table (spell number, power number)
    pub id: usize,
    pub name: String,
    pub min_level: i32,
    pub cost: i32,
    /// Failure chance in percent
    pub fail: i32,
    /// Whether the candidate may be chosen right now
    pub eligible: bool,
    /// Short remark shown in the list ("untried", "Expert", ...)
    pub note: Option<String>,
    pub source: CandidateSource,
}

/// Ordered candidates of one command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    items: Vec<Candidate>,
}

impl CandidateList {
    /// Build a list, dropping anything past the 36th entry
    pub fn new(mut items: Vec<Candidate>) -> Self {
        if items.len() > MAX_CANDIDATES {
            tracing::warn!(
                count = items.len(),
                max = MAX_CANDIDATES,
                "candidate list truncated"
            );
            items.truncate(MAX_CANDIDATES);
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.items.iter()
    }

    pub fn eligible_count(&self) -> usize {
        self.items.iter().filter(|c| c.eligible).count()
    }

    pub fn has_eligible(&self) -> bool {
        self.items.iter().any(|c| c.eligible)
    }

    /// Whether `index` names an eligible entry of this list
    pub fn is_selectable(&self, index: usize) -> bool {
        self.get(index).is_some_and(|c| c.eligible)
    }

    /// Key range shown in prompts, e.g. `a-h` or `a-2`
    pub fn key_range(&self) -> String {
        let last = self.len().saturating_sub(1);
        format!("{}-{}", letter_for(0), letter_for(last))
    }
}

impl Index<usize> for CandidateList {
    type Output = Candidate;

    fn index(&self, index: usize) -> &Candidate {
        &self.items[index]
    }
}

impl FromIterator<Candidate> for CandidateList {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Key bound to a list position
pub fn letter_for(index: usize) -> char {
    match index {
        0..=25 => (b'a' + index as u8) as char,
        26..=35 => (b'0' + (index - 26) as u8) as char,
        _ => '?',
    }
}

/// List position bound to a lowercase letter or digit
pub fn index_for_letter(c: char) -> Option<usize> {
    match c {
        'a'..='z' => Some(c as usize - 'a' as usize),
        '0'..='9' => Some(26 + c as usize - '0' as usize),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn sample_list(eligible: &[bool]) -> CandidateList {
    eligible
        .iter()
        .enumerate()
        .map(|(i, &eligible)| Candidate {
            id: i,
            name: format!("Spell {}", i),
            min_level: 1,
            cost: 1,
            fail: 10,
            eligible,
            note: None,
            source: CandidateSource::Spell {
                realm: Realm::Sorcery,
                spell: i,
            },
        })
        .collect()
}
