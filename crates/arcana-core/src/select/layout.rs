//! Candidate list rendering and prompt text

use crate::consts::MENU_COLUMN_ROWS;
use crate::io::Renderer;

use super::candidate::{Candidate, CandidateList, letter_for};

/// Row and column of the spell list
const SPELL_LIST_ROW: u16 = 1;
const SPELL_LIST_COL: u16 = 15;

/// Width of one column of the power list
const POWER_COLUMN_WIDTH: u16 = 40;

/// How a list is laid out and worded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStyle {
    /// One column of spells, worded with the class's verb and noun
    Spells {
        verb: &'static str,
        noun: &'static str,
    },
    /// Up to two columns of racial and mutation powers
    Powers,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ListStyle {
    /// Main prompt, e.g. `(Spells a-h, *=List, ESC=exit) Cast which spell? `
    pub fn prompt(&self, list: &CandidateList) -> String {
        match self {
            ListStyle::Spells { verb, noun } => format!(
                "({}s {}, *=List, ESC=exit) {} which {}? ",
                capitalize(noun),
                list.key_range(),
                capitalize(verb),
                noun
            ),
            ListStyle::Powers => format!(
                "(Powers {}, *=List, ESC=exit) Use which power? ",
                list.key_range()
            ),
        }
    }

    /// Confirmation asked for an uppercase choice
    pub fn confirm(&self, candidate: &Candidate) -> String {
        match self {
            ListStyle::Spells { verb, .. } => format!(
                "{} {} ({} mana, {}% fail)? ",
                capitalize(verb),
                candidate.name,
                candidate.cost,
                candidate.fail
            ),
            ListStyle::Powers => format!("Use {}? ", candidate.name),
        }
    }

    /// Message for choosing an ineligible entry
    pub fn refusal(&self, candidate: &Candidate) -> String {
        match self {
            ListStyle::Spells { verb, noun } => format!("You may not {} that {}.", verb, noun),
            ListStyle::Powers => format!(
                "You need to attain level {} to use this power.",
                candidate.min_level
            ),
        }
    }

    /// Draw the list. `cursor` marks the highlighted row in menu mode.
    pub fn draw(&self, term: &mut dyn Renderer, list: &CandidateList, cursor: Option<usize>) {
        match self {
            ListStyle::Spells { .. } => draw_spells(term, list, cursor),
            ListStyle::Powers => draw_powers(term, list, cursor),
        }
    }
}

fn row_prefix(index: usize, cursor: Option<usize>) -> String {
    match cursor {
        Some(c) if c == index => " >  ".to_string(),
        Some(_) => "    ".to_string(),
        None => format!(" {}) ", letter_for(index)),
    }
}

fn draw_spells(term: &mut dyn Renderer, list: &CandidateList, cursor: Option<usize>) {
    let header = format!("{:<4}{:<30}{:>3} {:>4} {:>4} Info", "", "Name", "Lv", "Mana", "Fail");
    term.put_line(SPELL_LIST_ROW, SPELL_LIST_COL, &header);

    let mut row = SPELL_LIST_ROW + 1;
    for (i, cand) in list.iter().enumerate() {
        let line = format!(
            "{:<4}{:<30}{:>3} {:>4} {:>3}% {}",
            row_prefix(i, cursor),
            cand.name,
            cand.min_level,
            cand.cost,
            cand.fail,
            cand.note.as_deref().unwrap_or("")
        );
        term.put_line(row, SPELL_LIST_COL, line.trim_end());
        row += 1;
    }
    term.put_line(row, SPELL_LIST_COL, "");
}

fn draw_powers(term: &mut dyn Renderer, list: &CandidateList, cursor: Option<usize>) {
    let header = "                            Lv Cost Fail";
    if list.len() < MENU_COLUMN_ROWS {
        term.put_line(1, 0, header);
    } else {
        term.put_line(1, 0, &format!("{}{}", header, header));
    }

    for (i, cand) in list.iter().enumerate() {
        let (row, col) = if i < MENU_COLUMN_ROWS {
            (2 + i as u16, 0)
        } else {
            (2 + (i - MENU_COLUMN_ROWS) as u16, POWER_COLUMN_WIDTH)
        };
        let prefix = row_prefix(i, cursor);
        let name: String = cand.name.chars().take(23).collect();
        let line = format!(
            "{}{:<23} {:>2} {:>4} {:>3}%",
            prefix, name, cand.min_level, cand.cost, cand.fail
        );
        term.put_line(row, col, &line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::candidate::sample_list;
    use crate::testing::ScriptedTerminal;

    fn spells() -> ListStyle {
        ListStyle::Spells {
            verb: "cast",
            noun: "spell",
        }
    }

    #[test]
    fn test_prompts() {
        let list = sample_list(&[true; 8]);
        assert_eq!(
            spells().prompt(&list),
            "(Spells a-h, *=List, ESC=exit) Cast which spell? "
        );
        assert_eq!(
            ListStyle::Powers.prompt(&list),
            "(Powers a-h, *=List, ESC=exit) Use which power? "
        );
    }

    #[test]
    fn test_confirm_and_refusal() {
        let list = sample_list(&[true]);
        assert_eq!(
            spells().confirm(&list[0]),
            "Cast Spell 0 (1 mana, 10% fail)? "
        );
        assert_eq!(ListStyle::Powers.confirm(&list[0]), "Use Spell 0? ");
        assert_eq!(spells().refusal(&list[0]), "You may not cast that spell.");
        assert_eq!(
            ListStyle::Powers.refusal(&list[0]),
            "You need to attain level 1 to use this power."
        );
    }

    #[test]
    fn test_draw_spells_letters() {
        let list = sample_list(&[true; 2]);
        let mut term = ScriptedTerminal::default();
        spells().draw(&mut term, &list, None);
        assert!(term.lines_at(2)[0].starts_with(" a) Spell 0"));
        assert!(term.lines_at(3)[0].starts_with(" b) Spell 1"));
        assert!(term.drawn().iter().all(|l| l.col == SPELL_LIST_COL));
    }

    #[test]
    fn test_draw_powers_two_columns() {
        let list = sample_list(&[true; 20]);
        let mut term = ScriptedTerminal::default();
        ListStyle::Powers.draw(&mut term, &list, Some(19));
        let second = term
            .drawn()
            .iter()
            .find(|l| l.col == POWER_COLUMN_WIDTH && l.row == 3)
            .map(|l| l.text.clone());
        assert_eq!(
            second.as_deref(),
            Some(" >  Spell 19                 1    1  10%")
        );
        assert!(term.lines_at(1)[0].ends_with("Lv Cost Fail"));
        assert!(term.lines_at(1)[0].len() > 60);
    }
}
