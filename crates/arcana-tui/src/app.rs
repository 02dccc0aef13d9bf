//! Application state and command dispatch

use strum::IntoEnumIterator;

use arcana_core::action::{do_cmd_browse, do_cmd_cast, do_cmd_racial_power, do_cmd_study};
use arcana_core::io::{Key, Terminal, get_check, wait_key};
use arcana_core::magic::eligibility::book_usable;
use arcana_core::magic::{Realm, Spellbook};
use arcana_core::player::{Actor, Stat, Timed, format_stat};
use arcana_core::{ActionResult, GameState};
use arcana_rng::{GameRng, RandomSource};

use crate::input::Command;

/// Longest rest before giving up
const MAX_REST_TURNS: u64 = 1000;

/// Status effects worth a word on the status line
const SHOWN_EFFECTS: [(Timed, &str); 6] = [
    (Timed::Paralyzed, "Paralyzed"),
    (Timed::Confused, "Conf"),
    (Timed::Blind, "Blind"),
    (Timed::Stun, "Stun"),
    (Timed::Afraid, "Afraid"),
    (Timed::Shero, "Berserk"),
];

/// Application state
pub struct App<R: RandomSource = GameRng> {
    state: GameState<R>,
    should_quit: bool,
    save_requested: bool,
}

impl<R: RandomSource> App<R> {
    pub fn new(state: GameState<R>) -> Self {
        Self {
            state,
            should_quit: false,
            save_requested: false,
        }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the player asked to save on the way out
    pub fn save_requested(&self) -> bool {
        self.save_requested
    }

    /// Two status lines for the current character
    pub fn status_lines(&self) -> [String; 2] {
        status_lines(&self.state.actor, self.state.turns)
    }

    /// Run one command
    pub fn execute(&mut self, command: Command, term: &mut dyn Terminal) -> ActionResult {
        self.state.clear_messages();
        let result = match command {
            Command::Cast => match self.choose_book(term, "Cast from which book? ", false) {
                Some(book) => do_cmd_cast(&mut self.state, term, book),
                None => ActionResult::Cancelled,
            },
            Command::Study => match self.choose_book(term, "Study which book? ", true) {
                Some(book) => do_cmd_study(&mut self.state, term, book),
                None => ActionResult::Cancelled,
            },
            Command::Browse => match self.choose_book(term, "Browse which book? ", false) {
                Some(book) => do_cmd_browse(&mut self.state, term, book),
                None => ActionResult::Cancelled,
            },
            Command::RacialPower => do_cmd_racial_power(&mut self.state, term),
            Command::Repeat => self.state.repeat_last(term),
            Command::Rest => self.rest(term),
            Command::History => {
                self.show_history(term);
                ActionResult::NoTime
            }
            Command::Save => {
                self.save_requested = true;
                self.should_quit = true;
                ActionResult::NoTime
            }
            Command::Quit => {
                if get_check(term, "Really quit without saving? ") {
                    self.should_quit = true;
                }
                ActionResult::NoTime
            }
        };
        tracing::debug!(?command, ?result, turns = self.state.turns, "command done");

        match &result {
            ActionResult::Died(cause) => {
                let msg = format!("You die from {}.", cause);
                term.message(&msg);
                self.state.message(msg);
                self.should_quit = true;
            }
            r if r.takes_turn() => self.pass_turn(term),
            _ => {}
        }
        result
    }

    /// Books the character could open for a command
    fn books_for(&self, study: bool) -> Vec<Spellbook> {
        let actor = &self.state.actor;
        Realm::iter()
            .flat_map(Spellbook::all_of)
            .filter(|&book| {
                book_usable(actor, book)
                    || (study
                        && actor.class.magic().is_some()
                        && actor
                            .realm1
                            .is_some_and(|r1| actor.class.allows_realm2(r1, book.realm)))
            })
            .collect()
    }

    /// Pick a book, first by realm when several are on offer
    fn choose_book(
        &mut self,
        term: &mut dyn Terminal,
        prompt: &str,
        study: bool,
    ) -> Option<Spellbook> {
        let books = self.books_for(study);
        if books.is_empty() {
            let msg = "You have no books that you can read.";
            term.message(msg);
            self.state.message(msg);
            return None;
        }

        let mut realms: Vec<Realm> = books.iter().map(|b| b.realm).collect();
        realms.dedup();
        let realm = if realms.len() == 1 {
            realms[0]
        } else {
            let names: Vec<String> = realms.iter().map(|r| format!("{} magic", r)).collect();
            let index = pick_from(term, "Which realm? ", &names)?;
            realms[index]
        };

        let shelf: Vec<Spellbook> = books.into_iter().filter(|b| b.realm == realm).collect();
        let titles: Vec<String> = shelf.iter().map(|b| format!("[{}]", b.title())).collect();
        let index = pick_from(term, prompt, &titles)?;
        Some(shelf[index])
    }

    /// Show recent message history until a key is pressed
    fn show_history(&self, term: &mut dyn Terminal) {
        let history = &self.state.message_history;
        term.save_screen();
        term.put_line(0, 0, "Message history (any key to continue)");
        let start = history.len().saturating_sub(20);
        for (i, msg) in history[start..].iter().enumerate() {
            term.put_line(i as u16 + 1, 0, msg);
        }
        wait_key(term);
        term.restore_screen();
    }

    /// Rest until hit points and mana are full or something interrupts
    fn rest(&mut self, term: &mut dyn Terminal) -> ActionResult {
        let start = self.state.turns;
        let actor = &mut self.state.actor;
        if actor.hp >= actor.hp_max
            && actor.mana >= actor.mana_max
            && !actor.timed.is_active(Timed::Paralyzed)
        {
            return ActionResult::NoTime;
        }
        while self.state.turns - start < MAX_REST_TURNS {
            let actor = &mut self.state.actor;
            if actor.hp >= actor.hp_max && actor.mana >= actor.mana_max {
                break;
            }
            actor.hp = (actor.hp + 1).min(actor.hp_max);
            actor.mana = (actor.mana + 1).min(actor.mana_max);
            actor.timed.tick();
            self.state.turns += 1;
        }
        let msg = "You feel rested.";
        term.message(msg);
        self.state.message(msg);
        tracing::debug!(turns = self.state.turns - start, "rested");
        ActionResult::NoTime
    }

    /// World time after a turn-taking command: effects count down, and a
    /// paralyzed character loses turns until it wears off
    fn pass_turn(&mut self, term: &mut dyn Terminal) {
        let was_paralyzed = self.state.actor.timed.is_active(Timed::Paralyzed);
        self.state.actor.timed.tick();
        while self.state.actor.timed.is_active(Timed::Paralyzed) {
            self.state.actor.timed.tick();
            self.state.turns += 1;
        }
        if was_paralyzed {
            let msg = "You can move again.";
            term.message(msg);
            self.state.message(msg);
        }
    }
}

/// Ask for one of `items` by letter. Escape cancels; other keys ring the bell.
fn pick_from(term: &mut dyn Terminal, prompt: &str, items: &[String]) -> Option<usize> {
    if items.len() == 1 {
        return Some(0);
    }
    term.save_screen();
    for (i, item) in items.iter().enumerate() {
        let letter = (b'a' + i as u8) as char;
        term.put_line(i as u16 + 1, 13, &format!("{}) {}", letter, item));
    }
    let last = (b'a' + (items.len() - 1) as u8) as char;
    let choice = loop {
        term.put_line(0, 0, &format!("{}(a-{}, ESC=exit) ", prompt, last));
        match term.next_key() {
            Key::Escape => break None,
            Key::Char(c) if c.is_ascii_lowercase() && ((c as u8 - b'a') as usize) < items.len() => {
                break Some((c as u8 - b'a') as usize);
            }
            _ => term.bell(),
        }
    };
    term.put_line(0, 0, "");
    term.restore_screen();
    choice
}

/// Status lines: identity and experience, then pools, stats and effects
pub fn status_lines(actor: &Actor, turns: u64) -> [String; 2] {
    let mut realms = String::new();
    for realm in [actor.realm1, actor.realm2].into_iter().flatten() {
        realms.push_str(if realms.is_empty() { "  " } else { "/" });
        realms.push_str(&realm.to_string());
    }
    let line1 = format!(
        "{} the {} {}  Lv:{} Exp:{}{}",
        actor.name, actor.race, actor.class, actor.level, actor.exp, realms
    );

    let mut line2 = format!(
        "HP:{}/{} SP:{}/{}",
        actor.hp, actor.hp_max, actor.mana, actor.mana_max
    );
    for stat in Stat::iter() {
        line2.push_str(&format!(" {}:{}", stat, format_stat(actor.stats.current(stat))));
    }
    line2.push_str(&format!(" T:{}", turns));
    for (effect, word) in SHOWN_EFFECTS {
        if actor.timed.is_active(effect) {
            line2.push(' ');
            line2.push_str(word);
        }
    }
    [line1, line2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcana_core::magic::RealmSlot;
    use arcana_core::player::{Class, Race};
    use arcana_core::testing::ScriptedTerminal;
    use arcana_rng::ScriptedRng;

    fn mage_app() -> App<ScriptedRng> {
        let mut actor = Actor::new("Ged", Class::Mage, Race::Human);
        actor.realm1 = Some(Realm::Sorcery);
        actor.realm2 = Some(Realm::Chaos);
        actor.stats.set(Stat::Intelligence, 18);
        actor.set_level(5);
        actor.spells.learn(RealmSlot::Primary, 0);
        App::new(GameState::new(
            actor,
            ScriptedRng::default().with_fallback(99),
        ))
    }

    #[test]
    fn test_cast_picks_realm_then_book() {
        let mut app = mage_app();
        app.state_mut().actor.mana = 20;
        // realm a (Sorcery), book a, spell a
        let mut term = ScriptedTerminal::new("aaa");
        let result = app.execute(Command::Cast, &mut term);
        assert_eq!(result, ActionResult::Success);
        assert!(term.drew("Sorcery magic"));
        assert!(term.drew("[Magic for Beginners]"));
        assert_eq!(app.state().turns, 1);
        assert_eq!(term.screen_depth(), 0);
    }

    #[test]
    fn test_escape_at_book_prompt() {
        let mut app = mage_app();
        let mut term = ScriptedTerminal::new("a\x1b");
        assert_eq!(app.execute(Command::Cast, &mut term), ActionResult::Cancelled);
        assert_eq!(app.state().turns, 0);
        assert_eq!(term.screen_depth(), 0);
    }

    #[test]
    fn test_warrior_has_no_books() {
        let actor = Actor::new("Conan", Class::Warrior, Race::Human);
        let mut app = App::new(GameState::new(actor, ScriptedRng::default()));
        let mut term = ScriptedTerminal::new("");
        assert_eq!(app.execute(Command::Browse, &mut term), ActionResult::Cancelled);
        assert_eq!(term.messages(), ["You have no books that you can read."]);
    }

    #[test]
    fn test_study_offers_other_realms_to_change_to() {
        let app = mage_app();
        let studied: Vec<Realm> = app.books_for(true).iter().map(|b| b.realm).collect();
        let cast: Vec<Realm> = app.books_for(false).iter().map(|b| b.realm).collect();
        assert!(studied.contains(&Realm::Death));
        assert!(!cast.contains(&Realm::Death));
        assert!(!studied.contains(&Realm::Music));
    }

    #[test]
    fn test_rest_restores_pools() {
        let mut app = mage_app();
        app.state_mut().actor.mana = 0;
        app.state_mut().actor.hp = 1;
        let mut term = ScriptedTerminal::new("");
        app.execute(Command::Rest, &mut term);
        let actor = &app.state().actor;
        assert_eq!(actor.mana, actor.mana_max);
        assert_eq!(actor.hp, actor.hp_max);
        assert!(app.state().turns > 0);
    }

    #[test]
    fn test_paralysis_passes_turns() {
        let mut app = mage_app();
        app.state_mut().actor.timed.set(Timed::Paralyzed, 3);
        let mut term = ScriptedTerminal::new("");
        app.pass_turn(&mut term);
        assert!(!app.state().actor.timed.is_active(Timed::Paralyzed));
        assert_eq!(app.state().turns, 2);
        assert_eq!(term.messages(), ["You can move again."]);
    }

    #[test]
    fn test_quit_and_save() {
        let mut app = mage_app();
        let mut term = ScriptedTerminal::new("n");
        app.execute(Command::Quit, &mut term);
        assert!(!app.should_quit());

        app.execute(Command::Save, &mut term);
        assert!(app.should_quit());
        assert!(app.save_requested());
    }

    #[test]
    fn test_status_lines() {
        let app = mage_app();
        let [line1, line2] = app.status_lines();
        assert!(line1.starts_with("Ged the Human Mage  Lv:5"));
        assert!(line1.ends_with("Sorcery/Chaos"));
        assert!(line2.contains("Int:18"));
        assert!(line2.ends_with("T:0"));
    }
}
