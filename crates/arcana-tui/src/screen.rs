//! Line buffer behind the terminal
//!
//! The engine draws whole lines at (row, col). The buffer keeps those rows
//! as plain strings plus a stack of saved copies, and the terminal renders
//! whatever is current.

/// Rows of text with a saved-screen stack
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScreen {
    rows: Vec<String>,
    saved: Vec<Vec<String>>,
}

impl LineScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `text` at (row, col) and clear the rest of the row
    pub fn put_line(&mut self, row: u16, col: u16, text: &str) {
        let row = usize::from(row);
        if self.rows.len() <= row {
            self.rows.resize(row + 1, String::new());
        }
        let line = &mut self.rows[row];
        let col = usize::from(col);
        let kept: String = line.chars().take(col).collect();
        let pad = col.saturating_sub(kept.chars().count());
        *line = kept;
        line.extend(std::iter::repeat_n(' ', pad));
        line.push_str(text);
    }

    pub fn row(&self, row: u16) -> &str {
        self.rows.get(usize::from(row)).map_or("", String::as_str)
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Push a copy of the rows
    pub fn save(&mut self) {
        self.saved.push(self.rows.clone());
    }

    /// Pop the last saved copy. Returns false when nothing was saved.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(rows) => {
                self.rows = rows;
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_line_pads_and_truncates() {
        let mut screen = LineScreen::new();
        screen.put_line(2, 4, "abc");
        assert_eq!(screen.row(2), "    abc");
        assert_eq!(screen.row(0), "");

        screen.put_line(2, 5, "Z");
        assert_eq!(screen.row(2), "    aZ");

        screen.put_line(2, 0, "");
        assert_eq!(screen.row(2), "");
    }

    #[test]
    fn test_save_restore_stack() {
        let mut screen = LineScreen::new();
        screen.put_line(1, 0, "map");
        screen.save();
        screen.put_line(1, 0, "menu");
        screen.save();
        screen.put_line(1, 0, "description");
        assert_eq!(screen.depth(), 2);

        assert!(screen.restore());
        assert_eq!(screen.row(1), "menu");
        assert!(screen.restore());
        assert_eq!(screen.row(1), "map");
        assert!(!screen.restore());
    }
}
