//! A rendering surface over stdout.
//!
//! Erasure is implemented with backspace-space-backspace sequences and can
//! therefore only reach back to the start of the current line; earlier lines
//! have already scrolled by. That is a limitation of this host, not of the
//! engine, and matches what the interactive session actually needs (cursor
//! glyph redraws and `clearline`).

use std::io::{self, Write};

use webshell_surface::Surface;

/// Surface writing directly to the process stdout.
#[derive(Debug, Default)]
pub struct StdoutSurface {
    /// Mirror of the text rendered since the last newline, kept so
    /// line-local erasure knows how far back it may go.
    tail: String,
}

impl StdoutSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

impl Surface for StdoutSurface {
    fn append(&mut self, text: &str) {
        print!("{text}");
        for ch in text.chars() {
            if ch == '\n' {
                self.tail.clear();
            } else {
                self.tail.push(ch);
            }
        }
        self.flush();
    }

    fn erase_last(&mut self, n: usize) {
        for _ in 0..n {
            if self.tail.pop().is_none() {
                break;
            }
            print!("\u{8} \u{8}");
        }
        self.flush();
    }

    fn clear_all(&mut self) {
        // ANSI: clear screen, home the cursor.
        print!("\u{1b}[2J\u{1b}[1;1H");
        self.tail.clear();
        self.flush();
    }

    fn clear_to_last_newline(&mut self) {
        let n = self.tail.chars().count();
        self.erase_last(n);
    }

    fn scroll_to_end(&mut self) {
        // stdout scrolls on its own.
    }
}
