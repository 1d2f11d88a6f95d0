//! Rendering surface abstraction.
//!
//! The engine never talks to a concrete display. It renders through the
//! `Surface` capability, which a host implements over whatever it draws to
//! (a DOM node, a scene graph, stdout). `MemorySurface` is the in-memory
//! implementation used by unit tests and headless sessions.

/// A text rendering surface.
///
/// All operations are character-oriented: `erase_last(1)` removes one
/// character regardless of its byte length.
pub trait Surface {
    /// Append text at the end of the surface.
    fn append(&mut self, text: &str);

    /// Erase the last `n` characters.
    fn erase_last(&mut self, n: usize);

    /// Erase the whole surface.
    fn clear_all(&mut self);

    /// Erase backwards up to (and excluding) the last newline.
    fn clear_to_last_newline(&mut self);

    /// Bring the end of the surface into view.
    fn scroll_to_end(&mut self);
}

/// A fully in-memory surface backed by a `String`.
#[derive(Debug, Default)]
pub struct MemorySurface {
    text: String,
    scrolled: u64,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full rendered text.
    pub fn contents(&self) -> &str {
        &self.text
    }

    /// How many times `scroll_to_end` has been called.
    pub fn scroll_count(&self) -> u64 {
        self.scrolled
    }
}

impl Surface for MemorySurface {
    fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn erase_last(&mut self, n: usize) {
        for _ in 0..n {
            if self.text.pop().is_none() {
                break;
            }
        }
    }

    fn clear_all(&mut self) {
        self.text.clear();
    }

    fn clear_to_last_newline(&mut self) {
        match self.text.rfind('\n') {
            Some(idx) => self.text.truncate(idx + 1),
            None => self.text.clear(),
        }
    }

    fn scroll_to_end(&mut self) {
        self.scrolled += 1;
    }
}
