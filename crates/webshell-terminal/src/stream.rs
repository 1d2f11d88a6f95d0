//! Pending-output queue and inline-directive tokenizer.
//!
//! Text handed to the terminal is buffered raw, directives and all, and only
//! tokenized as it is consumed. Each consumption step yields exactly one
//! token: a single literal character, or one complete `|name,arg1,...|`
//! directive. There is no escaping mechanism for a literal `|` in streamed
//! text; a pipe always opens a directive.

use std::collections::VecDeque;

/// The character that opens and closes an inline directive.
pub const DIRECTIVE_DELIMITER: char = '|';

/// One unit of pending output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamToken {
    /// A single character to render.
    Literal(char),
    /// An inline directive, split on `,`: `[name, args...]`.
    Directive(Vec<String>),
}

/// FIFO queue of raw output text awaiting rendering.
///
/// An unterminated directive is fatal to the queue: the remainder is dropped
/// and the stream stops accepting and producing output for the rest of the
/// session.
#[derive(Debug, Default)]
pub struct OutputStream {
    buf: VecDeque<char>,
    halted: bool,
}

impl OutputStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw text to the queue. The text is not parsed here; it may
    /// contain inline directives. Text enqueued after a halt is discarded.
    pub fn enqueue(&mut self, text: &str) {
        if self.halted {
            log::debug!("stream halted; discarding {} characters", text.chars().count());
            return;
        }
        self.buf.extend(text.chars());
    }

    /// Whether there is nothing left to consume.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether a malformed directive has shut this stream down.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Consume and return the next token, or `None` when the queue is empty
    /// or halted.
    ///
    /// A directive with no closing delimiter drops the rest of the queue and
    /// halts the stream rather than scanning out of bounds.
    pub fn next_token(&mut self) -> Option<StreamToken> {
        if self.halted {
            return None;
        }
        let first = *self.buf.front()?;
        if first != DIRECTIVE_DELIMITER {
            self.buf.pop_front();
            return Some(StreamToken::Literal(first));
        }

        // Directive: locate the closing delimiter after the opening one.
        match self
            .buf
            .iter()
            .skip(1)
            .position(|&ch| ch == DIRECTIVE_DELIMITER)
        {
            Some(len) => {
                self.buf.pop_front();
                let body: String = self.buf.drain(..len).collect();
                self.buf.pop_front();
                let tokens = body.split(',').map(str::to_string).collect();
                Some(StreamToken::Directive(tokens))
            },
            None => {
                log::warn!(
                    "unterminated inline directive; dropping {} pending characters and halting output",
                    self.buf.len()
                );
                self.buf.clear();
                self.halted = true;
                None
            },
        }
    }
}
