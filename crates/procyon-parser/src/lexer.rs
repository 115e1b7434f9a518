//! The line-oriented lexer: a table-driven DFA for inline tokens, wrapped
//! by the indentation tracker that synthesises `LINE_IN` / `LINE_EQ` /
//! `LINE_OUT`.

use std::io::BufRead;

use crate::error::{DecodeError, ErrorCode};
use crate::tables;
use crate::token::{Token, TokenKind, CELL_DONE, CELL_OK, CELL_VALUE};

/// Streams tokens out of newline-delimited input.
///
/// `advance` makes the next token current and returns false once the input
/// and all open indentation levels are exhausted. The current token borrows
/// the current line buffer; lines are read one at a time and discarded on
/// advance.
///
/// ## Example
/// ```rust
/// use procyon_parser::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("[1]".as_bytes());
/// let mut kinds = Vec::new();
/// while lexer.advance().unwrap() {
///     kinds.push(lexer.token().kind);
/// }
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::LineIn,
///         TokenKind::ArrayIn,
///         TokenKind::Int,
///         TokenKind::ArrayOut,
///         TokenKind::LineOut,
///     ]
/// );
/// ```
pub struct Lexer<R> {
    lines: R,
    eof: bool,
    started: bool,

    token_kind: TokenKind,
    token_begin: usize,
    token_end: usize,
    error: Option<(ErrorCode, usize)>,

    lineno: u64,
    buffer: Vec<u8>,
    prev_width: usize,

    indent: i32,
    levels: Vec<i32>,
    eq: bool,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(lines: R) -> Lexer<R> {
        Lexer {
            lines,
            eof: false,
            started: false,
            token_kind: TokenKind::LineIn,
            token_begin: 0,
            token_end: 0,
            error: None,
            lineno: 1,
            buffer: Vec::new(),
            prev_width: 0,
            indent: -1,
            levels: vec![-1],
            eq: false,
        }
    }

    /// The current token. Valid after `advance` has returned true.
    pub fn token(&self) -> Token<'_> {
        Token {
            kind: self.token_kind,
            lineno: self.lineno,
            range: (self.token_begin, self.token_end),
            line: &self.buffer,
            error: self.error,
        }
    }

    pub(crate) fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    pub(crate) fn token_text(&self) -> &[u8] {
        &self.buffer[self.token_begin..self.token_end]
    }

    pub(crate) fn token_begin(&self) -> usize {
        self.token_begin
    }

    pub(crate) fn lineno(&self) -> u64 {
        self.lineno
    }

    pub(crate) fn prev_width(&self) -> usize {
        self.prev_width
    }

    pub(crate) fn error(&self) -> Option<(ErrorCode, usize)> {
        self.error
    }

    /// Advance to the next token. Returns false at the end of the stream;
    /// the current token is left untouched in that case.
    pub fn advance(&mut self) -> Result<bool, DecodeError> {
        self.error = None;
        if self.started {
            if self.levels.len() == 1 {
                return Ok(false);
            }
        } else {
            self.started = true;
        }

        if self.buffer.is_empty() {
            if self.next_line()? {
                return Ok(true);
            }
        } else if self.update_level() {
            return Ok(true);
        }

        while self.token_end < self.buffer.len()
            && matches!(self.buffer[self.token_end], b' ' | b'\t')
        {
            self.token_end += 1;
        }
        if self.buffer[self.token_end] == b'\n' {
            if !self.next_line()? {
                let at = self.token_end;
                return Ok(self.fail(ErrorCode::Internal, at));
            }
            return Ok(true);
        }

        self.token_begin = self.token_end;
        let lex = tables::lex();
        let mut cell = 0u8;
        while self.token_end < self.buffer.len() {
            let class = lex.classes[self.buffer[self.token_end] as usize];
            cell = lex.transitions[cell as usize][class as usize];
            if cell & CELL_DONE != 0 {
                break;
            }
            self.token_end += 1;
        }

        if cell & CELL_DONE == 0 {
            let at = self.token_end;
            return Ok(self.fail(ErrorCode::Internal, at));
        }
        if cell & CELL_OK != 0 {
            self.token_kind = TokenKind::from_ordinal(cell & CELL_VALUE);
            if self.token_kind == TokenKind::Star {
                self.reindent();
                self.token_end = self.token_begin + 1;
            }
        } else {
            let code = ErrorCode::from_ordinal(cell & CELL_VALUE);
            let mut at = self.token_end;
            match code {
                ErrorCode::Partial => at -= 1,
                ErrorCode::BadWord => at = self.token_begin,
                ErrorCode::BadEsc | ErrorCode::BadUesc => {
                    while self.buffer[at] != b'\\' {
                        at -= 1;
                    }
                }
                _ => {}
            }
            self.fail(code, at);
        }
        Ok(true)
    }

    /// Read lines until one has content or the input ends, then report the
    /// resulting level change. Whitespace-only lines vanish entirely.
    fn next_line(&mut self) -> Result<bool, DecodeError> {
        loop {
            if !self.buffer.is_empty() {
                self.lineno += 1;
            }
            self.prev_width = self.buffer.len();

            self.buffer.clear();
            if !self.eof {
                let read = self
                    .lines
                    .read_until(b'\n', &mut self.buffer)
                    .map_err(|_| DecodeError::new(ErrorCode::System, self.lineno, 1))?;
                if read == 0 {
                    self.eof = true;
                }
            }
            if self.eof {
                self.buffer.clear();
                self.token_begin = 0;
                self.token_end = 0;
                self.indent = 0;
                if !self.update_level() {
                    self.levels.pop();
                    self.token_kind = TokenKind::LineOut;
                }
                return Ok(true);
            }

            self.token_begin = 0;
            self.token_end = 0;
            if self.buffer.last() != Some(&b'\n') {
                self.buffer.push(b'\n');
            }

            self.indent = 0;
            if self.reindent() {
                return Ok(self.update_level());
            }
        }
    }

    /// Compare the next significant column against the indent stack and
    /// synthesise at most one virtual token.
    fn update_level(&mut self) -> bool {
        let top = *self.levels.last().unwrap_or(&-1);
        if self.indent > top {
            self.eq = false;
            if self.token_kind == TokenKind::LineOut {
                self.indent = top;
                let at = self.token_end;
                return self.fail(ErrorCode::Outdent, at);
            }
            self.levels.push(self.indent);
            self.token_kind = TokenKind::LineIn;
            return true;
        }

        if self.indent < top {
            self.levels.pop();
            self.token_kind = TokenKind::LineOut;
            return true;
        }

        if self.eq {
            self.eq = false;
            self.token_kind = TokenKind::LineEq;
            return true;
        }

        false
    }

    /// Measure the column after the cursor: spaces count one, tabs round up
    /// to the next even column. Arms the `eq` pulse when the line still has
    /// content; returns false when only the newline remains.
    fn reindent(&mut self) -> bool {
        let mut indent = self.indent + (self.token_end - self.token_begin) as i32;
        let mut i = self.token_end;
        while i < self.buffer.len() {
            match self.buffer[i] {
                b' ' => indent += 1,
                b'\t' => indent = (indent + 2) & !1,
                b'\n' => return false,
                _ => {
                    self.indent = indent;
                    self.eq = true;
                    self.token_end = i;
                    return true;
                }
            }
            i += 1;
        }
        false
    }

    fn fail(&mut self, code: ErrorCode, at: usize) -> bool {
        self.token_kind = TokenKind::Error;
        self.error = Some((code, at + 1));
        self.token_end = self.buffer.len().saturating_sub(1);
        true
    }
}

impl<R> std::fmt::Debug for Lexer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("lineno", &self.lineno)
            .field("token_kind", &self.token_kind)
            .field("levels", &self.levels)
            .finish_non_exhaustive()
    }
}
