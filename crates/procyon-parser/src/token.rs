use crate::error::ErrorCode;

/// Lexical token kinds.
///
/// The ordinals are stable; they index the compiled parse table and match
/// the terminal cells of the lexer table. `LineIn`, `LineEq` and `LineOut`
/// are virtual tokens synthesised by the indentation tracker and have no
/// backing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    LineIn = 0,
    LineEq = 1,
    LineOut = 2,

    Star = 3,
    ArrayIn = 4,
    ArrayOut = 5,
    MapIn = 6,
    MapOut = 7,
    Comma = 8,
    StrWrapEmpty = 9,
    StrPipeEmpty = 10,
    StrBang = 11,
    Null = 12,
    True = 13,
    False = 14,
    Inf = 15,
    NegInf = 16,
    Nan = 17,

    Key = 18,
    Qkey = 19,
    Int = 20,
    Float = 21,
    Data = 22,
    Str = 23,
    StrWrap = 24,
    StrPipe = 25,
    Comment = 26,

    Error = 27,
}

pub(crate) const TOKEN_KIND_COUNT: usize = 28;

/// Terminal-cell encoding of the lexer table: low six bits carry a token
/// kind or error code, `CELL_OK` distinguishes the two, and `CELL_DONE`
/// marks the cell as terminal. Cells without `CELL_DONE` are next-state
/// indices.
pub(crate) const CELL_VALUE: u8 = 0o077;
pub(crate) const CELL_OK: u8 = 0o100;
pub(crate) const CELL_DONE: u8 = 0o200;

impl TokenKind {
    pub(crate) fn from_ordinal(n: u8) -> TokenKind {
        use TokenKind::*;
        match n {
            0 => LineIn,
            1 => LineEq,
            2 => LineOut,
            3 => Star,
            4 => ArrayIn,
            5 => ArrayOut,
            6 => MapIn,
            7 => MapOut,
            8 => Comma,
            9 => StrWrapEmpty,
            10 => StrPipeEmpty,
            11 => StrBang,
            12 => Null,
            13 => True,
            14 => False,
            15 => Inf,
            16 => NegInf,
            17 => Nan,
            18 => Key,
            19 => Qkey,
            20 => Int,
            21 => Float,
            22 => Data,
            23 => Str,
            24 => StrWrap,
            25 => StrPipe,
            26 => Comment,
            _ => Error,
        }
    }

    /// True for the indentation tracker's synthesised tokens.
    pub fn is_virtual(self) -> bool {
        (self as u8) <= (TokenKind::LineOut as u8)
    }
}

/// A view of the lexer's current token.
///
/// `line` is the current line buffer (always newline-terminated) and
/// `range` the token's byte range within it; virtual tokens have an empty
/// range. An `Error` token additionally carries its code and 1-based
/// column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lineno: u64,
    pub range: (usize, usize),
    pub line: &'a [u8],
    pub error: Option<(ErrorCode, usize)>,
}

impl<'a> Token<'a> {
    /// The token's bytes within its line.
    pub fn text(&self) -> &'a [u8] {
        &self.line[self.range.0..self.range.1]
    }
}
