//! The declarative grammar the runtime tables are compiled from.
//!
//! Each lex state maps byte-set patterns to a next state, an accepted token
//! kind, or an error code; a `Utf8` target expands into the shared
//! trailing-byte sub-states that validate multi-byte sequences. Each parse
//! state maps token kinds to a transition record (error / emit / key
//! capture / accumulator ops / states to push). `tables` compiles both into
//! the packed class-indexed arrays the lexer and parser index at run time.
//!
//! Pattern syntax: plain bytes, `a-z` ranges, and a `-` that is literal
//! only in final position. An empty pattern is only valid on a `Utf8` rule,
//! which covers the whole non-ASCII range by itself.

use crate::error::ErrorCode::{self, *};
use crate::token::TokenKind::{self, *};

pub(crate) enum LexTarget {
    /// Keep scanning in the named state.
    State(&'static str),
    /// Accept; the triggering byte is not consumed.
    Accept(TokenKind),
    /// Reject; the triggering byte is not consumed.
    Reject(ErrorCode),
    /// Multi-byte UTF-8 head: validate the sequence, then continue in the
    /// named state.
    Utf8(&'static str),
}

pub(crate) enum LexState {
    /// Every byte maps to the same target.
    Simple(LexTarget),
    /// Later rules override earlier ones; unmatched bytes use `default`.
    Rules {
        default: LexTarget,
        rules: &'static [(&'static [u8], LexTarget)],
    },
}

use LexState::{Rules, Simple};
use LexTarget::{Accept, Reject, State, Utf8};

const CONTROLS: &[u8] = b"\x00-\x08\x0b-\x1f\x7f";
const HIGH: &[u8] = b"\x80-\xff";
const KEYCHARS: &[u8] = b"A-Za-z0-9._/+-";
const HEX: &[u8] = b"0-9a-fA-F";

/// The lexer's states; index 0 is the scan-start state.
pub(crate) static LEX_STATES: &[(&str, LexState)] = &[
    (
        "start",
        Rules {
            default: Reject(BadChar),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (HIGH, Reject(NonAscii)),
                // Inter-token whitespace is consumed by the driver.
                (b" \t\n", Reject(Internal)),
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"*", State("star")),
                (b"[", State("array_in")),
                (b"]", State("array_out")),
                (b"{", State("map_in")),
                (b"}", State("map_out")),
                (b",", State("comma")),
                (b">", State("wrap_lead")),
                (b"|", State("pipe_lead")),
                (b"!", State("bang")),
                (b"\"", State("str_body")),
                (b"$", State("data_even")),
                (b"#", State("comment")),
                (b"0", State("int_zero")),
                (b"1-9", State("int_body")),
                (b"+", State("plus")),
                (b"-", State("minus")),
                (b"n", State("kw_n")),
                (b"t", State("kw_t")),
                (b"f", State("kw_f")),
                (b"i", State("kw_i")),
            ],
        },
    ),
    ("star", Simple(Accept(Star))),
    ("array_in", Simple(Accept(ArrayIn))),
    ("array_out", Simple(Accept(ArrayOut))),
    ("map_in", Simple(Accept(MapIn))),
    ("map_out", Simple(Accept(MapOut))),
    ("comma", Simple(Accept(Comma))),
    ("key_end", Simple(Accept(Key))),
    ("qkey_end", Simple(Accept(Qkey))),
    (
        "word",
        Rules {
            default: Reject(BadWord),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "plus",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0", State("int_zero")),
                (b"1-9", State("int_body")),
                (b"i", State("kw_i")),
            ],
        },
    ),
    (
        "minus",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0", State("int_zero")),
                (b"1-9", State("int_body")),
                (b"i", State("neg_i")),
            ],
        },
    ),
    (
        "int_zero",
        Rules {
            default: Accept(Int),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b".", State("frac_dot")),
                (b"eE", State("exp_head")),
            ],
        },
    ),
    (
        "int_body",
        Rules {
            default: Accept(Int),
            rules: &[
                (KEYCHARS, State("word")),
                (b"0-9", State("int_body")),
                (b":", State("key_end")),
                (b".", State("frac_dot")),
                (b"eE", State("exp_head")),
            ],
        },
    ),
    (
        "frac_dot",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0-9", State("frac_body")),
            ],
        },
    ),
    (
        "frac_body",
        Rules {
            default: Accept(Float),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0-9", State("frac_body")),
                (b"eE", State("exp_head")),
            ],
        },
    ),
    (
        "exp_head",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0-9", State("exp_body")),
                (b"+-", State("exp_sign")),
            ],
        },
    ),
    (
        "exp_sign",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0-9", State("exp_body")),
            ],
        },
    ),
    (
        "exp_body",
        Rules {
            default: Accept(Float),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"0-9", State("exp_body")),
            ],
        },
    ),
    // Keywords share the word fallback: any other key character turns the
    // token into a candidate unquoted key, and a trailing ':' always wins.
    (
        "kw_n",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"u", State("kw_nu")),
                (b"a", State("kw_na")),
            ],
        },
    ),
    (
        "kw_nu",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"l", State("kw_nul")),
            ],
        },
    ),
    (
        "kw_nul",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"l", State("kw_null")),
            ],
        },
    ),
    (
        "kw_null",
        Rules {
            default: Accept(Null),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "kw_na",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"n", State("kw_nan")),
            ],
        },
    ),
    (
        "kw_nan",
        Rules {
            default: Accept(Nan),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "kw_t",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"r", State("kw_tr")),
            ],
        },
    ),
    (
        "kw_tr",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"u", State("kw_tru")),
            ],
        },
    ),
    (
        "kw_tru",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"e", State("kw_true")),
            ],
        },
    ),
    (
        "kw_true",
        Rules {
            default: Accept(True),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "kw_f",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"a", State("kw_fa")),
            ],
        },
    ),
    (
        "kw_fa",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"l", State("kw_fal")),
            ],
        },
    ),
    (
        "kw_fal",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"s", State("kw_fals")),
            ],
        },
    ),
    (
        "kw_fals",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"e", State("kw_false")),
            ],
        },
    ),
    (
        "kw_false",
        Rules {
            default: Accept(False),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "kw_i",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"n", State("kw_in")),
            ],
        },
    ),
    (
        "kw_in",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"f", State("kw_inf")),
            ],
        },
    ),
    (
        "kw_inf",
        Rules {
            default: Accept(Inf),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "neg_i",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"n", State("neg_in")),
            ],
        },
    ),
    (
        "neg_in",
        Rules {
            default: Reject(BadWord),
            rules: &[
                (KEYCHARS, State("word")),
                (b":", State("key_end")),
                (b"f", State("neg_inf")),
            ],
        },
    ),
    (
        "neg_inf",
        Rules {
            default: Accept(NegInf),
            rules: &[(KEYCHARS, State("word")), (b":", State("key_end"))],
        },
    ),
    (
        "str_body",
        Rules {
            default: State("str_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b"\"", State("str_close")),
                (b"\\", State("esc")),
                (b"\n", Reject(StrEol)),
                (b"", Utf8("str_body")),
            ],
        },
    ),
    (
        "str_close",
        Rules {
            default: Accept(Str),
            rules: &[(b":", State("qkey_end"))],
        },
    ),
    (
        "esc",
        Rules {
            default: Reject(BadEsc),
            rules: &[
                (b"bfnrt\"/\\", State("str_body")),
                (b"u", State("hex4_1")),
                (b"U", State("hex8_1")),
            ],
        },
    ),
    (
        "hex4_1",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex4_2"))],
        },
    ),
    (
        "hex4_2",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex4_3"))],
        },
    ),
    (
        "hex4_3",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex4_4"))],
        },
    ),
    (
        "hex4_4",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("str_body"))],
        },
    ),
    (
        "hex8_1",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex8_2"))],
        },
    ),
    (
        "hex8_2",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex8_3"))],
        },
    ),
    (
        "hex8_3",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex8_4"))],
        },
    ),
    (
        "hex8_4",
        Rules {
            default: Reject(BadUesc),
            rules: &[(HEX, State("hex4_1"))],
        },
    ),
    (
        "data_even",
        Rules {
            default: Accept(Data),
            rules: &[
                (KEYCHARS, Reject(DataChar)),
                (HEX, State("data_odd")),
                (b" \t", State("data_even")),
            ],
        },
    ),
    (
        "data_odd",
        Rules {
            default: Reject(Partial),
            rules: &[(KEYCHARS, Reject(DataChar)), (HEX, State("data_even"))],
        },
    ),
    (
        "comment",
        Rules {
            default: State("comment"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b"\t", State("comment")),
                (b"\n", Accept(Comment)),
                (b"", Utf8("comment")),
            ],
        },
    ),
    (
        "wrap_lead",
        Rules {
            default: State("wrap_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b" \t", State("wrap_sep")),
                (b"\n", Accept(StrWrapEmpty)),
                (b"", Utf8("wrap_body")),
            ],
        },
    ),
    (
        "wrap_sep",
        Rules {
            default: State("wrap_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b"\t", State("wrap_body")),
                (b"\n", Accept(StrWrapEmpty)),
                (b"", Utf8("wrap_body")),
            ],
        },
    ),
    (
        "wrap_body",
        Rules {
            default: State("wrap_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b"\t", State("wrap_body")),
                (b"\n", Accept(StrWrap)),
                (b"", Utf8("wrap_body")),
            ],
        },
    ),
    (
        "pipe_lead",
        Rules {
            default: State("pipe_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b" \t", State("pipe_sep")),
                (b"\n", Accept(StrPipeEmpty)),
                (b"", Utf8("pipe_body")),
            ],
        },
    ),
    (
        "pipe_sep",
        Rules {
            default: State("pipe_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b"\t", State("pipe_body")),
                (b"\n", Accept(StrPipeEmpty)),
                (b"", Utf8("pipe_body")),
            ],
        },
    ),
    (
        "pipe_body",
        Rules {
            default: State("pipe_body"),
            rules: &[
                (CONTROLS, Reject(Ctrl)),
                (b"\t", State("pipe_body")),
                (b"\n", Accept(StrPipe)),
                (b"", Utf8("pipe_body")),
            ],
        },
    ),
    (
        "bang",
        Rules {
            default: Reject(BangSuffix),
            rules: &[(b" \t", State("bang")), (b"\n", Accept(StrBang))],
        },
    ),
];

/// Accumulator micro-ops applied while a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acc {
    /// Append the token's hex payload to the data accumulator.
    Data,
    /// Append the payload of a `>`/`|` line to the string accumulator.
    Str,
    Nl,
    Sp,
}

/// Event constructors a transition can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EmitOp {
    Null,
    True,
    False,
    Inf,
    NegInf,
    Nan,
    Int,
    Float,
    Data,
    AccData,
    Str,
    AccStr,
    ShortArrayIn,
    ShortArrayOut,
    LongArrayIn,
    LongArrayOut,
    ShortMapIn,
    ShortMapOut,
    LongMapIn,
    LongMapOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyOp {
    Unquoted,
    Quoted,
}

/// One cell of the parse table, before compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub error: Option<ErrorCode>,
    pub emit: Option<EmitOp>,
    pub key: Option<KeyOp>,
    pub acc: &'static [Acc],
    /// Parse states to push; the leftmost is popped next.
    pub extend: &'static [&'static str],
}

pub(crate) struct ParseState {
    pub default: Transition,
    pub rules: &'static [(&'static [TokenKind], Transition)],
}

const NOP: Transition = Transition {
    error: None,
    emit: None,
    key: None,
    acc: &[],
    extend: &[],
};

const fn err(code: ErrorCode) -> Transition {
    Transition {
        error: Some(code),
        ..NOP
    }
}

const fn go(extend: &'static [&'static str]) -> Transition {
    Transition { extend, ..NOP }
}

const fn emit(op: EmitOp, extend: &'static [&'static str]) -> Transition {
    Transition {
        emit: Some(op),
        extend,
        ..NOP
    }
}

/// The parser's states; index 0 is the initial stack entry.
pub(crate) static PARSE_STATES: &[(&str, ParseState)] = &[
    (
        "root",
        ParseState {
            default: err(Internal),
            rules: &[(&[LineIn], go(&["lvalue"]))],
        },
    ),
    // A value opening at its own line level.
    (
        "lvalue",
        ParseState {
            default: err(Long),
            rules: &[
                (&[Null], emit(EmitOp::Null, &["s_eol"])),
                (&[True], emit(EmitOp::True, &["s_eol"])),
                (&[False], emit(EmitOp::False, &["s_eol"])),
                (&[Inf], emit(EmitOp::Inf, &["s_eol"])),
                (&[NegInf], emit(EmitOp::NegInf, &["s_eol"])),
                (&[Nan], emit(EmitOp::Nan, &["s_eol"])),
                (&[Int], emit(EmitOp::Int, &["s_eol"])),
                (&[Float], emit(EmitOp::Float, &["s_eol"])),
                (&[Str], emit(EmitOp::Str, &["s_eol"])),
                (
                    &[Data],
                    Transition {
                        acc: &[Acc::Data],
                        extend: &["xdata"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrap, StrPipe],
                    Transition {
                        acc: &[Acc::Str],
                        extend: &["xstr_wrap"],
                        ..NOP
                    },
                ),
                (&[StrWrapEmpty, StrPipeEmpty], go(&["xstr_break"])),
                (&[StrBang], go(&["xstr_bang"])),
                (&[ArrayIn], emit(EmitOp::ShortArrayIn, &["sarray_first", "s_eol"])),
                (&[MapIn], emit(EmitOp::ShortMapIn, &["smap_first", "s_eol"])),
                (&[Star], emit(EmitOp::LongArrayIn, &["xelem", "xarray_next"])),
                (
                    &[Key],
                    Transition {
                        emit: Some(EmitOp::LongMapIn),
                        key: Some(KeyOp::Unquoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        emit: Some(EmitOp::LongMapIn),
                        key: Some(KeyOp::Quoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (&[Comment], go(&["lvalue_cont"])),
            ],
        },
    ),
    // Comment lines seen where a value is still owed.
    (
        "lvalue_cont",
        ParseState {
            default: err(Long),
            rules: &[
                (&[LineEq], go(&["lvalue"])),
                (&[LineIn], go(&["cblock", "lvalue_cont"])),
            ],
        },
    ),
    // After a complete value at line level: only comments may follow.
    (
        "s_eol",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[Comment], go(&["s_eol"])),
                (&[LineEq], go(&["s_comment"])),
                (&[LineIn], go(&["cblock", "s_eol"])),
                (&[LineOut], go(&[])),
            ],
        },
    ),
    (
        "s_comment",
        ParseState {
            default: err(Sibling),
            rules: &[(&[Comment], go(&["s_eol"]))],
        },
    ),
    // A child block that may only contain comments.
    (
        "cblock",
        ParseState {
            default: err(Child),
            rules: &[(&[Comment], go(&["cb_eol"]))],
        },
    ),
    (
        "cb_eol",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[Comment], go(&["cb_eol"])),
                (&[LineEq], go(&["cblock"])),
                (&[LineIn], go(&["cblock", "cb_eol"])),
                (&[LineOut], go(&[])),
            ],
        },
    ),
    // Multi-line data accumulation at line level.
    (
        "xdata",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[Comment], go(&["xdata"])),
                (&[LineEq], go(&["xdata_line"])),
                (&[LineIn], go(&["cblock", "xdata"])),
                (&[LineOut], emit(EmitOp::AccData, &[])),
            ],
        },
    ),
    (
        "xdata_line",
        ParseState {
            default: err(Sibling),
            rules: &[
                (
                    &[Data],
                    Transition {
                        acc: &[Acc::Data],
                        extend: &["xdata"],
                        ..NOP
                    },
                ),
                (&[Comment], go(&["xdata"])),
            ],
        },
    ),
    // Long strings. `xstr_wrap` holds an open content line whose trailing
    // newline is owed; `xstr_break` holds cleanly broken content. The owed
    // newline is appended by the transition that sees what comes next.
    (
        "xstr_wrap",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xstr_wrap_line"])),
                (&[LineIn], go(&["cblock", "xstr_wrap"])),
                (
                    &[LineOut],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        ..NOP
                    },
                ),
            ],
        },
    ),
    (
        "xstr_wrap_line",
        ParseState {
            default: err(Sibling),
            rules: &[
                (
                    &[StrWrap],
                    Transition {
                        acc: &[Acc::Sp, Acc::Str],
                        extend: &["xstr_wrap"],
                        ..NOP
                    },
                ),
                (
                    &[StrPipe],
                    Transition {
                        acc: &[Acc::Nl, Acc::Str],
                        extend: &["xstr_wrap"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrapEmpty, StrPipeEmpty],
                    Transition {
                        acc: &[Acc::Nl],
                        extend: &["xstr_break"],
                        ..NOP
                    },
                ),
                (&[StrBang], go(&["xstr_bang"])),
                (&[Comment], go(&["xstr_wrap"])),
            ],
        },
    ),
    (
        "xstr_break",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xstr_break_line"])),
                (&[LineIn], go(&["cblock", "xstr_break"])),
                (
                    &[LineOut],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        ..NOP
                    },
                ),
            ],
        },
    ),
    (
        "xstr_break_line",
        ParseState {
            default: err(Sibling),
            rules: &[
                (
                    &[StrWrap, StrPipe],
                    Transition {
                        acc: &[Acc::Nl, Acc::Str],
                        extend: &["xstr_wrap"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrapEmpty, StrPipeEmpty],
                    Transition {
                        acc: &[Acc::Nl],
                        extend: &["xstr_break"],
                        ..NOP
                    },
                ),
                (&[StrBang], go(&["xstr_bang"])),
                (&[Comment], go(&["xstr_break"])),
            ],
        },
    ),
    (
        "xstr_bang",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xstr_bang_line"])),
                (&[LineIn], go(&["cblock", "xstr_bang"])),
                (&[LineOut], emit(EmitOp::AccStr, &[])),
            ],
        },
    ),
    (
        "xstr_bang_line",
        ParseState {
            default: err(BangLast),
            rules: &[(&[Comment], go(&["xstr_bang"]))],
        },
    ),
    // Long arrays: the element of a `*` and the between-element loop.
    (
        "xelem",
        ParseState {
            default: err(Long),
            rules: &[(&[LineIn], go(&["lvalue"]))],
        },
    ),
    (
        "xarray_next",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xarray_sib"])),
                (&[LineIn], go(&["cblock", "xarray_next"])),
                (&[LineOut], emit(EmitOp::LongArrayOut, &[])),
            ],
        },
    ),
    (
        "xarray_sib",
        ParseState {
            default: err(Sibling),
            rules: &[
                (&[Star], go(&["xelem", "xarray_next"])),
                (&[Comment], go(&["xarray_next"])),
            ],
        },
    ),
    // Long maps: the value position after `key:`, and the entry loops.
    (
        "xmvalue",
        ParseState {
            default: err(Long),
            rules: &[
                (&[Null], emit(EmitOp::Null, &["xmap_eol"])),
                (&[True], emit(EmitOp::True, &["xmap_eol"])),
                (&[False], emit(EmitOp::False, &["xmap_eol"])),
                (&[Inf], emit(EmitOp::Inf, &["xmap_eol"])),
                (&[NegInf], emit(EmitOp::NegInf, &["xmap_eol"])),
                (&[Nan], emit(EmitOp::Nan, &["xmap_eol"])),
                (&[Int], emit(EmitOp::Int, &["xmap_eol"])),
                (&[Float], emit(EmitOp::Float, &["xmap_eol"])),
                (&[Str], emit(EmitOp::Str, &["xmap_eol"])),
                (&[Data], emit(EmitOp::Data, &["xmap_eol"])),
                (&[ArrayIn], emit(EmitOp::ShortArrayIn, &["sarray_first", "xmap_eol"])),
                (&[MapIn], emit(EmitOp::ShortMapIn, &["smap_first", "xmap_eol"])),
                (
                    &[StrWrap, StrPipe],
                    Transition {
                        acc: &[Acc::Str],
                        extend: &["xmstr_wrap", "xmap_next"],
                        ..NOP
                    },
                ),
                (&[StrWrapEmpty, StrPipeEmpty], go(&["xmstr_break", "xmap_next"])),
                (&[StrBang], go(&["xmstr_bang", "xmap_next"])),
                (&[LineIn], go(&["lvalue", "xmap_next"])),
                (&[Comment], go(&["xmvalue"])),
            ],
        },
    ),
    // End of line after an inline map value.
    (
        "xmap_eol",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[Comment], go(&["xmap_eol"])),
                (&[LineEq], go(&["xmap_sib"])),
                (&[LineIn], go(&["cblock", "xmap_eol"])),
                (&[LineOut], emit(EmitOp::LongMapOut, &[])),
            ],
        },
    ),
    (
        "xmap_next",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xmap_sib"])),
                (&[LineIn], go(&["cblock", "xmap_next"])),
                (&[LineOut], emit(EmitOp::LongMapOut, &[])),
            ],
        },
    ),
    (
        "xmap_sib",
        ParseState {
            default: err(Sibling),
            rules: &[
                (
                    &[Key],
                    Transition {
                        key: Some(KeyOp::Unquoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        key: Some(KeyOp::Quoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (&[Comment], go(&["xmap_next"])),
            ],
        },
    ),
    // Long strings opening inline after `key:`. Deeper lines continue in
    // the plain string states; a sibling key line closes the string and
    // starts the next entry in one transition.
    (
        "xmstr_wrap",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xmstr_line"])),
                (&[LineIn], go(&["xstr_wrap_line"])),
                (
                    &[LineOut],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        ..NOP
                    },
                ),
            ],
        },
    ),
    (
        "xmstr_line",
        ParseState {
            default: err(Sibling),
            rules: &[
                (
                    &[Key],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        key: Some(KeyOp::Unquoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        key: Some(KeyOp::Quoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrap],
                    Transition {
                        acc: &[Acc::Sp, Acc::Str],
                        extend: &["xmstr_wrap"],
                        ..NOP
                    },
                ),
                (
                    &[StrPipe],
                    Transition {
                        acc: &[Acc::Nl, Acc::Str],
                        extend: &["xmstr_wrap"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrapEmpty, StrPipeEmpty],
                    Transition {
                        acc: &[Acc::Nl],
                        extend: &["xmstr_break"],
                        ..NOP
                    },
                ),
                (&[StrBang], go(&["xmstr_bang"])),
            ],
        },
    ),
    (
        "xmstr_break",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xmstr_break_line"])),
                (&[LineIn], go(&["xstr_break_line"])),
                (
                    &[LineOut],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        ..NOP
                    },
                ),
            ],
        },
    ),
    (
        "xmstr_break_line",
        ParseState {
            default: err(Sibling),
            rules: &[
                (
                    &[Key],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        key: Some(KeyOp::Unquoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        acc: &[Acc::Nl],
                        emit: Some(EmitOp::AccStr),
                        key: Some(KeyOp::Quoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrap, StrPipe],
                    Transition {
                        acc: &[Acc::Nl, Acc::Str],
                        extend: &["xmstr_wrap"],
                        ..NOP
                    },
                ),
                (
                    &[StrWrapEmpty, StrPipeEmpty],
                    Transition {
                        acc: &[Acc::Nl],
                        extend: &["xmstr_break"],
                        ..NOP
                    },
                ),
                (&[StrBang], go(&["xmstr_bang"])),
            ],
        },
    ),
    (
        "xmstr_bang",
        ParseState {
            default: err(Suffix),
            rules: &[
                (&[LineEq], go(&["xmstr_bang_line"])),
                (&[LineIn], go(&["cblock", "xmstr_bang"])),
                (&[LineOut], emit(EmitOp::AccStr, &[])),
            ],
        },
    ),
    (
        "xmstr_bang_line",
        ParseState {
            default: err(BangLast),
            rules: &[
                (
                    &[Key],
                    Transition {
                        emit: Some(EmitOp::AccStr),
                        key: Some(KeyOp::Unquoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        emit: Some(EmitOp::AccStr),
                        key: Some(KeyOp::Quoted),
                        extend: &["xmvalue"],
                        ..NOP
                    },
                ),
                (&[Comment], go(&["xmstr_bang"])),
            ],
        },
    ),
    // Short (bracketed) containers.
    (
        "sarray_first",
        ParseState {
            default: err(Short),
            rules: &[
                (&[ArrayOut], emit(EmitOp::ShortArrayOut, &[])),
                (&[Null], emit(EmitOp::Null, &["sarray_next"])),
                (&[True], emit(EmitOp::True, &["sarray_next"])),
                (&[False], emit(EmitOp::False, &["sarray_next"])),
                (&[Inf], emit(EmitOp::Inf, &["sarray_next"])),
                (&[NegInf], emit(EmitOp::NegInf, &["sarray_next"])),
                (&[Nan], emit(EmitOp::Nan, &["sarray_next"])),
                (&[Int], emit(EmitOp::Int, &["sarray_next"])),
                (&[Float], emit(EmitOp::Float, &["sarray_next"])),
                (&[Str], emit(EmitOp::Str, &["sarray_next"])),
                (&[Data], emit(EmitOp::Data, &["sarray_next"])),
                (&[ArrayIn], emit(EmitOp::ShortArrayIn, &["sarray_first", "sarray_next"])),
                (&[MapIn], emit(EmitOp::ShortMapIn, &["smap_first", "sarray_next"])),
            ],
        },
    ),
    (
        "sarray_elem",
        ParseState {
            default: err(Short),
            rules: &[
                (&[Null], emit(EmitOp::Null, &["sarray_next"])),
                (&[True], emit(EmitOp::True, &["sarray_next"])),
                (&[False], emit(EmitOp::False, &["sarray_next"])),
                (&[Inf], emit(EmitOp::Inf, &["sarray_next"])),
                (&[NegInf], emit(EmitOp::NegInf, &["sarray_next"])),
                (&[Nan], emit(EmitOp::Nan, &["sarray_next"])),
                (&[Int], emit(EmitOp::Int, &["sarray_next"])),
                (&[Float], emit(EmitOp::Float, &["sarray_next"])),
                (&[Str], emit(EmitOp::Str, &["sarray_next"])),
                (&[Data], emit(EmitOp::Data, &["sarray_next"])),
                (&[ArrayIn], emit(EmitOp::ShortArrayIn, &["sarray_first", "sarray_next"])),
                (&[MapIn], emit(EmitOp::ShortMapIn, &["smap_first", "sarray_next"])),
            ],
        },
    ),
    (
        "sarray_next",
        ParseState {
            default: err(ArrayEnd),
            rules: &[
                (&[Comma], go(&["sarray_elem"])),
                (&[ArrayOut], emit(EmitOp::ShortArrayOut, &[])),
            ],
        },
    ),
    (
        "smap_first",
        ParseState {
            default: err(MapKey),
            rules: &[
                (&[MapOut], emit(EmitOp::ShortMapOut, &[])),
                (
                    &[Key],
                    Transition {
                        key: Some(KeyOp::Unquoted),
                        extend: &["smvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        key: Some(KeyOp::Quoted),
                        extend: &["smvalue"],
                        ..NOP
                    },
                ),
            ],
        },
    ),
    (
        "smap_key",
        ParseState {
            default: err(MapKey),
            rules: &[
                (
                    &[Key],
                    Transition {
                        key: Some(KeyOp::Unquoted),
                        extend: &["smvalue"],
                        ..NOP
                    },
                ),
                (
                    &[Qkey],
                    Transition {
                        key: Some(KeyOp::Quoted),
                        extend: &["smvalue"],
                        ..NOP
                    },
                ),
            ],
        },
    ),
    (
        "smvalue",
        ParseState {
            default: err(Short),
            rules: &[
                (&[Null], emit(EmitOp::Null, &["smap_next"])),
                (&[True], emit(EmitOp::True, &["smap_next"])),
                (&[False], emit(EmitOp::False, &["smap_next"])),
                (&[Inf], emit(EmitOp::Inf, &["smap_next"])),
                (&[NegInf], emit(EmitOp::NegInf, &["smap_next"])),
                (&[Nan], emit(EmitOp::Nan, &["smap_next"])),
                (&[Int], emit(EmitOp::Int, &["smap_next"])),
                (&[Float], emit(EmitOp::Float, &["smap_next"])),
                (&[Str], emit(EmitOp::Str, &["smap_next"])),
                (&[Data], emit(EmitOp::Data, &["smap_next"])),
                (&[ArrayIn], emit(EmitOp::ShortArrayIn, &["sarray_first", "smap_next"])),
                (&[MapIn], emit(EmitOp::ShortMapIn, &["smap_first", "smap_next"])),
            ],
        },
    ),
    (
        "smap_next",
        ParseState {
            default: err(MapEnd),
            rules: &[
                (&[Comma], go(&["smap_key"])),
                (&[MapOut], emit(EmitOp::ShortMapOut, &[])),
            ],
        },
    ),
];
