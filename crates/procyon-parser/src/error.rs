use thiserror::Error;

/// Error codes shared by the lexer and the parser.
///
/// The ordinals are stable: they match the terminal cells of the compiled
/// lexer table and are safe to persist or compare across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Ok = 0,
    Internal = 1,
    System = 2,

    Outdent = 3,

    Child = 4,
    Sibling = 5,
    Suffix = 6,
    Long = 7,
    Short = 8,
    ArrayEnd = 9,
    MapKey = 10,
    MapEnd = 11,
    Ctrl = 12,
    NonAscii = 13,
    Utf8Head = 14,
    Utf8Tail = 15,
    BadChar = 16,
    DataChar = 17,
    Partial = 18,
    BadWord = 19,
    BadEsc = 20,
    BadUesc = 21,
    StrEol = 22,
    BangSuffix = 23,
    BangLast = 24,
    IntOverflow = 25,
    InvalidInt = 26,
    FloatOverflow = 27,
    InvalidFloat = 28,
    Recursion = 29,
}

impl ErrorCode {
    pub(crate) fn from_ordinal(n: u8) -> ErrorCode {
        use ErrorCode::*;
        match n {
            0 => Ok,
            1 => Internal,
            2 => System,
            3 => Outdent,
            4 => Child,
            5 => Sibling,
            6 => Suffix,
            7 => Long,
            8 => Short,
            9 => ArrayEnd,
            10 => MapKey,
            11 => MapEnd,
            12 => Ctrl,
            13 => NonAscii,
            14 => Utf8Head,
            15 => Utf8Tail,
            16 => BadChar,
            17 => DataChar,
            18 => Partial,
            19 => BadWord,
            20 => BadEsc,
            21 => BadUesc,
            22 => StrEol,
            23 => BangSuffix,
            24 => BangLast,
            25 => IntOverflow,
            26 => InvalidInt,
            27 => FloatOverflow,
            28 => InvalidFloat,
            29 => Recursion,
            _ => Internal,
        }
    }

    /// The canonical message for this code.
    pub fn message(self) -> &'static str {
        use ErrorCode::*;
        match self {
            Ok => "ok",
            Internal => "internal error",
            System => "system error",
            Outdent => "unindent does not match any outer indentation level",
            Child => "unexpected child",
            Sibling => "unexpected sibling",
            Suffix => "expected end-of-line",
            Long | Short => "expected value",
            ArrayEnd => "expected ',' or ']'",
            MapKey => "expected key",
            MapEnd => "expected ',' or '}'",
            Ctrl => "invalid control character",
            NonAscii => "invalid non-ASCII character",
            Utf8Head => "invalid UTF-8 start byte",
            Utf8Tail => "invalid UTF-8 continuation byte",
            BadChar => "invalid character",
            DataChar => "word char in data",
            Partial => "partial byte",
            BadWord => "unknown word",
            BadEsc => "invalid escape",
            BadUesc => "invalid \\uXXXX escape",
            StrEol => "eol while scanning string",
            BangSuffix => "expected eol after '!'",
            BangLast => "expected eos after '!'",
            IntOverflow => "integer overflow",
            InvalidInt => "invalid integer",
            FloatOverflow => "float overflow",
            InvalidFloat => "invalid float",
            Recursion => "recursion limit exceeded",
        }
    }
}

/// A decode failure with its source position.
///
/// `lineno` and `column` are 1-based. The display form is
/// `line:column: message`, which is what the command-line tools print.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{lineno}:{column}: {}", .code.message())]
pub struct DecodeError {
    pub code: ErrorCode,
    pub lineno: u64,
    pub column: u64,
}

impl DecodeError {
    pub(crate) fn new(code: ErrorCode, lineno: u64, column: u64) -> DecodeError {
        DecodeError {
            code,
            lineno,
            column,
        }
    }
}
