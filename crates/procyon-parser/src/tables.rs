//! Compiles the declarative grammar into the packed run-time tables.
//!
//! The lexer side expands each state's byte-set rules into a 256-entry row,
//! generates the UTF-8 trailing-byte sub-states, and partitions identical
//! columns into byte equivalence classes. The parser side deduplicates
//! transition records into a shared definition array indexed by a dense
//! `state x token` table. Both run once, behind `Lazy`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::ErrorCode;
use crate::grammar::{self, Acc, EmitOp, KeyOp, LexState, LexTarget};
use crate::token::{TokenKind, CELL_DONE, CELL_OK, TOKEN_KIND_COUNT};

pub(crate) struct LexTables {
    /// Byte -> equivalence class.
    pub classes: [u8; 256],
    /// State x class -> packed cell.
    pub transitions: Vec<Vec<u8>>,
}

pub(crate) struct CompiledTransition {
    pub error: Option<ErrorCode>,
    pub emit: Option<EmitOp>,
    pub key: Option<KeyOp>,
    pub acc: &'static [Acc],
    pub extend: Vec<u8>,
}

pub(crate) struct ParseTables {
    pub defs: Vec<CompiledTransition>,
    /// State x token kind -> index into `defs`.
    pub table: Vec<[u8; TOKEN_KIND_COUNT]>,
}

pub(crate) fn lex() -> &'static LexTables {
    &LEX
}

pub(crate) fn parse() -> &'static ParseTables {
    &PARSE
}

static LEX: Lazy<LexTables> = Lazy::new(build_lex);
static PARSE: Lazy<ParseTables> = Lazy::new(build_parse);

/// Expand a byte-set pattern: plain bytes, `a-z` ranges, `-` literal only
/// in final position.
fn expand_pattern(pattern: &[u8], row: &mut [u8; 256], cell: u8) {
    let mut i = 0;
    while i < pattern.len() {
        if i + 2 < pattern.len() && pattern[i + 1] == b'-' {
            for b in pattern[i]..=pattern[i + 2] {
                row[b as usize] = cell;
            }
            i += 3;
        } else {
            row[pattern[i] as usize] = cell;
            i += 1;
        }
    }
}

/// The six trailing-byte sub-states plus their valid lead ranges; `head`
/// maps each multi-byte lead to the sub-state that checks its first
/// continuation byte, with the restricted heads (E0, ED, F0, F4) split out
/// so over-long forms and surrogates die on the continuation byte.
const UTF8_SUBSTATES: [(&str, u8, u8, &str); 7] = [
    ("u1", 0x80, 0xbf, ""),
    ("u2", 0x80, 0xbf, "u1"),
    ("u3", 0x80, 0xbf, "u2"),
    ("ua", 0xa0, 0xbf, "u1"),
    ("ub", 0x80, 0x9f, "u1"),
    ("uc", 0x90, 0xbf, "u2"),
    ("ud", 0x80, 0x8f, "u2"),
];

fn sub_name(kind: &str, ret: &str) -> String {
    format!("{kind}>{ret}")
}

fn build_lex() -> LexTables {
    // Pass 1: number the states, including generated UTF-8 sub-states.
    let mut names: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut add = |names: &mut Vec<String>, index: &mut HashMap<String, usize>, name: String| {
        if !index.contains_key(&name) {
            index.insert(name.clone(), names.len());
            names.push(name);
        }
    };
    let mut utf8_returns: Vec<&'static str> = Vec::new();
    for (name, state) in grammar::LEX_STATES {
        add(&mut names, &mut index, (*name).to_string());
        if let LexState::Rules { rules, .. } = state {
            for (_, target) in *rules {
                if let LexTarget::Utf8(ret) = target {
                    if !utf8_returns.contains(ret) {
                        utf8_returns.push(*ret);
                    }
                }
            }
        }
    }
    for ret in &utf8_returns {
        for (kind, _, _, _) in UTF8_SUBSTATES {
            add(&mut names, &mut index, sub_name(kind, ret));
        }
    }
    assert!(names.len() < 0x80, "lexer state index must fit in a cell");

    let resolve = |name: &str| -> u8 {
        match index.get(name) {
            Some(&i) => i as u8,
            None => panic!("unknown lex state {name:?}"),
        }
    };
    let cell = |target: &LexTarget| -> u8 {
        match target {
            LexTarget::State(s) => resolve(s),
            LexTarget::Accept(t) => CELL_DONE | CELL_OK | *t as u8,
            LexTarget::Reject(e) => CELL_DONE | *e as u8,
            LexTarget::Utf8(_) => panic!("utf8 target outside a rule"),
        }
    };

    // Pass 2: expand every state into a full 256-entry row.
    let mut rows: Vec<[u8; 256]> = Vec::with_capacity(names.len());
    for (_, state) in grammar::LEX_STATES {
        let mut row = [0u8; 256];
        match state {
            LexState::Simple(target) => row = [cell(target); 256],
            LexState::Rules { default, rules } => {
                row = [cell(default); 256];
                for (pattern, target) in *rules {
                    match target {
                        LexTarget::Utf8(ret) => expand_utf8(&mut row, ret, &resolve),
                        _ => expand_pattern(pattern, &mut row, cell(target)),
                    }
                }
            }
        }
        rows.push(row);
    }
    for ret in &utf8_returns {
        for (kind, lo, hi, next) in UTF8_SUBSTATES {
            let mut row = [CELL_DONE | ErrorCode::Utf8Tail as u8; 256];
            let target = if next.is_empty() {
                resolve(ret)
            } else {
                resolve(&sub_name(next, ret))
            };
            for b in lo..=hi {
                row[b as usize] = target;
            }
            rows.push(row);
        }
    }

    // Pass 3: partition identical columns into byte classes.
    let mut classes = [0u8; 256];
    let mut signatures: Vec<Vec<u8>> = Vec::new();
    for byte in 0..256 {
        let signature: Vec<u8> = rows.iter().map(|row| row[byte]).collect();
        let class = match signatures.iter().position(|s| *s == signature) {
            Some(i) => i,
            None => {
                signatures.push(signature);
                signatures.len() - 1
            }
        };
        classes[byte] = class as u8;
    }
    let transitions = (0..rows.len())
        .map(|state| signatures.iter().map(|s| s[state]).collect())
        .collect();

    LexTables {
        classes,
        transitions,
    }
}

fn expand_utf8(row: &mut [u8; 256], ret: &str, resolve: &dyn Fn(&str) -> u8) {
    for b in 0x80..=0xff_usize {
        row[b] = CELL_DONE | ErrorCode::Utf8Head as u8;
    }
    for b in 0xc2..=0xdf_usize {
        row[b] = resolve(&sub_name("u1", ret));
    }
    for b in 0xe1..=0xec_usize {
        row[b] = resolve(&sub_name("u2", ret));
    }
    for b in 0xee..=0xef_usize {
        row[b] = resolve(&sub_name("u2", ret));
    }
    for b in 0xf1..=0xf3_usize {
        row[b] = resolve(&sub_name("u3", ret));
    }
    row[0xe0] = resolve(&sub_name("ua", ret));
    row[0xed] = resolve(&sub_name("ub", ret));
    row[0xf0] = resolve(&sub_name("uc", ret));
    row[0xf4] = resolve(&sub_name("ud", ret));
}

fn build_parse() -> ParseTables {
    let mut index: HashMap<&'static str, u8> = HashMap::new();
    for (i, (name, _)) in grammar::PARSE_STATES.iter().enumerate() {
        index.insert(*name, i as u8);
    }

    let compile = |transition: &grammar::Transition| -> CompiledTransition {
        assert!(transition.acc.len() <= 4 && transition.extend.len() <= 4);
        CompiledTransition {
            error: transition.error,
            emit: transition.emit,
            key: transition.key,
            acc: transition.acc,
            extend: transition
                .extend
                .iter()
                .map(|name| match index.get(name) {
                    Some(&i) => i,
                    None => panic!("unknown parse state {name:?}"),
                })
                .collect(),
        }
    };
    let same = |a: &CompiledTransition, b: &CompiledTransition| -> bool {
        a.error == b.error
            && a.emit == b.emit
            && a.key == b.key
            && a.acc == b.acc
            && a.extend == b.extend
    };

    let mut defs: Vec<CompiledTransition> = Vec::new();
    let mut table: Vec<[u8; TOKEN_KIND_COUNT]> = Vec::new();
    for (_, state) in grammar::PARSE_STATES {
        let mut row = [0u8; TOKEN_KIND_COUNT];
        for (slot, cell) in row.iter_mut().enumerate() {
            let kind = TokenKind::from_ordinal(slot as u8);
            let transition = state
                .rules
                .iter()
                .find(|(kinds, _)| kinds.contains(&kind))
                .map(|(_, t)| t)
                .unwrap_or(&state.default);
            let compiled = compile(transition);
            let def = match defs.iter().position(|d| same(d, &compiled)) {
                Some(i) => i,
                None => {
                    defs.push(compiled);
                    defs.len() - 1
                }
            };
            assert!(def < 256);
            *cell = def as u8;
        }
        table.push(row);
    }

    ParseTables { defs, table }
}
