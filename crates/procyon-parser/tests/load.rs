use indoc::indoc;
use pretty_assertions::assert_eq;
use procyon_parser::{loads, ErrorCode, Map, Value};

fn arr(items: Vec<Value>) -> Value {
    Value::Array(items)
}

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Map>(),
    )
}

fn data(bytes: &[u8]) -> Value {
    Value::Data(bytes.to_vec())
}

fn err(input: &str) -> ErrorCode {
    loads(input).unwrap_err().code
}

#[test]
fn constants() {
    assert_eq!(loads("null").unwrap(), Value::Null);
    assert_eq!(loads("true").unwrap(), Value::from(true));
    assert_eq!(loads("false").unwrap(), Value::from(false));
    assert_eq!(loads("inf").unwrap(), Value::from(f64::INFINITY));
    assert_eq!(loads("+inf").unwrap(), Value::from(f64::INFINITY));
    assert_eq!(loads("-inf").unwrap(), Value::from(f64::NEG_INFINITY));
    assert_eq!(loads("nan").unwrap(), Value::from(f64::NAN));
    assert_eq!(err("floop"), ErrorCode::BadWord);
}

#[test]
fn integers() {
    assert_eq!(loads("0").unwrap(), Value::from(0i64));
    assert_eq!(loads("1").unwrap(), Value::from(1i64));
    assert_eq!(loads("+1").unwrap(), Value::from(1i64));
    assert_eq!(loads("-1").unwrap(), Value::from(-1i64));
    assert_eq!(loads("9223372036854775807").unwrap(), Value::from(i64::MAX));
    assert_eq!(err("9223372036854775808"), ErrorCode::IntOverflow);
    assert_eq!(loads("-9223372036854775808").unwrap(), Value::from(i64::MIN));
    assert_eq!(err("-9223372036854775809"), ErrorCode::IntOverflow);
}

#[test]
fn floats() {
    assert_eq!(loads("0.0").unwrap(), Value::from(0.0));
    assert_eq!(loads("0.5").unwrap(), Value::from(0.5));
    assert_eq!(loads("0e0").unwrap(), Value::from(0.0));
    assert_eq!(loads("0.5e0").unwrap(), Value::from(0.5));
    assert_eq!(loads("1e999").unwrap(), Value::from(f64::INFINITY));
    assert_eq!(loads("5e-324").unwrap(), Value::from(5e-324));
    assert_eq!(
        loads("2.2250738585072014e-308").unwrap(),
        Value::from(2.2250738585072014e-308)
    );
}

#[test]
fn data_literals() {
    assert_eq!(loads("$").unwrap(), data(b""));
    assert_eq!(err("$0"), ErrorCode::Partial);
    assert_eq!(loads("$00").unwrap(), data(b"\x00"));
    assert_eq!(loads("$ 00").unwrap(), data(b"\x00"));
    assert_eq!(err("$ 0 0"), ErrorCode::Partial);
    assert_eq!(loads("$00112233").unwrap(), data(b"\x00\x11\x22\x33"));

    assert_eq!(err("$ 00 $ 01"), ErrorCode::Suffix);
    assert_eq!(loads("$ 00\n$ 01\n").unwrap(), data(b"\x00\x01"));

    assert_eq!(
        loads("# 00\n$ 01\n# 02\n$ 03\n# 04\n").unwrap(),
        data(b"\x01\x03")
    );

    assert_eq!(
        loads("[$, $1f, $ffff, $ 0f 1e 2d 3c]").unwrap(),
        arr(vec![
            data(b""),
            data(b"\x1f"),
            data(b"\xff\xff"),
            data(b"\x0f\x1e\x2d\x3c"),
        ])
    );

    assert!(loads("[$abcd\n$1234]\n").is_err());
}

#[test]
fn short_strings() {
    assert_eq!(loads("\"\"").unwrap(), Value::from(""));
    assert_eq!(loads("\"yo whaddup\"").unwrap(), Value::from("yo whaddup"));
    assert_eq!(
        loads("\"\\/\\\"\\\\\\b\\f\\n\\r\\t\"").unwrap(),
        Value::from("/\"\\\u{8}\u{c}\n\r\t")
    );
    assert_eq!(err("\"\\v\""), ErrorCode::BadEsc);

    assert_eq!(err("\"\\u000\""), ErrorCode::BadUesc);
    assert_eq!(loads("\"\\u0001\"").unwrap(), Value::from("\u{1}"));
    assert_eq!(loads("\"\\u0012\"").unwrap(), Value::from("\u{12}"));
    assert_eq!(loads("\"\\u0123\"").unwrap(), Value::from("\u{123}"));
    assert_eq!(loads("\"\\u1234\"").unwrap(), Value::from("\u{1234}"));
    assert_eq!(loads("\"\\U0001F600\"").unwrap(), Value::from("\u{1F600}"));
}

#[test]
fn long_strings() {
    assert_eq!(loads(">").unwrap(), Value::from("\n"));
    assert_eq!(loads("|").unwrap(), Value::from("\n"));
    assert_eq!(loads("!").unwrap(), Value::from(""));
    assert_eq!(loads("> ").unwrap(), Value::from("\n"));
    assert_eq!(loads("| ").unwrap(), Value::from("\n"));
    assert_eq!(loads("! ").unwrap(), Value::from(""));
    assert_eq!(loads(">\t").unwrap(), Value::from("\n"));
    assert_eq!(loads("|\t").unwrap(), Value::from("\n"));
    assert_eq!(loads("!\t").unwrap(), Value::from(""));
    assert_eq!(loads(">>").unwrap(), Value::from(">\n"));
    assert_eq!(loads("||").unwrap(), Value::from("|\n"));
    assert_eq!(err("!!"), ErrorCode::BangSuffix);

    assert_eq!(err("!\n>\n"), ErrorCode::BangLast);
    assert_eq!(err("!\n|\n"), ErrorCode::BangLast);
    assert_eq!(err("!\n!\n"), ErrorCode::BangLast);

    assert_eq!(loads("> one").unwrap(), Value::from("one\n"));
    assert_eq!(loads("| one").unwrap(), Value::from("one\n"));
    assert_eq!(err("! one"), ErrorCode::BangSuffix);
    assert_eq!(loads("| one\n| two").unwrap(), Value::from("one\ntwo\n"));
    assert_eq!(loads("| one\n> two\n!\n").unwrap(), Value::from("one two"));

    assert_eq!(loads("| one\n!\n# two\n").unwrap(), Value::from("one"));

    assert_eq!(
        loads(">\n> Line two\n> of three.\n>\n").unwrap(),
        Value::from("\nLine two of three.\n\n")
    );

    assert_eq!(
        loads(">\n>\n> Line three\n> of five.\n>\n>\n").unwrap(),
        Value::from("\n\nLine three of five.\n\n\n")
    );

    assert_eq!(
        loads("> Paragraph\n> one.\n>\n> Paragraph\n> two.\n").unwrap(),
        Value::from("Paragraph one.\n\nParagraph two.\n")
    );

    assert_eq!(
        loads("> One.\n>\n> Two.\n!\n").unwrap(),
        Value::from("One.\n\nTwo.")
    );

    assert_eq!(
        loads(
            "| Four score and seven years ago our fathers brought forth on this\n\
             > continent a new nation, conceived in liberty, and dedicated to the\n\
             > proposition that all men are created equal.\n\
             !\n"
        )
        .unwrap(),
        Value::from(
            "Four score and seven years ago our fathers brought forth on \
             this continent a new nation, conceived in liberty, and \
             dedicated to the proposition that all men are created equal."
        )
    );

    assert_eq!(
        loads(
            "| Space: the final frontier.\n\
             >\n\
             | These are the voyages of the starship Enterprise. Its five-year mission:\n\
             > to explore strange new worlds, to seek out new life and new\n\
             > civilizations, to boldly go where no man has gone before.\n"
        )
        .unwrap(),
        Value::from(
            "Space: the final frontier.\n\
             \n\
             These are the voyages of the starship Enterprise. Its five-year \
             mission: to explore strange new worlds, to seek out new life and new \
             civilizations, to boldly go where no man has gone before.\n"
        )
    );
}

#[test]
fn short_arrays() {
    assert_eq!(loads("[]").unwrap(), arr(vec![]));
    assert_eq!(loads("[0]").unwrap(), arr(vec![Value::from(0i64)]));
    assert_eq!(
        loads("[[[0]]]").unwrap(),
        arr(vec![arr(vec![arr(vec![Value::from(0i64)])])])
    );
    assert_eq!(
        loads("[1, 2, 3]").unwrap(),
        arr(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)])
    );
    assert_eq!(
        loads("[1, [2, [3]]]").unwrap(),
        arr(vec![
            Value::from(1i64),
            arr(vec![Value::from(2i64), arr(vec![Value::from(3i64)])]),
        ])
    );

    assert_eq!(err("["), ErrorCode::Short);
    assert_eq!(err("[1"), ErrorCode::ArrayEnd);
    assert_eq!(err("[1,"), ErrorCode::Short);

    assert_eq!(err("[}"), ErrorCode::Short);
    assert_eq!(err("[1}"), ErrorCode::ArrayEnd);
    assert_eq!(err("[1, }"), ErrorCode::Short);
}

#[test]
fn long_arrays() {
    assert_eq!(loads("* 0").unwrap(), arr(vec![Value::from(0i64)]));
    assert_eq!(
        loads("* * * 0").unwrap(),
        arr(vec![arr(vec![arr(vec![Value::from(0i64)])])])
    );
    assert_eq!(
        loads("* 1\n* 2\n* 3\n").unwrap(),
        arr(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)])
    );

    assert_eq!(
        loads("* 1\n* * 2\n  * * 3\n").unwrap(),
        arr(vec![
            Value::from(1i64),
            arr(vec![Value::from(2i64), arr(vec![Value::from(3i64)])]),
        ])
    );
    assert_eq!(
        loads("*\n  1\n*\n  *\n    2\n  *\n    *\n      3\n").unwrap(),
        arr(vec![
            Value::from(1i64),
            arr(vec![Value::from(2i64), arr(vec![Value::from(3i64)])]),
        ])
    );

    assert_eq!(
        loads("* 1\n# :)\n* 2\n  # :(\n* 3\n# :|\n").unwrap(),
        arr(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)])
    );

    assert!(loads("* 1\n  * 2\n    * 3\n").is_err());
    assert_eq!(err("* * 1\n * 2\n"), ErrorCode::Outdent);
    assert_eq!(err("*"), ErrorCode::Long);
}

#[test]
fn short_maps() {
    assert_eq!(loads("{}").unwrap(), map(vec![]));
    assert_eq!(
        loads("{0: false}").unwrap(),
        map(vec![("0", Value::from(false))])
    );
    assert_eq!(
        loads("{0: {1: {2: 3}}}").unwrap(),
        map(vec![(
            "0",
            map(vec![("1", map(vec![("2", Value::from(3i64))]))]),
        )])
    );
    assert_eq!(
        loads("{one: 1, two: 2, three: 3}").unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            ("two", Value::from(2i64)),
            ("three", Value::from(3i64)),
        ])
    );

    assert_eq!(err("{"), ErrorCode::MapKey);
    assert_eq!(err("{1"), ErrorCode::MapKey);
    assert_eq!(err("{1,"), ErrorCode::MapKey);
    assert_eq!(err("{1:"), ErrorCode::Short);
    assert_eq!(err("{1: 1"), ErrorCode::MapEnd);
    assert_eq!(err("{1: 1,"), ErrorCode::MapKey);

    assert_eq!(err("{]"), ErrorCode::MapKey);
    assert_eq!(err("{1: ]"), ErrorCode::Short);
    assert_eq!(err("{1: 1 ]"), ErrorCode::MapEnd);
    assert_eq!(err("{1: 1, ]"), ErrorCode::MapKey);
}

#[test]
fn long_maps() {
    assert_eq!(loads(": null").unwrap(), map(vec![("", Value::Null)]));
    assert_eq!(loads("zero: 0").unwrap(), map(vec![("zero", Value::from(0i64))]));
    assert_eq!(
        loads("one:\n  two:\n    three: 0").unwrap(),
        map(vec![("one", map(vec![("two", map(vec![("three", Value::from(0i64))]))]))])
    );
    assert_eq!(
        loads("one: 1\ntwo: 2\nthree: 3\n").unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            ("two", Value::from(2i64)),
            ("three", Value::from(3i64)),
        ])
    );

    assert_eq!(
        loads(indoc! {"
            one: 1
            and:
              two: 2
              and:
                three: 3
        "})
        .unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            (
                "and",
                map(vec![
                    ("two", Value::from(2i64)),
                    ("and", map(vec![("three", Value::from(3i64))])),
                ]),
            ),
        ])
    );
    assert_eq!(
        loads("one:\n  1\nand:\n  two:\n    2\n  and:\n    three:\n      3\n").unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            (
                "and",
                map(vec![
                    ("two", Value::from(2i64)),
                    ("and", map(vec![("three", Value::from(3i64))])),
                ]),
            ),
        ])
    );
    assert_eq!(
        loads("one:\n\n  1\ntwo:\n  \n  2\nthree:\n\t\n  3\n").unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            ("two", Value::from(2i64)),
            ("three", Value::from(3i64)),
        ])
    );

    assert_eq!(err("one: 1\n  two: 2\n    three: 3\n"), ErrorCode::Child);
    assert_eq!(
        loads("one: 1\n# :)\ntwo: 2\n     # :(\nthree: 3\n").unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            ("two", Value::from(2i64)),
            ("three", Value::from(3i64)),
        ])
    );
    assert_eq!(
        // The stray comment does not match the indentation of '2'.
        loads("one: 1\n# :)\ntwo: 2\n  # :)\nthree: 3\n").unwrap(),
        map(vec![
            ("one", Value::from(1i64)),
            ("two", Value::from(2i64)),
            ("three", Value::from(3i64)),
        ])
    );

    assert_eq!(
        loads("\"\": \"\"\n\":\": \":\"\n").unwrap(),
        map(vec![("", Value::from("")), (":", Value::from(":"))])
    );

    assert_eq!(
        loads(
            "\"\\u0001\": $01\n\
             \"\\n\": $0a\n\
             \"\\u007f\": $7f\n\
             \"\\u0080\": $c280\n\
             \"\\u72ac\\u524d\": $e78aac e5898d\n"
        )
        .unwrap(),
        map(vec![
            ("\u{1}", data(b"\x01")),
            ("\n", data(b"\n")),
            ("\u{7f}", data(b"\x7f")),
            ("\u{80}", data(b"\xc2\x80")),
            ("\u{72ac}\u{524d}", data(b"\xe7\x8a\xac\xe5\x89\x8d")),
        ])
    );
}

#[test]
fn equivalent_spellings() {
    assert_eq!(loads("!").unwrap(), loads("\"\"").unwrap());
    assert_eq!(loads("|\n!").unwrap(), loads("\"\"").unwrap());
    assert_eq!(loads("|").unwrap(), loads("\"\\n\"").unwrap());
    assert_eq!(loads("|\n>\n!").unwrap(), loads("\"\\n\"").unwrap());
    assert_eq!(loads("{1: 2}").unwrap(), loads("1: 2").unwrap());
    assert_eq!(loads("[1]").unwrap(), loads("* 1").unwrap());
}

#[test]
fn composite_document() {
    let source = "us:\n\
                  \x20 name:     \"United States of America\"\n\
                  \x20 ratio:    1.9\n\
                  \x20 stars:    50\n\
                  \x20 stripes:  13\n\
                  \x20 colors:   [$b22234, $ffffff, $3c3b6e]\n\
                  \x20 nicknames:\n\
                  \x20   * \"The Stars and Stripes\"\n\
                  \x20   * \"Old Glory\"\n\
                  \x20   * \"The Star-Spangled Banner\"\n\
                  cl:\n\
                  \x20 name:     \"Republic of Chile\"\n\
                  \x20 ratio:    1.5\n\
                  \x20 stars:    1\n\
                  \x20 stripes:  2\n\
                  \x20 colors:   [$da291c, $ffffff, $0033a0]\n\
                  cu:\n\
                  \x20 name:     \"Republic of Cuba\"\n\
                  \x20 ratio:    2.0\n\
                  \x20 stars:    1\n\
                  \x20 stripes:  5\n\
                  \x20 colors:   [$cb1515, $ffffff, $002a8f]\n";
    assert_eq!(
        loads(source).unwrap(),
        map(vec![
            (
                "us",
                map(vec![
                    ("name", Value::from("United States of America")),
                    ("ratio", Value::from(1.9)),
                    ("stars", Value::from(50i64)),
                    ("stripes", Value::from(13i64)),
                    (
                        "colors",
                        arr(vec![
                            data(b"\xb2\x22\x34"),
                            data(b"\xff\xff\xff"),
                            data(b"\x3c\x3b\x6e"),
                        ]),
                    ),
                    (
                        "nicknames",
                        arr(vec![
                            Value::from("The Stars and Stripes"),
                            Value::from("Old Glory"),
                            Value::from("The Star-Spangled Banner"),
                        ]),
                    ),
                ]),
            ),
            (
                "cl",
                map(vec![
                    ("name", Value::from("Republic of Chile")),
                    ("ratio", Value::from(1.5)),
                    ("stars", Value::from(1i64)),
                    ("stripes", Value::from(2i64)),
                    (
                        "colors",
                        arr(vec![
                            data(b"\xda\x29\x1c"),
                            data(b"\xff\xff\xff"),
                            data(b"\x00\x33\xa0"),
                        ]),
                    ),
                ]),
            ),
            (
                "cu",
                map(vec![
                    ("name", Value::from("Republic of Cuba")),
                    ("ratio", Value::from(2.0)),
                    ("stars", Value::from(1i64)),
                    ("stripes", Value::from(5i64)),
                    (
                        "colors",
                        arr(vec![
                            data(b"\xcb\x15\x15"),
                            data(b"\xff\xff\xff"),
                            data(b"\x00\x2a\x8f"),
                        ]),
                    ),
                ]),
            ),
        ])
    );
}

#[test]
fn comment_placement() {
    assert_eq!(err("# comment"), ErrorCode::Long);
    assert_eq!(err("* # comment"), ErrorCode::Long);

    assert_eq!(loads("true# comment").unwrap(), Value::from(true));
    assert_eq!(loads("true # comment").unwrap(), Value::from(true));
    assert_eq!(loads("true\n# comment").unwrap(), Value::from(true));
    assert_eq!(loads("1# comment").unwrap(), Value::from(1i64));
    assert_eq!(loads("1 # comment").unwrap(), Value::from(1i64));
    assert_eq!(loads("1\n# comment").unwrap(), Value::from(1i64));
    assert_eq!(loads("\"\"# comment").unwrap(), Value::from(""));
    assert_eq!(loads("\"\" # comment").unwrap(), Value::from(""));
    assert_eq!(loads("\"\"\n# comment").unwrap(), Value::from(""));
    assert_eq!(loads("$00# comment").unwrap(), data(b"\x00"));
    assert_eq!(loads("$00 # comment").unwrap(), data(b"\x00"));
    assert_eq!(loads("$00\n# comment").unwrap(), data(b"\x00"));
    assert_eq!(loads("># comment").unwrap(), Value::from("# comment\n"));
    assert_eq!(loads("> # comment").unwrap(), Value::from("# comment\n"));
    assert_eq!(loads(">\n# comment").unwrap(), Value::from("\n"));

    assert_eq!(
        loads("* # comment\n  1\n").unwrap(),
        arr(vec![Value::from(1i64)])
    );
    assert_eq!(
        loads("* # comment\n  # etc\n  1\n").unwrap(),
        arr(vec![Value::from(1i64)])
    );

    assert_eq!(
        loads("* 1\n  # comment\n").unwrap(),
        arr(vec![Value::from(1i64)])
    );
    assert_eq!(
        loads("* 1\n  # comment\n  # etc\n").unwrap(),
        arr(vec![Value::from(1i64)])
    );
    assert_eq!(
        loads("* 1\n# parent\n  # child\n").unwrap(),
        arr(vec![Value::from(1i64)])
    );
}

#[test]
fn one_value_per_line() {
    assert_eq!(err("1 1"), ErrorCode::Suffix);
    assert_eq!(err("1\n1"), ErrorCode::Sibling);
}

#[test]
fn junk_documents() {
    assert_eq!(err("&"), ErrorCode::BadChar);
    assert_eq!(err(""), ErrorCode::Long);
    assert_eq!(err("]"), ErrorCode::Long);
}

#[test]
fn star_depth_boundary() {
    assert!(loads(&format!("{}null", "*".repeat(63))).is_ok());
    assert_eq!(
        err(&format!("{}null", "*".repeat(64))),
        ErrorCode::Recursion
    );
    assert_eq!(
        err(&format!("{}null", "*".repeat(100))),
        ErrorCode::Recursion
    );
    assert_eq!(
        err(&format!("{}null", "*".repeat(512))),
        ErrorCode::Recursion
    );
}
