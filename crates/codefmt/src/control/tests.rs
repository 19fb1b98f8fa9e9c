use pretty_assertions::assert_eq;

use super::*;

#[test]
fn control_bytes_match_protocol() {
    assert_eq!(ControlCode::EndOfLine.as_byte(), b'\n');
    assert_eq!(ControlCode::Indent.as_byte(), 0x0F);
    assert_eq!(ControlCode::Undent.as_byte(), 0x0E);
}

#[test]
fn from_byte_recognises_every_code() {
    for code in ControlCode::ALL {
        assert_eq!(ControlCode::from_byte(code.as_byte()), Some(code));
    }
}

#[test]
fn from_byte_rejects_content() {
    for byte in [b'a', b' ', b'\t', b'{', 0x0D, 0x10, 0xFF] {
        assert_eq!(ControlCode::from_byte(byte), None);
    }
}

#[test]
fn only_indent_and_undent_are_nesting() {
    assert!(!ControlCode::EndOfLine.is_nesting());
    assert!(ControlCode::Indent.is_nesting());
    assert!(ControlCode::Undent.is_nesting());
}

#[test]
fn display_writes_the_raw_character() {
    assert_eq!(format!("a{}b", eol()), "a\nb");
    assert_eq!(format!("{}{}", indent(), undent()), "\x0f\x0e");
}

#[test]
fn begin_sequence() {
    assert_eq!(begin('{'), "{\x0f\n");
    assert_eq!(begin('('), "(\x0f\n");
}

#[test]
fn end_sequence() {
    assert_eq!(end('}'), "\x0e\n}\n");
}

#[test]
fn soft_end_has_no_trailing_newline() {
    assert_eq!(soft_end('}'), "\x0e\n}");
    assert_eq!(format!("{}\n", soft_end(']')), end(']'));
}
