use super::*;
use pretty_assertions::assert_eq;

#[test]
fn unknown_is_unk_1_1() {
    let pos = Position::unknown();
    assert_eq!(pos.as_tuple(), ("UNK", 1, 1));
    assert!(pos.is_unknown());
}

#[test]
fn default_is_unknown() {
    assert_eq!(Position::default(), Position::unknown());
}

#[test]
fn real_position_is_not_unknown() {
    assert!(!Position::new("repl", 1, 1).is_unknown());
    assert!(!Position::new(UNKNOWN_SOURCE, 2, 1).is_unknown());
}

#[test]
fn at_keeps_source() {
    let pos = Position::new("main.nml", 3, 7);
    let moved = pos.at(4, 1);
    assert_eq!(moved.source(), "main.nml");
    assert_eq!(moved.line(), 4);
    assert_eq!(moved.column(), 1);
}

#[test]
fn display_and_debug() {
    let pos = Position::new("repl", 2, 9);
    assert_eq!(pos.to_string(), "repl:2:9");
    assert_eq!(format!("{pos:?}"), "(repl, 2, 9)");
}
