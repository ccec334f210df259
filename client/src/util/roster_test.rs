use super::*;

fn friends() -> Roster<&'static str> {
    Roster::new(vec!["Budi", "Siti", "Agus"])
}

#[test]
fn cursor_yields_each_entry_once_in_order() {
    let roster = friends();
    let mut cursor = roster.cursor();
    assert_eq!(cursor.next(), Some(&"Budi"));
    assert_eq!(cursor.next(), Some(&"Siti"));
    assert_eq!(cursor.next(), Some(&"Agus"));
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.next(), None);
}

#[test]
fn restart_replays_from_the_beginning() {
    let roster = friends();
    let mut cursor = roster.cursor();
    let first_pass: Vec<_> = cursor.by_ref().copied().collect();
    cursor.restart();
    assert_eq!(cursor.position(), 0);
    let second_pass: Vec<_> = cursor.copied().collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn exhausted_cursor_yields_again_after_restart() {
    let roster = friends();
    let mut cursor = roster.cursor();
    cursor.by_ref().for_each(drop);
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.len(), 0);

    cursor.restart();
    assert_eq!(cursor.len(), 3);
    assert_eq!(cursor.next(), Some(&"Budi"));
}

#[test]
fn size_hint_tracks_remaining() {
    let roster = friends();
    let mut cursor = roster.cursor();
    assert_eq!(cursor.len(), 3);
    cursor.next();
    assert_eq!(cursor.len(), 2);
}

#[test]
fn empty_roster_ends_immediately() {
    let roster: Roster<u32> = Roster::default();
    assert!(roster.is_empty());
    assert_eq!(roster.cursor().next(), None);
}

#[test]
fn independent_cursors_do_not_share_position() {
    let roster = friends();
    let mut a = roster.cursor();
    a.next();
    let b = roster.cursor();
    assert_eq!(b.position(), 0);
    assert_eq!((&roster).into_iter().count(), roster.len());
}
