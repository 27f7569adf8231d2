use tile_scroller_system_text_entry::{TextEntry, TextEvent};

fn typed(text: &str) -> Vec<TextEvent> {
    text.chars().map(TextEvent::Typed).collect()
}

#[test]
fn accepts_letters_digits_and_spaces() {
    let mut entry = TextEntry::new();

    assert!(entry.handle(&typed("Player 1")));

    assert_eq!(entry.text(), "Player 1");
}

#[test]
fn drops_punctuation_and_non_ascii() {
    let mut entry = TextEntry::new();

    assert!(!entry.handle(&typed("!?-_é\t")));

    assert_eq!(entry.text(), "");
}

#[test]
fn stops_at_sixteen_characters() {
    let mut entry = TextEntry::new();

    let _ = entry.handle(&typed("abcdefghijklmnopqrstuvwxyz"));

    assert_eq!(entry.text(), "abcdefghijklmnop");
    assert!(entry.is_full());
    assert!(!entry.handle(&typed("z")), "full buffer must not change");
}

#[test]
fn backspace_removes_the_last_character() {
    let mut entry = TextEntry::new();
    let _ = entry.handle(&typed("ab"));

    assert!(entry.handle(&[TextEvent::Backspace]));
    assert_eq!(entry.text(), "a");

    let _ = entry.handle(&[TextEvent::Backspace, TextEvent::Backspace]);
    assert_eq!(entry.text(), "");
    assert!(!entry.handle(&[TextEvent::Backspace]), "empty buffer stays empty");
}

#[test]
fn backspace_frees_room_in_a_full_buffer() {
    let mut entry = TextEntry::with_capacity(3);
    let _ = entry.handle(&typed("abc"));

    let _ = entry.handle(&[TextEvent::Backspace, TextEvent::Typed('Z')]);

    assert_eq!(entry.text(), "abZ");
}
