use super::*;

#[test]
fn field_keeps_only_latest_text() {
    let mut field = MemoryField::default();
    field.write("one");
    field.write("two");
    assert_eq!(field.text(), "two");
    assert_eq!(field.writes(), 2);
}

#[test]
fn log_scrolls_to_the_tail() {
    let mut log = MemoryLog::new(2);
    assert!(log.visible().is_empty());
    for line in ["a", "b", "c"] {
        log.append_line(line);
    }
    assert_eq!(log.lines().len(), 3);
    assert_eq!(log.scroll_top(), 1);
    assert_eq!(log.visible(), ["b", "c"]);
}

#[test]
fn zero_window_still_shows_a_line() {
    let mut log = MemoryLog::new(0);
    log.append_line("only");
    assert_eq!(log.visible(), ["only"]);
}
