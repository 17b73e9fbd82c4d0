//! E2E tests for the focus trap, focus restoration and the scroll lock

use crate::common::harness::ModalTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use form_modal::screen::Overflow;

#[test]
fn test_title_focused_on_open() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    assert_eq!(harness.focused_id().as_deref(), Some("modal-title"));
    assert_eq!(harness.active_element(), None);
}

#[test]
fn test_tab_never_leaves_the_dialog() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    let mut order = Vec::new();
    for _ in 0..13 {
        harness.tab(1).unwrap();
        order.push(harness.focused_id().unwrap());
        assert_eq!(harness.active_element(), None);
    }

    let ring = ["name", "email", "experienceYears", "githubUrl", "cancel", "submit"];
    let expected: Vec<String> = ring.iter().cycle().take(13).map(|s| s.to_string()).collect();
    assert_eq!(order, expected);
}

#[test]
fn test_shift_tab_cycles_backwards() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    // from the title, Shift+Tab enters the ring at its end
    harness.send_key(KeyCode::BackTab, KeyModifiers::SHIFT).unwrap();
    assert_eq!(harness.focused_id().as_deref(), Some("submit"));

    harness.send_key(KeyCode::Tab, KeyModifiers::SHIFT).unwrap();
    assert_eq!(harness.focused_id().as_deref(), Some("cancel"));

    harness.tab(2).unwrap();
    assert_eq!(harness.focused_id().as_deref(), Some("name"));
    harness.send_key(KeyCode::BackTab, KeyModifiers::SHIFT).unwrap();
    assert_eq!(harness.focused_id().as_deref(), Some("submit"));
}

#[test]
fn test_focus_returns_to_the_element_that_opened_the_dialog() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();

    // open from the second button this time
    let other = harness.other_button();
    harness.screen_mut().focus_element(other);
    let pending = harness.open_direct(form_modal::OpenOptions::new());
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();

    assert!(!pending.is_pending());
    assert_eq!(harness.focused_page_element(), Some(other));
}

#[test]
fn test_focus_restored_one_tick_after_settling() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    harness.send_key_untimed(KeyCode::Esc, KeyModifiers::NONE);

    assert_eq!(harness.take_result(), Some(None));
    assert!(!harness.opener().lock().is_held());
    assert_eq!(harness.active_element(), None);
    assert_eq!(harness.layer_count(), 1);
    assert!(!harness.is_dialog_open());

    // restore then unmount
    assert_eq!(harness.tick(), 2);
    assert_eq!(harness.active_element(), Some(harness.apply_button()));
    assert_eq!(harness.layer_count(), 0);
    assert_eq!(harness.tick(), 0);
}

#[test]
fn test_removed_trigger_leaves_focus_on_body() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    let apply = harness.apply_button();
    harness.screen_mut().page_mut().remove_element(apply);
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.take_result(), Some(None));
    assert_eq!(harness.focused_page_element(), None);
}

#[test]
fn test_page_does_not_scroll_while_open() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.screen().page().scroll_offset(), 0);

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.screen().page().scroll_offset(), 5);
}

#[test]
fn test_prior_hidden_overflow_is_restored() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.screen().body().set_overflow(Overflow::Hidden);

    harness.open_form().unwrap();
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.screen().body().overflow(), Overflow::Hidden);
}

#[test]
fn test_cursor_follows_focused_text_field() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();
    assert_eq!(harness.screen().cursor_position(), None);

    harness.tab(1).unwrap();
    let start = harness.screen().cursor_position().unwrap();
    harness.type_text("Ada").unwrap();
    let after = harness.screen().cursor_position().unwrap();

    assert_eq!(after.x, start.x + 3);
    assert_eq!(after.y, start.y);

    // the select shows no text cursor
    harness.tab(2).unwrap();
    assert_eq!(harness.screen().cursor_position(), None);
}

#[test]
fn test_cursor_stays_in_field_for_huge_prefill() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.set_open_options(form_modal::OpenOptions::new().initial_values(
        form_modal::PartialFormValues {
            name: Some("a".repeat(65_530)),
            ..Default::default()
        },
    ));
    harness.open_form().unwrap();

    harness.tab(1).unwrap();
    let cursor = harness.screen().cursor_position().unwrap();
    assert!(cursor.x < 100);

    harness.type_text("bc").unwrap();
    assert_eq!(harness.screen().cursor_position(), Some(cursor));
    harness.render().unwrap();
    harness.assert_screen_contains("aabc");
}
