//! E2E tests for the submit and cancel paths

use crate::common::harness::ModalTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use form_modal::screen::Overflow;
use form_modal::FormValues;

/// Fill name, email and experience the way a keyboard user would
fn fill_required(harness: &mut ModalTestHarness, name: &str, email: &str, brackets_down: usize) {
    harness.tab(1).unwrap();
    harness.type_text(name).unwrap();
    harness.tab(1).unwrap();
    harness.type_text(email).unwrap();
    harness.tab(1).unwrap();
    for _ in 0..brackets_down {
        harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    }
}

/// Valid submission resolves the values, closes the dialog and returns focus
#[test]
fn test_submit_valid_form() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();
    assert!(harness.is_dialog_open());

    // Down from the placeholder lands on the first bracket; two more reach "4–7 years"
    fill_required(&mut harness, "TEST", "test@test.com", 3);
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(
        harness.take_result(),
        Some(Some(FormValues {
            name: "TEST".into(),
            email: "test@test.com".into(),
            experience_years: "4–7 years".into(),
            github_url: String::new(),
        }))
    );
    assert!(!harness.is_dialog_open());
    assert_eq!(harness.layer_count(), 0);
    assert_eq!(harness.focused_page_element(), Some(harness.apply_button()));
    assert_eq!(harness.screen().body().overflow(), Overflow::Auto);

    harness.render().unwrap();
    harness.assert_screen_not_contains("Name / nickname");
}

/// Empty submission shows three errors and keeps the dialog open
#[test]
fn test_submit_empty_form() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    harness.click_text("[ Submit ]").unwrap();

    assert!(harness.is_dialog_open());
    assert!(harness.is_result_pending());
    assert_eq!(harness.take_result(), None);
    assert_eq!(harness.focused_id().as_deref(), Some("name"));

    harness.render().unwrap();
    harness.assert_screen_contains("Please enter your name or nickname.");
    harness.assert_screen_contains("Please enter a valid email address.");
    harness.assert_screen_contains("Please select your years of frontend experience.");
    harness.assert_screen_not_contains("Please enter a valid URL.");
}

/// Escape cancels, unlocks scrolling and returns focus to the trigger
#[test]
fn test_escape_cancels() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();
    assert_eq!(harness.screen().body().overflow(), Overflow::Hidden);

    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.take_result(), Some(None));
    assert_eq!(harness.screen().body().overflow(), Overflow::Auto);
    assert_eq!(harness.focused_page_element(), Some(harness.apply_button()));
    assert!(!harness.opener().lock().is_held());
}

/// A press on the dimmed overlay cancels like Escape
#[test]
fn test_overlay_click_cancels() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();
    harness.tab(1).unwrap();
    harness.type_text("half-filled").unwrap();

    harness.click(0, 39).unwrap();

    assert_eq!(harness.take_result(), Some(None));
    assert_eq!(harness.screen().body().overflow(), Overflow::Auto);
    assert_eq!(harness.focused_page_element(), Some(harness.apply_button()));
}

/// Presses inside the dialog never cancel
#[test]
fn test_click_inside_content_does_not_cancel() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    harness.click_text("Tell us a little").unwrap();
    harness.click_text("Application form").unwrap();
    harness.click_text("Email").unwrap();

    assert!(harness.is_dialog_open());
    assert!(harness.is_result_pending());
    assert_eq!(harness.focused_id().as_deref(), Some("email"));
}

/// The Cancel button resolves `None`
#[test]
fn test_cancel_button() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();

    // name, email, experience, github, cancel
    harness.tab(5).unwrap();
    assert_eq!(harness.focused_id().as_deref(), Some("cancel"));
    harness.send_key(KeyCode::Char(' '), KeyModifiers::NONE).unwrap();

    assert_eq!(harness.take_result(), Some(None));
    assert!(!harness.is_dialog_open());
}

/// An invalid GitHub link blocks submission until corrected
#[test]
fn test_github_link_validation() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.open_form().unwrap();
    fill_required(&mut harness, "Ada", "ada@example.org", 1);
    harness.tab(1).unwrap();
    harness.type_text("github.com/ada").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.take_result(), None);
    assert_eq!(harness.focused_id().as_deref(), Some("githubUrl"));
    harness.render().unwrap();
    harness.assert_screen_contains("Please enter a valid URL.");

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    harness.type_text("https://").unwrap();
    harness.render().unwrap();
    harness.assert_screen_not_contains("Please enter a valid URL.");

    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    let values = harness.take_result().flatten().unwrap();
    assert_eq!(values.github_url(), Some("https://github.com/ada"));
    assert_eq!(values.experience_years, "under 1 year");
}

/// The result can be awaited like any future
#[tokio::test]
async fn test_await_result() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    let pending = harness.open_direct(form_modal::OpenOptions::new());

    fill_required(&mut harness, "  Grace  ", " grace@navy.mil ", 4);
    harness.tab(2).unwrap(); // github, cancel
    harness.tab(1).unwrap(); // submit
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    let values = pending.await.unwrap();
    assert_eq!(values.name, "Grace");
    assert_eq!(values.email, "grace@navy.mil");
    assert_eq!(values.experience_years, "8+ years");
}
