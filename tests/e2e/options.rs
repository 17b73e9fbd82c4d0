//! E2E tests for per-call options and configured defaults

use crate::common::harness::ModalTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use form_modal::config::ModalConfig;
use form_modal::{OpenOptions, PartialFormValues};
use regex::Regex;

#[test]
fn test_initial_values_prefill_the_form() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.set_open_options(OpenOptions::new().initial_values(PartialFormValues {
        name: Some("Ada".into()),
        email: Some("ada@example.org".into()),
        experience_years: Some("1–3 years".into()),
        github_url: None,
    }));
    harness.open_form().unwrap();

    harness.render().unwrap();
    harness.assert_screen_contains("ada@example.org");
    harness.assert_screen_contains("1–3 years");

    harness.click_text("[ Submit ]").unwrap();
    let values = harness.take_result().flatten().unwrap();
    assert_eq!(values.name, "Ada");
    assert_eq!(values.experience_years, "1–3 years");
    assert_eq!(values.github_url(), None);
}

#[test]
fn test_initial_experience_outside_options_starts_unselected() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.set_open_options(OpenOptions::new().initial_values(PartialFormValues {
        experience_years: Some("20 years".into()),
        ..Default::default()
    }));
    harness.open_form().unwrap();

    harness.render().unwrap();
    harness.assert_screen_contains("Select…");
}

#[test]
fn test_custom_email_pattern_and_brackets() {
    let mut harness = ModalTestHarness::new(100, 40).unwrap();
    harness.set_open_options(
        OpenOptions::new()
            .title("Internal transfer")
            .description("Colleagues only.")
            .email_pattern(Regex::new(r"^[^@\s]+@corp\.example$").unwrap())
            .experience_options(vec!["junior".into(), "senior".into()]),
    );
    harness.open_form().unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("Internal transfer");
    harness.assert_screen_contains("Colleagues only.");

    harness.tab(1).unwrap();
    harness.type_text("Sam").unwrap();
    harness.tab(1).unwrap();
    harness.type_text("sam@gmail.com").unwrap();
    harness.tab(1).unwrap();
    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.take_result(), None);
    assert_eq!(harness.focused_id().as_deref(), Some("email"));

    for _ in 0.."gmail.com".len() {
        harness.send_key(KeyCode::Backspace, KeyModifiers::NONE).unwrap();
    }
    harness.type_text("corp.example").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    let values = harness.take_result().flatten().unwrap();
    assert_eq!(values.email, "sam@corp.example");
    assert_eq!(values.experience_years, "senior");
}

#[test]
fn test_configured_defaults() {
    let config = ModalConfig {
        title: "Open day sign-up".into(),
        max_width: 40,
        ..Default::default()
    };
    let mut harness = ModalTestHarness::with_config(100, 40, &config).unwrap();
    harness.open_form().unwrap();
    harness.render().unwrap();
    harness.assert_screen_contains("Open day sign-up");

    let dialog = harness.dialog().unwrap();
    assert_eq!(dialog.name, "Open day sign-up");
}

#[test]
fn test_invalid_configured_pattern_fails_early() {
    let config = ModalConfig {
        email_pattern: "[".into(),
        ..Default::default()
    };
    assert!(ModalTestHarness::with_config(100, 40, &config).is_err());
}
