use crate::application::{App, AppMode, FormStep};
use crate::domain::DeedExporter;
use crate::infrastructure::SubmissionSink;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Dispatches one key press against the current application mode.
    ///
    /// `today` is the clock for projection and deed stamping; the caller
    /// provides it so the handlers stay deterministic under test.
    pub fn handle_key_event(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
        today: NaiveDate,
        sink: &dyn SubmissionSink,
    ) {
        match app.mode {
            AppMode::Form => Self::handle_form_mode(app, key, modifiers, today, sink),
            AppMode::Editing => Self::handle_editing_mode(app, key, today),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportDeed => Self::handle_export_mode(app, key, today),
        }
    }

    fn handle_form_mode(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
        today: NaiveDate,
        sink: &dyn SubmissionSink,
    ) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('e') = key {
                app.start_export();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous_field();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next_field();
            }
            KeyCode::Tab => {
                app.advance_step();
            }
            KeyCode::BackTab => {
                app.retreat_step();
            }
            KeyCode::Enter | KeyCode::F(2) => {
                if app.step == FormStep::Review {
                    let result = sink.submit(&app.record);
                    app.set_submit_result(result);
                } else {
                    app.start_editing();
                }
            }
            KeyCode::Char('a') if app.step == FormStep::Beneficiaries => {
                app.add_beneficiary();
            }
            KeyCode::Char('d') if app.step == FormStep::Beneficiaries => {
                app.remove_selected_beneficiary();
            }
            KeyCode::Char('p') if app.step == FormStep::FinancialGoals => {
                app.show_projection(today);
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode, today: NaiveDate) {
        match key {
            KeyCode::Enter => {
                app.finish_editing(today);
            }
            KeyCode::Esc => {
                app.cancel_editing();
            }
            _ => Self::edit_buffer(&mut app.input, &mut app.cursor_position, key),
        }
    }

    /// Text editing shared by the field editor and the filename dialog.
    ///
    /// The cursor is a byte offset that must stay on a char boundary, so
    /// every movement and deletion steps by the width of the adjacent
    /// character rather than by one byte.
    fn edit_buffer(buffer: &mut String, cursor: &mut usize, key: KeyCode) {
        match key {
            KeyCode::Backspace => {
                if let Some(prev) = buffer[..*cursor].chars().next_back() {
                    *cursor -= prev.len_utf8();
                    buffer.remove(*cursor);
                }
            }
            KeyCode::Delete => {
                if *cursor < buffer.len() {
                    buffer.remove(*cursor);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = buffer[..*cursor].chars().next_back() {
                    *cursor -= prev.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(next) = buffer[*cursor..].chars().next() {
                    *cursor += next.len_utf8();
                }
            }
            KeyCode::Home => {
                *cursor = 0;
            }
            KeyCode::End => {
                *cursor = buffer.len();
            }
            KeyCode::Char(c) => {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Form;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_export_mode(app: &mut App, key: KeyCode, today: NaiveDate) {
        match key {
            KeyCode::Enter => {
                let filename = app.export_filename();
                let result = DeedExporter::export_to_file(&app.record, &filename, today);
                app.set_export_result(result);
            }
            KeyCode::Esc => {
                app.cancel_filename_input();
            }
            _ => Self::edit_buffer(&mut app.filename_input, &mut app.cursor_position, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrustApplication;

    struct RecordingSink;

    impl SubmissionSink for RecordingSink {
        fn submit(&self, _record: &TrustApplication) -> Result<String, String> {
            Ok("test-sink".to_string())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE, today(), &RecordingSink);
    }

    fn press_ctrl(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::CONTROL, today(), &RecordingSink);
    }

    #[test]
    fn test_tab_navigates_steps() {
        let mut app = App::default();

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.step, FormStep::Beneficiaries);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.step, FormStep::BasicInfo);

        // Clamped at the first step.
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.step, FormStep::BasicInfo);
    }

    #[test]
    fn test_export_key_binding_opens_dialog() {
        let mut app = App::default();

        press_ctrl(&mut app, KeyCode::Char('e'));

        assert!(matches!(app.mode, AppMode::ExportDeed));
        assert_eq!(app.filename_input, "trust-deed.txt");
    }

    #[test]
    fn test_export_filename_editing_and_cancel() {
        let mut app = App::default();
        press_ctrl(&mut app, KeyCode::Char('e'));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.filename_input, "trust-deed.txtx");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filename_input, "trust-deed.txt");

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Form));
        assert!(app.filename_input.is_empty());
    }

    #[test]
    fn test_field_edit_round_trip() {
        let mut app = App::default();

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, AppMode::Editing));

        for c in "Jane Doe".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, AppMode::Form));
        assert_eq!(app.record.settlor.full_name, "Jane Doe");
    }

    #[test]
    fn test_field_edit_accepts_multibyte_input() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);

        // Typing after an accented character must not split it.
        press(&mut app, KeyCode::Char('é'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input, "ée");

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert!(app.input.is_empty());

        for c in "Renée".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('z'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.record.settlor.full_name, "Renzé");
    }

    #[test]
    fn test_field_edit_deletes_multibyte_from_start() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);

        for c in "éa".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.record.settlor.full_name, "a");
    }

    #[test]
    fn test_export_filename_accepts_multibyte_input() {
        let mut app = App::default();
        press_ctrl(&mut app, KeyCode::Char('e'));

        press(&mut app, KeyCode::Char('é'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.filename_input, "trust-deed.txtée");

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.filename_input, "trust-deed.txt");
    }

    #[test]
    fn test_escape_discards_edit() {
        let mut app = App::default();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('x'));

        press(&mut app, KeyCode::Esc);

        assert!(matches!(app.mode, AppMode::Form));
        assert!(app.record.settlor.full_name.is_empty());
    }

    #[test]
    fn test_beneficiary_keys_only_on_step_two() {
        let mut app = App::default();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.record.beneficiaries.len(), 1);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.record.beneficiaries.len(), 2);

        // Selection moved to the new entry; 'd' removes it again.
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.record.beneficiaries.len(), 1);
    }

    #[test]
    fn test_projection_key_on_step_three() {
        let mut app = App::default();
        app.record = app.record.with_field(
            crate::domain::FieldRef::Financial(crate::domain::FinancialField::GoalAmount),
            "600".to_string(),
        );
        app.record = app.record.with_field(
            crate::domain::FieldRef::Financial(crate::domain::FinancialField::TargetDate),
            "2026-09-01".to_string(),
        );

        press(&mut app, KeyCode::Char('p'));
        assert!(!app.projection_visible);

        app.step = FormStep::FinancialGoals;
        press(&mut app, KeyCode::Char('p'));

        assert!(app.projection_visible);
        assert!((app.projection.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_enter_on_review_submits() {
        let mut app = App::default();
        app.step = FormStep::Review;

        press(&mut app, KeyCode::Enter);

        assert!(app
            .status_message
            .unwrap()
            .contains("Trust fund created (test-sink)"));
    }

    #[test]
    fn test_help_toggle() {
        let mut app = App::default();

        press(&mut app, KeyCode::F(1));
        assert!(matches!(app.mode, AppMode::Help));

        press(&mut app, KeyCode::Down);
        assert_eq!(app.help_scroll, 1);

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.mode, AppMode::Form));
    }
}
