#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::controller::{InferenceController, Outcome};
    use crate::domain::{FormField, PatientRecord};
    use crate::ml::artifact::tests::age_sex_artifact;
    use crate::tui::event::apply;
    use crate::tui::widgets::form::slider_bar;
    use crate::tui::{settle, ui, FormApp, KeyAction};

    fn demo_app() -> FormApp {
        FormApp::new(InferenceController::without_model("no model"))
    }

    fn key(code: KeyCode) -> KeyAction {
        KeyAction::from(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn screen(app: &FormApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_form_app_new() {
        let app = demo_app();
        assert!(app.is_running());
        assert!(app.last.is_none());
        assert!(!app.show_help);
        assert_eq!(app.focused_field(), FormField::Age);
        assert_eq!(app.model_status(), "DEMO MODE");
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(key(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(key(KeyCode::Down), KeyAction::FocusDown);
        assert_eq!(key(KeyCode::Char('k')), KeyAction::FocusUp);
        assert_eq!(key(KeyCode::Right), KeyAction::Increase);
        assert_eq!(key(KeyCode::Char('h')), KeyAction::Decrease);
        assert_eq!(key(KeyCode::Enter), KeyAction::Submit);
        assert_eq!(key(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(
            KeyAction::from(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = demo_app();
        app.focus_prev();
        assert_eq!(app.focused_field(), FormField::StSlope);
        app.focus_next();
        assert_eq!(app.focused_field(), FormField::Age);
    }

    #[test]
    fn test_adjust_focused_field() {
        let mut app = demo_app();
        apply(&mut app, KeyAction::Increase);
        apply(&mut app, KeyAction::Increase);
        assert_eq!(app.form.collect_inputs().age, 52);

        apply(&mut app, KeyAction::FocusDown);
        apply(&mut app, KeyAction::Increase);
        assert_eq!(app.form.collect_inputs().sex.to_string(), "F");
    }

    #[test]
    fn test_submit_without_model_uses_heuristic() {
        let mut app = demo_app();
        apply(&mut app, KeyAction::Submit);
        let submission = app.last.as_ref().unwrap();
        assert!(matches!(submission.outcome, Outcome::ModelUnavailable(_)));
        assert_eq!(submission.record, PatientRecord::default());
        assert_eq!(submission.row.len(), 11);
        assert_eq!(app.submissions, 1);
    }

    #[test]
    fn test_reset_clears_result() {
        let mut app = demo_app();
        apply(&mut app, KeyAction::Increase);
        apply(&mut app, KeyAction::Submit);
        apply(&mut app, KeyAction::Reset);
        assert!(app.last.is_none());
        assert_eq!(app.form.collect_inputs(), PatientRecord::default());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = demo_app();
        apply(&mut app, KeyAction::Help);
        assert!(app.show_help);
        apply(&mut app, KeyAction::Quit);
        assert!(!app.show_help);
        assert!(app.is_running());
        apply(&mut app, KeyAction::Quit);
        assert!(!app.is_running());
    }

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.0), "[----------------]");
        assert_eq!(slider_bar(1.0), "[================]");
        assert_eq!(slider_bar(0.5), "[========--------]");
    }

    #[test]
    fn test_render_initial_screen() {
        let text = screen(&demo_app());
        assert!(text.contains("Heart Disease Risk Prediction"));
        assert!(text.contains("PATIENT DATA"));
        assert!(text.contains("press Enter to predict"));
        assert!(text.contains("[DEMO MODE]"));
    }

    #[test]
    fn test_render_shows_load_notice_before_submit() {
        let app = FormApp::new(InferenceController::without_model(
            "Model unavailable (model file heart.json not found)",
        ));
        let text = screen(&app);
        assert!(text.contains("model file heart.json not found"));
        assert!(text.contains("press Enter to predict"));
    }

    #[test]
    fn test_render_no_notice_with_model() {
        let app = FormApp::new(InferenceController::with_model(Arc::new(age_sex_artifact())));
        let text = screen(&app);
        assert!(!text.contains("Model unavailable"));
        assert!(text.contains("press Enter to predict"));
    }

    #[test]
    fn test_render_fallback_result() {
        let mut app = demo_app();
        app.submit();
        let text = screen(&app);
        assert!(text.contains("Demo mode"));
        assert!(text.contains("Medium risk"));
        assert!(text.contains("40.0%"));
    }

    #[test]
    fn test_render_model_result_and_data() {
        let mut app = FormApp::new(InferenceController::with_model(Arc::new(age_sex_artifact())));
        for _ in 0..40 {
            apply(&mut app, KeyAction::Increase);
        }
        apply(&mut app, KeyAction::Submit);
        apply(&mut app, KeyAction::ToggleData);

        let text = screen(&app);
        assert!(text.contains("HIGH RISK of heart disease"));
        assert!(text.contains("Consult a cardiologist"));
        assert!(text.contains("Model confidence"));
        assert!(text.contains("SUBMITTED"));
        assert!(text.contains("[MODEL: DENSE]"));
    }

    #[test]
    fn test_render_model_info() {
        let mut app = demo_app();
        apply(&mut app, KeyAction::ToggleInfo);
        let text = screen(&app);
        assert!(text.contains("MODEL INFO"));
        assert!(text.contains("Model not loaded"));
    }

    #[test]
    fn test_loop_error_survives_restore_error() {
        let err = settle(
            Err(std::io::Error::other("draw failed")),
            Err(std::io::Error::other("restore failed")),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "draw failed");
    }

    #[test]
    fn test_restore_error_reported_after_clean_loop() {
        let err = settle(Ok(()), Err(std::io::Error::other("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restore failed");
        assert!(settle(Ok(()), Ok(())).is_ok());
    }
}
