use crate::rows::intent::Intent;
use crate::rows::reducer::{Reducer, ReducerError};
use crate::rows::state::CollectionState;
use crate::tui::handlers::{HelpModeAction, KeyHandler, NormalModeAction};
use crate::tui::navigation::NavigationState;
use anyhow::Result;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub struct App {
    pub state: CollectionState,
    pub reducer: Reducer,
    pub navigation: NavigationState,
    pub should_quit: bool,
    pub help_mode: bool,
    pub status: Option<String>,
}

impl App {
    pub fn new(state: CollectionState, reducer: Reducer) -> Self {
        Self {
            state,
            reducer,
            navigation: NavigationState::new(),
            should_quit: false,
            help_mode: false,
            status: None,
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            match KeyHandler::handle_help_mode_key(key_event) {
                HelpModeAction::ExitHelpMode => self.help_mode = false,
                HelpModeAction::None => {}
            }
            return Ok(());
        }

        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::Quit => self.should_quit = true,
            NormalModeAction::ClearStatus => self.status = None,
            NormalModeAction::MoveSelectionUp => self.navigation.move_selection_up(),
            NormalModeAction::MoveSelectionDown => {
                self.navigation.move_selection_down(self.row_count())
            }
            NormalModeAction::MoveSelectionTop => self.navigation.move_to_top(),
            NormalModeAction::MoveSelectionBottom => {
                self.navigation.move_to_bottom(self.row_count())
            }
            NormalModeAction::RemoveRow => self.remove_selected_row(),
            NormalModeAction::Undo => self.undo(),
            NormalModeAction::ToggleHelpMode => self.help_mode = true,
            NormalModeAction::None => {}
        }
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.state.records().len()
    }

    pub fn history_depth(&self) -> usize {
        self.state.history().len()
    }

    fn remove_selected_row(&mut self) {
        let index = self.navigation.selected_index;
        let Some(record) = self.state.records().get(index) else {
            return;
        };
        let intent = Intent::remove(record.id.clone(), index);

        if self.dispatch(intent).is_ok() {
            self.navigation.clamp(self.row_count());
        }
    }

    fn undo(&mut self) {
        // The undo control is disabled while there is nothing to undo.
        let Some(entry) = self.state.history().peek() else {
            return;
        };
        let restored_at = entry.original_index;

        if self.dispatch(Intent::Undo).is_ok() {
            self.navigation
                .select(restored_at.min(self.row_count().saturating_sub(1)));
        }
    }

    /// Runs `intent` through the reducer and swaps in the resulting state.
    /// Rejected intents leave the current state in place and set the status line.
    fn dispatch(&mut self, intent: Intent) -> Result<(), ReducerError> {
        tracing::debug!(intent = intent.tag(), "dispatching intent");

        match self.reducer.apply(&self.state, intent) {
            Ok(next) => {
                self.state = next;
                self.status = None;
                tracing::debug!(
                    rows = self.row_count(),
                    history = self.history_depth(),
                    "state replaced"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!("intent rejected: {}", e);
                self.status = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::history::{HistoryEntry, UndoStack};
    use crate::rows::models::{Record, default_seed};
    use crate::rows::reducer::RemovePolicy;
    use crossterm::event::KeyCode;

    fn create_app() -> App {
        let state = CollectionState::new(default_seed()).unwrap();
        App::new(state, Reducer::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code)).unwrap();
    }

    fn ids(app: &App) -> Vec<&str> {
        app.state.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_remove_selected_row() {
        let mut app = create_app();
        app.navigation.select(1);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(ids(&app), vec!["id-1", "id-3", "id-4", "id-5", "id-6"]);
        assert_eq!(app.history_depth(), 1);
        assert!(app.state.can_undo());
        assert_eq!(app.navigation.selected_index, 1);
    }

    #[test]
    fn test_undo_restores_row_and_moves_cursor_to_it() {
        let mut app = create_app();
        app.navigation.select(2);
        press(&mut app, KeyCode::Char('d'));
        app.navigation.select(0);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(ids(&app), vec!["id-1", "id-2", "id-3", "id-4", "id-5", "id-6"]);
        assert_eq!(app.navigation.selected_index, 2);
        assert!(!app.state.can_undo());
    }

    #[test]
    fn test_undo_is_gated_when_history_is_empty() {
        let mut app = create_app();
        let before = app.state.clone();

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.state, before);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_removing_last_row_clamps_selection() {
        let mut app = create_app();
        app.navigation.move_to_bottom(app.row_count());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.row_count(), 5);
        assert_eq!(app.navigation.selected_index, 4);
    }

    #[test]
    fn test_remove_on_empty_table_does_nothing() {
        let mut app = App::new(CollectionState::new(Vec::new()).unwrap(), Reducer::default());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.row_count(), 0);
        assert_eq!(app.history_depth(), 0);
    }

    #[test]
    fn test_remove_all_then_undo_all() {
        let mut app = create_app();
        for _ in 0..6 {
            press(&mut app, KeyCode::Char('d'));
        }
        assert_eq!(app.row_count(), 0);
        assert_eq!(app.history_depth(), 6);

        for _ in 0..6 {
            press(&mut app, KeyCode::Char('u'));
        }
        assert_eq!(ids(&app), vec!["id-1", "id-2", "id-3", "id-4", "id-5", "id-6"]);
        assert_eq!(app.history_depth(), 0);
    }

    #[test]
    fn test_rejected_intent_sets_status_and_keeps_state() {
        let mut app = create_app();
        let before = app.state.clone();

        let result = app.dispatch(Intent::remove("id-9", 0));
        assert!(matches!(result, Err(ReducerError::IndexMismatch { .. })));
        assert_eq!(app.state, before);
        assert!(app.status.as_deref().unwrap().contains("id-9"));

        press(&mut app, KeyCode::Esc);
        assert!(app.status.is_none());
    }

    #[test]
    fn test_undo_with_drifted_index_still_restores() {
        let mut history = UndoStack::new();
        history.push(HistoryEntry::new(Record::new("id-7", "Row 7"), 9, "id-7".to_string()));
        let state = CollectionState::from_parts(default_seed(), history);
        let mut app = App::new(state, Reducer::new(RemovePolicy::BestEffort));

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.row_count(), 7);
        assert_eq!(app.state.records()[6].id, "id-7");
        assert_eq!(app.navigation.selected_index, 6);
    }

    #[test]
    fn test_help_mode_toggle() {
        let mut app = create_app();

        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_mode);

        // Keys other than close are ignored in help mode
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.row_count(), 6);

        press(&mut app, KeyCode::Esc);
        assert!(!app.help_mode);
    }

    #[test]
    fn test_quit() {
        let mut app = create_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
