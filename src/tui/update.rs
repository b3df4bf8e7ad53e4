//! Session transitions: (Session, Action) → Transition.
//!
//! This is the core logic of the menu. Fully testable without a terminal.
//! Each screen defines what selecting each of its options means. Anything
//! a screen can't handle becomes a status message, never a panic.

use crate::registry::{Location, LookupError};
use crate::types::{FilterType, GraphField};

use super::state::{
    Action, Effect, Prompt, ReturnTo, Screen, Session, StatusMessage, Transition,
};

/// Static help shown by the main menu's "Help" entry.
pub const HELP_TEXT: &str =
    "This is a weather application that displays weather data for different countries.";

/// Apply one action to the session.
///
/// Every action clears the previous status message first, so a message
/// is only ever visible for the render right after it was produced.
pub fn update(session: &mut Session, action: &Action) -> Transition {
    session.message = None;

    match action {
        Action::MoveUp => session.move_up(),
        Action::MoveDown => session.move_down(),
        Action::ToggleControls => session.toggle_controls(),
        Action::ToggleGraph => session.toggle_graph(),
        Action::ToggleFilters => session.toggle_filters(),
        Action::Select => {
            let index = session.highlighted;
            return select(session, index);
        }
        Action::Quit => return Transition::Quit,
    }
    Transition::Continue
}

/// Run the active screen's selection handler for `index`.
pub fn select(session: &mut Session, index: usize) -> Transition {
    let count = session.screen.option_count();
    if index >= count {
        return invalid(session, index, count);
    }

    match session.screen {
        Screen::MainMenu => select_main_menu(session, index),
        Screen::GraphMenu => select_graph_menu(session, index),
        Screen::GraphSettingsMenu => select_graph_settings(session, index),
        Screen::FilterMenu => select_filter_menu(session, index),
        Screen::CountrySelectionMenu { return_to } => select_country(session, index, return_to),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Main menu: help, graph, prediction, country, quit.
fn select_main_menu(session: &mut Session, index: usize) -> Transition {
    match index {
        0 => {
            session.message = Some(StatusMessage::Info(HELP_TEXT.to_string()));
        }
        // Prediction shares the graph menu until it has its own screen.
        1 | 2 => session.change_screen(Screen::GraphMenu),
        3 => session.change_screen(Screen::CountrySelectionMenu {
            return_to: ReturnTo::MainMenu,
        }),
        4 => return Transition::Quit,
        _ => return invalid(session, index, session.screen.option_count()),
    }
    Transition::Continue
}

/// Graph menu: settings, filters, back.
fn select_graph_menu(session: &mut Session, index: usize) -> Transition {
    match index {
        0 => session.change_screen(Screen::GraphSettingsMenu),
        1 => session.change_screen(Screen::FilterMenu),
        2 => session.change_screen(Screen::MainMenu),
        _ => return invalid(session, index, session.screen.option_count()),
    }
    Transition::Continue
}

/// Graph settings: prompt for width or height, or go back.
fn select_graph_settings(session: &mut Session, index: usize) -> Transition {
    match index {
        0 => Transition::Effect(Effect::Prompt(Prompt::Graph(GraphField::Width))),
        1 => Transition::Effect(Effect::Prompt(Prompt::Graph(GraphField::Height))),
        2 => {
            session.change_screen(Screen::GraphMenu);
            Transition::Continue
        }
        _ => invalid(session, index, session.screen.option_count()),
    }
}

/// Filter menu: one entry per filter type, then Back.
///
/// Locations are picked from the registry instead of typed.
fn select_filter_menu(session: &mut Session, index: usize) -> Transition {
    match FilterType::ALL.get(index) {
        Some(FilterType::Location) => {
            session.change_screen(Screen::CountrySelectionMenu {
                return_to: ReturnTo::FilterMenu,
            });
            Transition::Continue
        }
        Some(kind) => Transition::Effect(Effect::Prompt(Prompt::Filter(*kind))),
        None if index == FilterType::ALL.len() => {
            session.change_screen(Screen::GraphMenu);
            Transition::Continue
        }
        None => invalid(session, index, session.screen.option_count()),
    }
}

/// Country picker: write the chosen location into the location filter.
fn select_country(session: &mut Session, index: usize, return_to: ReturnTo) -> Transition {
    let options = session.screen.options();
    let Some(label) = options.get(index) else {
        return invalid(session, index, options.len());
    };

    match Location::from_name(label) {
        Ok(location) => {
            session.data.set_filter(FilterType::Location, location.name());
            session.change_screen(return_to.screen());
            session.message = Some(StatusMessage::Info(format!("Location set to {}", location)));
        }
        Err(err) => {
            session.message = Some(StatusMessage::Error(err.to_string()));
        }
    }
    Transition::Continue
}

fn invalid(session: &mut Session, index: usize, count: usize) -> Transition {
    let err = SelectionError::Invalid { index, count };
    session.message = Some(StatusMessage::Error(err.to_string()));
    Transition::Continue
}

/// A selection index the active screen has no option for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    Invalid { index: usize, count: usize },
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::Invalid { count, .. } => write!(
                f,
                "Invalid choice! Please select a number between 1 and {}.",
                count
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

// ============================================================================
// PROMPT RESULTS
// ============================================================================

/// A typed value that can't be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    NotANumber(String),
    Zero,
    Lookup(LookupError),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Empty => write!(f, "Invalid value: nothing was entered"),
            InputError::NotANumber(raw) => write!(f, "Invalid value: '{}' is not a number", raw),
            InputError::Zero => write!(f, "Invalid value: must be greater than zero"),
            InputError::Lookup(err) => write!(f, "Invalid value: {}", err),
        }
    }
}

impl std::error::Error for InputError {}

/// Store the line typed in answer to `prompt`.
///
/// Rejected input becomes an error message and leaves the data untouched.
pub fn apply_input(session: &mut Session, prompt: Prompt, raw: &str) -> Transition {
    match store_input(session, prompt, raw) {
        Ok(()) => {}
        Err(err) => session.message = Some(StatusMessage::Error(err.to_string())),
    }
    Transition::Continue
}

fn store_input(session: &mut Session, prompt: Prompt, raw: &str) -> Result<(), InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InputError::Empty);
    }

    match prompt {
        Prompt::Filter(FilterType::Location) => {
            let location = Location::from_name(value).map_err(InputError::Lookup)?;
            session.data.set_filter(FilterType::Location, location.name());
        }
        Prompt::Filter(kind) => session.data.set_filter(kind, value),
        Prompt::Graph(field) => {
            let n: u32 = value
                .parse()
                .map_err(|_| InputError::NotANumber(value.to_string()))?;
            if n == 0 {
                return Err(InputError::Zero);
            }
            session.data.set_graph_field(field, n);
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DisplayOptions, GraphParameters, TransferData};

    fn session() -> Session {
        Session::new(TransferData::default(), DisplayOptions::default())
    }

    fn session_on(screen: Screen) -> Session {
        let mut s = session();
        s.change_screen(screen);
        s
    }

    fn is_invalid_choice(session: &Session) -> bool {
        matches!(&session.message, Some(StatusMessage::Error(m)) if m.starts_with("Invalid choice!"))
    }

    // -- Actions --

    #[test]
    fn quit_action_quits_from_every_screen() {
        let screens = [
            Screen::MainMenu,
            Screen::GraphMenu,
            Screen::GraphSettingsMenu,
            Screen::FilterMenu,
            Screen::CountrySelectionMenu { return_to: ReturnTo::MainMenu },
        ];
        for screen in screens {
            let mut s = session_on(screen);
            s.move_down();
            assert_eq!(update(&mut s, &Action::Quit), Transition::Quit);
        }
    }

    #[test]
    fn select_action_uses_highlighted_index() {
        let mut s = session();
        s.set_highlighted(1);
        assert_eq!(update(&mut s, &Action::Select), Transition::Continue);
        assert_eq!(s.screen, Screen::GraphMenu);
    }

    #[test]
    fn toggle_actions_flip_flags() {
        let mut s = session();
        update(&mut s, &Action::ToggleControls);
        update(&mut s, &Action::ToggleFilters);
        update(&mut s, &Action::ToggleGraph);
        assert!(!s.options.show_controls);
        assert!(s.options.show_filters);
        assert!(s.graph_overlay);
    }

    #[test]
    fn any_action_clears_previous_message() {
        let mut s = session();
        select(&mut s, 0);
        assert!(s.message.is_some());
        update(&mut s, &Action::MoveDown);
        assert!(s.message.is_none());
    }

    // -- MainMenu --

    #[test]
    fn main_menu_help_stays_and_shows_text() {
        let mut s = session();
        assert_eq!(select(&mut s, 0), Transition::Continue);
        assert_eq!(s.screen, Screen::MainMenu);
        assert_eq!(s.message, Some(StatusMessage::Info(HELP_TEXT.to_string())));
    }

    #[test]
    fn main_menu_graph_and_prediction_open_graph_menu() {
        for index in [1, 2] {
            let mut s = session();
            select(&mut s, index);
            assert_eq!(s.screen, Screen::GraphMenu);
        }
    }

    #[test]
    fn main_menu_select_country_opens_country_menu() {
        let mut s = session();
        select(&mut s, 3);
        assert_eq!(
            s.screen,
            Screen::CountrySelectionMenu { return_to: ReturnTo::MainMenu }
        );
    }

    #[test]
    fn main_menu_quit_entry_quits() {
        let mut s = session();
        assert_eq!(select(&mut s, 4), Transition::Quit);
    }

    // -- GraphMenu --

    #[test]
    fn graph_menu_transitions() {
        let expected = [
            Screen::GraphSettingsMenu,
            Screen::FilterMenu,
            Screen::MainMenu,
        ];
        for (index, target) in expected.into_iter().enumerate() {
            let mut s = session_on(Screen::GraphMenu);
            select(&mut s, index);
            assert_eq!(s.screen, target);
        }
    }

    // -- Invalid selections --

    #[test]
    fn out_of_range_selection_changes_nothing_but_message() {
        let mut s = session_on(Screen::GraphMenu);
        s.set_highlighted(1);
        let data_before = s.data.clone();

        assert_eq!(select(&mut s, 99), Transition::Continue);

        assert_eq!(s.screen, Screen::GraphMenu);
        assert_eq!(s.highlighted, 1);
        assert_eq!(s.data, data_before);
        assert!(is_invalid_choice(&s));
        assert!(s.message.as_ref().unwrap().text().ends_with("between 1 and 3."));
    }

    #[test]
    fn out_of_range_on_every_screen_is_invalid() {
        let screens = [
            Screen::MainMenu,
            Screen::GraphSettingsMenu,
            Screen::FilterMenu,
            Screen::CountrySelectionMenu { return_to: ReturnTo::FilterMenu },
        ];
        for screen in screens {
            let mut s = session_on(screen);
            let count = screen.option_count();
            assert_eq!(select(&mut s, count), Transition::Continue);
            assert_eq!(s.screen, screen);
            assert!(is_invalid_choice(&s), "{:?}", screen);
        }
    }

    #[test]
    fn selection_error_reports_one_based_range() {
        let err = SelectionError::Invalid { index: 7, count: 5 };
        assert_eq!(
            err.to_string(),
            "Invalid choice! Please select a number between 1 and 5."
        );
    }

    // -- GraphSettingsMenu --

    #[test]
    fn graph_settings_request_prompts() {
        let mut s = session_on(Screen::GraphSettingsMenu);
        assert_eq!(
            select(&mut s, 0),
            Transition::Effect(Effect::Prompt(Prompt::Graph(GraphField::Width)))
        );
        assert_eq!(
            select(&mut s, 1),
            Transition::Effect(Effect::Prompt(Prompt::Graph(GraphField::Height)))
        );
        assert_eq!(s.screen, Screen::GraphSettingsMenu);
    }

    #[test]
    fn graph_settings_back_returns_to_graph_menu() {
        let mut s = session_on(Screen::GraphSettingsMenu);
        select(&mut s, 2);
        assert_eq!(s.screen, Screen::GraphMenu);
    }

    #[test]
    fn graph_prompt_stores_positive_number() {
        let mut s = session_on(Screen::GraphSettingsMenu);
        apply_input(&mut s, Prompt::Graph(GraphField::Width), " 42\n");
        assert_eq!(s.data.graph, GraphParameters { width: 42, height: 10 });
        assert!(s.message.is_none());
    }

    #[test]
    fn graph_prompt_rejects_bad_numbers() {
        for raw in ["abc", "0", "-3", ""] {
            let mut s = session_on(Screen::GraphSettingsMenu);
            apply_input(&mut s, Prompt::Graph(GraphField::Height), raw);
            assert_eq!(s.data.graph, GraphParameters::default(), "input {:?}", raw);
            assert!(matches!(s.message, Some(StatusMessage::Error(_))));
        }
    }

    // -- FilterMenu --

    #[test]
    fn filter_menu_location_opens_country_picker() {
        let mut s = session_on(Screen::FilterMenu);
        assert_eq!(select(&mut s, 0), Transition::Continue);
        assert_eq!(
            s.screen,
            Screen::CountrySelectionMenu { return_to: ReturnTo::FilterMenu }
        );
    }

    #[test]
    fn filter_menu_time_range_prompts() {
        let mut s = session_on(Screen::FilterMenu);
        assert_eq!(
            select(&mut s, 1),
            Transition::Effect(Effect::Prompt(Prompt::Filter(FilterType::TimeRange)))
        );
        assert_eq!(s.screen, Screen::FilterMenu);
    }

    #[test]
    fn filter_menu_back_returns_to_graph_menu() {
        let mut s = session_on(Screen::FilterMenu);
        select(&mut s, 2);
        assert_eq!(s.screen, Screen::GraphMenu);
    }

    #[test]
    fn edited_time_range_is_visible_immediately() {
        let mut s = session_on(Screen::FilterMenu);
        let value = "2000-01-01T00:00:00Z|2010-01-01T00:00:00Z";
        apply_input(&mut s, Prompt::Filter(FilterType::TimeRange), value);

        let time_range: Vec<_> = s
            .data
            .filters
            .iter()
            .filter(|f| f.kind == FilterType::TimeRange)
            .collect();
        assert_eq!(time_range.len(), 1);
        assert_eq!(time_range[0].value, value);
        assert_eq!(s.screen, Screen::FilterMenu);
    }

    #[test]
    fn empty_filter_value_is_rejected() {
        let mut s = session_on(Screen::FilterMenu);
        let before = s.data.clone();
        apply_input(&mut s, Prompt::Filter(FilterType::TimeRange), "   ");
        assert_eq!(s.data, before);
        assert_eq!(
            s.message,
            Some(StatusMessage::Error(InputError::Empty.to_string()))
        );
    }

    #[test]
    fn typed_location_must_be_registered() {
        let mut s = session_on(Screen::FilterMenu);
        apply_input(&mut s, Prompt::Filter(FilterType::Location), "Atlantis");
        assert_eq!(
            s.data.filter(FilterType::Location).map(|f| f.value.as_str()),
            Some("Germany")
        );
        assert!(s.message.as_ref().unwrap().text().contains("Atlantis"));

        apply_input(&mut s, Prompt::Filter(FilterType::Location), "France");
        assert_eq!(
            s.data.filter(FilterType::Location).map(|f| f.value.as_str()),
            Some("France")
        );
    }

    // -- CountrySelectionMenu --

    #[test]
    fn country_pick_propagates_into_filters() {
        let screen = Screen::CountrySelectionMenu { return_to: ReturnTo::FilterMenu };
        let index = screen.options().iter().position(|n| *n == "Spain").unwrap();
        let mut s = session_on(screen);

        select(&mut s, index);

        assert_eq!(
            s.data.filter(FilterType::Location).map(|f| f.value.as_str()),
            Some("Spain")
        );
        assert_eq!(s.screen, Screen::FilterMenu);
        assert!(s.highlighted < Screen::FilterMenu.option_count());
    }

    #[test]
    fn country_pick_from_main_menu_returns_there() {
        let mut s = session();
        select(&mut s, 3);
        select(&mut s, 0);
        assert_eq!(s.screen, Screen::MainMenu);
        assert_eq!(
            s.data.filter(FilterType::Location).map(|f| f.value.as_str()),
            Some(Location::selectable().next().unwrap().name())
        );
    }
}
