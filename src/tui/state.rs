//! Menu state algebra: the session, the screens, and what can happen to them.
//!
//! Screen variants carry only per-screen transient state (the country
//! picker's return target). Shared data lives in [`Session::data`].
//! Selection semantics live in `update`, drawing lives in `view`.

use std::sync::{Mutex, OnceLock};

use crate::registry::Location;
use crate::types::{DisplayOptions, FilterType, GraphField, TransferData};

// ============================================================================
// SESSION
// ============================================================================

/// Top-level menu model.
///
/// Owns the active screen and the shared transfer data. The effects layer
/// reads this to know what to render.
#[derive(Debug)]
pub struct Session {
    /// Active screen. Replaced wholesale on transition.
    pub screen: Screen,

    /// Focused option. Always `< screen.option_count()`.
    pub highlighted: usize,

    pub options: DisplayOptions,

    /// Whether the graph overlay should be drawn by the graph renderer.
    pub graph_overlay: bool,

    /// Filters and graph parameters, shared across screens.
    pub data: TransferData,

    /// Result of the last selection (help text, invalid choice, ...).
    pub message: Option<StatusMessage>,
}

static INSTANCE: OnceLock<Mutex<Session>> = OnceLock::new();

impl Session {
    /// Start on the main menu with the first option highlighted.
    pub fn new(data: TransferData, options: DisplayOptions) -> Self {
        Session {
            screen: Screen::default(),
            highlighted: 0,
            options,
            graph_overlay: false,
            data,
            message: None,
        }
    }

    /// Process-wide session. The first caller's arguments win; later
    /// callers get the same instance and their arguments are dropped.
    pub fn instance(data: TransferData, options: DisplayOptions) -> &'static Mutex<Session> {
        INSTANCE.get_or_init(|| Mutex::new(Session::new(data, options)))
    }

    /// Replace the active screen. Resets the highlight when it would
    /// fall outside the new screen's options.
    pub fn change_screen(&mut self, screen: Screen) {
        if self.highlighted >= screen.option_count() {
            self.highlighted = 0;
        }
        self.screen = screen;
    }

    pub fn set_display_options(&mut self, show_controls: Option<bool>, show_filters: Option<bool>) {
        self.options.set(show_controls, show_filters);
    }

    /// Store the raw index. Wraparound is the caller's job.
    pub fn set_highlighted(&mut self, index: usize) {
        self.highlighted = index;
    }

    pub fn move_up(&mut self) {
        let count = self.screen.option_count();
        self.highlighted = (self.highlighted % count + count - 1) % count;
    }

    pub fn move_down(&mut self) {
        let count = self.screen.option_count();
        self.highlighted = (self.highlighted + 1) % count;
    }

    pub fn toggle_controls(&mut self) {
        let show = !self.options.show_controls;
        self.set_display_options(Some(show), None);
    }

    pub fn toggle_filters(&mut self) {
        let show = !self.options.show_filters;
        self.set_display_options(None, Some(show));
    }

    pub fn toggle_graph(&mut self) {
        self.graph_overlay = !self.graph_overlay;
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current menu screen.
///
/// Each variant is a state in the navigation state machine. There is no
/// back stack: "Back" builds a fresh parent screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    MainMenu,
    GraphMenu,
    GraphSettingsMenu,
    FilterMenu,
    /// Country picker. Returns to `return_to` after a successful pick.
    CountrySelectionMenu { return_to: ReturnTo },
}

/// Where the country picker goes once a location is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnTo {
    MainMenu,
    FilterMenu,
}

impl ReturnTo {
    pub fn screen(self) -> Screen {
        match self {
            ReturnTo::MainMenu => Screen::MainMenu,
            ReturnTo::FilterMenu => Screen::FilterMenu,
        }
    }
}

pub const MAIN_MENU_OPTIONS: [&str; 5] = [
    "Help",
    "Weather Graph",
    "Weather Prediction",
    "Select country",
    "Quit",
];

pub const GRAPH_MENU_OPTIONS: [&str; 3] = ["Graph Settings", "Filters", "Back"];

pub const GRAPH_SETTINGS_OPTIONS: [&str; 3] = ["Width", "Height", "Back"];

pub const BACK: &str = "Back";

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::MainMenu => "Main Menu",
            Screen::GraphMenu => "Graph Menu",
            Screen::GraphSettingsMenu => "Graph Settings",
            Screen::FilterMenu => "Filter Menu",
            Screen::CountrySelectionMenu { .. } => "Select Country",
        }
    }

    /// Option labels in display order. Position is the selection index.
    pub fn options(&self) -> Vec<&'static str> {
        match self {
            Screen::MainMenu => MAIN_MENU_OPTIONS.to_vec(),
            Screen::GraphMenu => GRAPH_MENU_OPTIONS.to_vec(),
            Screen::GraphSettingsMenu => GRAPH_SETTINGS_OPTIONS.to_vec(),
            Screen::FilterMenu => FilterType::ALL
                .iter()
                .map(|kind| kind.label())
                .chain(std::iter::once(BACK))
                .collect(),
            Screen::CountrySelectionMenu { .. } => Location::selectable().map(Location::name).collect(),
        }
    }

    pub fn option_count(&self) -> usize {
        match self {
            Screen::MainMenu => MAIN_MENU_OPTIONS.len(),
            Screen::GraphMenu => GRAPH_MENU_OPTIONS.len(),
            Screen::GraphSettingsMenu => GRAPH_SETTINGS_OPTIONS.len(),
            Screen::FilterMenu => FilterType::ALL.len() + 1,
            Screen::CountrySelectionMenu { .. } => Location::selectable().count(),
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Show or hide the controls help block.
    ToggleControls,
    /// Show or hide the graph overlay.
    ToggleGraph,
    /// Show or hide the active filters block.
    ToggleFilters,
    /// Activate the highlighted option.
    Select,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of applying an action to the session.
///
/// Screen changes are already applied when this is returned. The effects
/// boundary only has to handle quitting and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Render again and wait for the next key.
    Continue,
    Quit,
    /// Perform a side effect; its result goes to `update::apply_input`.
    Effect(Effect),
}

/// Side effect requested by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Switch to input mode and read a line for this field.
    Prompt(Prompt),
}

/// A free-text value the user is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Filter(FilterType),
    Graph(GraphField),
}

impl Prompt {
    /// Question printed before reading the value.
    pub fn text(&self) -> String {
        match self {
            Prompt::Filter(kind) => format!("Enter the value for the filter: {}", kind.label()),
            Prompt::Graph(field) => {
                format!("Enter the graph {} (positive integer):", field.label().to_lowercase())
            }
        }
    }
}

// ============================================================================
// STATUS MESSAGES
// ============================================================================

/// One line of feedback rendered under the options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
