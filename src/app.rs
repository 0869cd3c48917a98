// App state and main event loop.
// Manages the login screen, tabs, session changes, and keyboard input handling.

use std::io;

use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::api::AuthClient;
use crate::cache::{CACHE_PREFIX, CacheStore};
use crate::session::{Session, SessionState};
use crate::state::{LoginField, LoginState, ProfileTabState, ScheduleTabState};
use crate::ui;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Schedule,
    Profile,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Schedule => "Schedule",
            Tab::Profile => "Profile",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Schedule => Tab::Profile,
            Tab::Profile => Tab::Schedule,
        }
    }

    pub fn prev(&self) -> Self {
        self.next()
    }
}

/// Which top-level screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Main,
}

/// Shared handles the screens load data through.
#[derive(Clone)]
pub struct Services {
    pub store: CacheStore,
    pub client: AuthClient,
}

impl Services {
    pub fn new(store: CacheStore, client: AuthClient) -> Self {
        Self { store, client }
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }
}

/// Main application state.
pub struct App {
    pub services: Services,
    pub screen: Screen,
    /// Currently active tab.
    pub active_tab: Tab,
    pub schedule: ScheduleTabState,
    pub profile: ProfileTabState,
    pub login: LoginState,
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    session_rx: watch::Receiver<SessionState>,
}

impl App {
    /// Build the app and start loading if a session was restored.
    ///
    /// Must be called inside a tokio runtime context.
    pub fn new(services: Services, today: NaiveDate) -> Self {
        let mut session_rx = services.session().subscribe();
        let state = *session_rx.borrow_and_update();

        let mut app = Self {
            services,
            screen: Screen::Login,
            active_tab: Tab::default(),
            schedule: ScheduleTabState::new(today),
            profile: ProfileTabState::new(),
            login: LoginState::new(),
            show_help: false,
            should_quit: false,
            session_rx,
        };
        app.apply_session(state);
        app
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.poll_session();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// React to sign-in or sign-out since the last poll.
    pub fn poll_session(&mut self) {
        if self.session_rx.has_changed().unwrap_or(false) {
            let state = *self.session_rx.borrow_and_update();
            self.apply_session(state);
        }
    }

    fn apply_session(&mut self, state: SessionState) {
        match state {
            SessionState::Authenticated => {
                info!("session authenticated");
                self.screen = Screen::Main;
                self.login.reset();
                self.profile.load(&self.services.store, &self.services.client);
                if self.active_tab == Tab::Schedule {
                    self.schedule.load(&self.services.store, &self.services.client);
                }
            }
            SessionState::Anonymous => {
                info!("session ended, showing login");
                self.screen = Screen::Login;
                self.show_help = false;
                self.profile.discard();
                self.profile.user.reset();
                self.schedule.discard();
                self.schedule.lessons.reset();
                self.schedule.list_state.select(None);
            }
        }
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Dispatch a key press to the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Main => self.handle_main_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Enter => match self.login.focus {
                LoginField::Username => self.login.focus = LoginField::Password,
                LoginField::Password => self.login.submit(&self.services.client),
            },
            KeyCode::Backspace => self.login.pop_char(),
            KeyCode::Char(c) => self.login.push_char(c),
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('L') => self.sign_out(),
            KeyCode::Tab => self.switch_tab(self.active_tab.next()),
            KeyCode::BackTab => self.switch_tab(self.active_tab.prev()),
            _ if self.active_tab == Tab::Schedule => self.handle_schedule_key(key),
            _ => {}
        }
    }

    fn handle_schedule_key(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.schedule.prev_day(),
            KeyCode::Right | KeyCode::Char('l') => self.schedule.next_day(),
            KeyCode::Char('t') => self.schedule.go_today(),
            KeyCode::Char('m') => self.schedule.toggle_month(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.schedule.select_prev();
                false
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.schedule.select_next();
                false
            }
            _ => false,
        };
        if changed {
            self.load_active_tab();
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        if tab == self.active_tab {
            return;
        }
        // The profile stays loaded for the top bar; only the schedule unmounts.
        if self.active_tab == Tab::Schedule {
            self.schedule.discard();
        }
        self.active_tab = tab;
        self.load_active_tab();
    }

    /// Revalidate whatever the active tab shows.
    pub fn refresh(&mut self) {
        self.load_active_tab();
    }

    fn load_active_tab(&mut self) {
        let Services { store, client } = &self.services;
        match self.active_tab {
            Tab::Schedule => self.schedule.load(store, client),
            Tab::Profile => self.profile.load(store, client),
        }
    }

    /// Forget the credential and every cached response.
    ///
    /// In-flight loads are discarded before the cache is cleared so none of
    /// them can write into it afterwards.
    pub fn sign_out(&mut self) {
        self.schedule.discard();
        self.profile.discard();
        self.services.store.clear(Some(CACHE_PREFIX));
        if let Err(err) = self.services.session().sign_out() {
            warn!(error = %err, "stored credential could not be removed");
        }
        self.poll_session();
    }
}
