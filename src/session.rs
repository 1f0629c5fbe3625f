//! Session state machine. Every input, fetch completion and resize arrives
//! as a [`Message`] and is applied one at a time by [`Session::update`].

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::StarsError;
use crate::keymap::Action;
use crate::repo::RepoId;
use crate::series::DailySeries;
use crate::types::RepoSummary;

/// Days added or removed by one widen/narrow action.
pub const WINDOW_STEP_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Init,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Graph,
    Table,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::Graph => ViewMode::Table,
            ViewMode::Table => ViewMode::Graph,
        }
    }
}

#[derive(Debug)]
pub enum Message {
    Input(Action),
    RepoLoaded(RepoSummary),
    StargazersLoaded(DailySeries),
    FetchFailed(StarsError),
    Resize { width: u16, height: u16 },
    Tick(DateTime<Utc>),
}

/// Side effects requested by a transition, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchRepository(RepoId),
    FetchStargazers { repo: RepoId, total: u32 },
    Quit,
}

#[derive(Debug)]
pub struct Session {
    repo: RepoId,
    config: Config,
    lifecycle: Lifecycle,
    view: ViewMode,
    window_days: u32,
    show_all: bool,
    show_help: bool,
    error: Option<StarsError>,
    summary: Option<RepoSummary>,
    series: Option<DailySeries>,
    width: u16,
    height: u16,
    spinner: usize,
    selected: usize,
    now: DateTime<Utc>,
    should_quit: bool,
}

impl Session {
    pub fn new(repo: RepoId, config: Config) -> Self {
        Self::with_clock(repo, config, Utc::now())
    }

    pub fn with_clock(repo: RepoId, config: Config, now: DateTime<Utc>) -> Self {
        let window_days = config.window_days;
        Self {
            repo,
            config,
            lifecycle: Lifecycle::Init,
            view: ViewMode::Graph,
            window_days,
            show_all: false,
            show_help: false,
            error: None,
            summary: None,
            series: None,
            width: 0,
            height: 0,
            spinner: 0,
            selected: 0,
            now,
            should_quit: false,
        }
    }

    /// The first command of every session.
    pub fn start(&self) -> Command {
        info!(repo = %self.repo, "Starting session");
        Command::FetchRepository(self.repo.clone())
    }

    pub fn update(&mut self, message: Message) -> Option<Command> {
        match message {
            Message::Input(action) => return self.handle_action(action),
            Message::RepoLoaded(summary) => {
                if self.lifecycle == Lifecycle::Error {
                    return None;
                }
                debug!(repo = %summary.name, total = summary.total_stargazers, "Repository loaded");
                let total = summary.total_stargazers;
                self.summary = Some(summary);
                self.lifecycle = Lifecycle::Ready;
                return Some(Command::FetchStargazers {
                    repo: self.repo.clone(),
                    total,
                });
            }
            Message::StargazersLoaded(series) => {
                if self.lifecycle == Lifecycle::Error {
                    return None;
                }
                debug!(days = series.len(), "Stargazers loaded");
                self.series = Some(series);
                self.clamp_selection();
            }
            Message::FetchFailed(e) => {
                error!("Fetch failed: {}", e);
                self.lifecycle = Lifecycle::Error;
                self.error = Some(e);
            }
            Message::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.clamp_selection();
            }
            Message::Tick(now) => {
                self.now = now;
                if self.is_loading() {
                    self.spinner = self.spinner.wrapping_add(1);
                }
            }
        }
        None
    }

    fn handle_action(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return Some(Command::Quit);
            }
            Action::ToggleAll => self.show_all = !self.show_all,
            Action::WidenWindow => {
                self.window_days = self.window_days.saturating_add(WINDOW_STEP_DAYS);
            }
            Action::NarrowWindow => {
                if self.window_days > self.config.window_days {
                    self.window_days = self
                        .window_days
                        .saturating_sub(WINDOW_STEP_DAYS)
                        .max(self.config.window_days);
                }
            }
            Action::SwitchView => self.view = self.view.next(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            nav => {
                if self.view == ViewMode::Table {
                    self.navigate(nav);
                }
                return None;
            }
        }
        self.clamp_selection();
        None
    }

    fn navigate(&mut self, action: Action) {
        let page = self.table_page_rows();
        let half = (page / 2).max(1);
        let last = self.visible_row_count().saturating_sub(1);

        self.selected = match action {
            Action::LineUp => self.selected.saturating_sub(1),
            Action::LineDown => self.selected.saturating_add(1),
            Action::PageUp => self.selected.saturating_sub(page),
            Action::PageDown => self.selected.saturating_add(page),
            Action::HalfPageUp => self.selected.saturating_sub(half),
            Action::HalfPageDown => self.selected.saturating_add(half),
            Action::GotoTop => 0,
            Action::GotoBottom => last,
            _ => self.selected,
        }
        .min(last);
    }

    fn clamp_selection(&mut self) {
        let last = self.visible_row_count().saturating_sub(1);
        self.selected = self.selected.min(last);
    }

    fn visible_row_count(&self) -> usize {
        self.visible_series(self.now).map_or(0, |s| s.len())
    }

    /// Rows that fit in the table body below its header.
    pub fn table_page_rows(&self) -> usize {
        (self.height as usize).saturating_sub(2).max(1)
    }

    /// The slice of loaded data selected by `show_all` and `window_days`.
    pub fn visible_series(&self, now: DateTime<Utc>) -> Option<DailySeries> {
        let series = self.series.as_ref()?;
        if self.show_all {
            return Some(series.clone());
        }
        Some(series.window_after(self.window_start(now)))
    }

    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.window_days))
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle != Lifecycle::Error
            && (self.lifecycle != Lifecycle::Ready || self.series.is_none())
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn error(&self) -> Option<&StarsError> {
        self.error.as_ref()
    }

    pub fn summary(&self) -> Option<&RepoSummary> {
        self.summary.as_ref()
    }

    pub fn series(&self) -> Option<&DailySeries> {
        self.series.as_ref()
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner
    }

    pub fn selected_row(&self) -> usize {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
