//! Derives what to draw from the session. Pure: no terminal access.

use chrono::{DateTime, Utc};
use ratatui::style::Color;

use crate::keymap::{HelpEntry, GLOBAL_HELP, TABLE_HELP};
use crate::session::{Lifecycle, Session, ViewMode};
use crate::series::{format_day, DailySeries};

pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
pub const EMPTY_MESSAGE: &str = "No stargazers found.";
pub const TABLE_COLUMNS: [&str; 2] = ["Date", "Stars"];
const MIN_LABEL_OFFSET: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading { spinner: &'static str },
    Error(String),
    Help {
        global: &'static [HelpEntry],
        table: &'static [HelpEntry],
    },
    Empty(&'static str),
    Graph(GraphPayload),
    Table(TablePayload),
}

/// Input for the line plot: one point per day, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPayload {
    pub dates: Vec<String>,
    pub series: Vec<f64>,
    pub width: u16,
    pub height: u16,
    pub caption: String,
    pub color: Color,
    pub precision: usize,
    /// Width reserved for the y-axis labels
    pub offset: u16,
}

/// Input for the table: most recent day first.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePayload {
    pub columns: [&'static str; 2],
    pub rows: Vec<(String, String)>,
    pub width: u16,
    pub height: u16,
    pub selected: usize,
}

pub fn select_screen(session: &Session, now: DateTime<Utc>) -> Screen {
    if session.lifecycle() == Lifecycle::Error {
        let message = session
            .error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Screen::Error(message);
    }
    if session.is_loading() {
        let frame = session.spinner_frame() % SPINNER_FRAMES.len();
        return Screen::Loading {
            spinner: SPINNER_FRAMES[frame],
        };
    }
    if session.show_help() {
        return Screen::Help {
            global: GLOBAL_HELP,
            table: TABLE_HELP,
        };
    }

    let visible = session.visible_series(now).unwrap_or_default();
    match session.view() {
        ViewMode::Graph => graph_screen(session, &visible),
        ViewMode::Table => Screen::Table(table_payload(session, &visible)),
    }
}

fn graph_screen(session: &Session, visible: &DailySeries) -> Screen {
    if visible.is_empty() {
        return Screen::Empty(EMPTY_MESSAGE);
    }

    let (dates, series): (Vec<String>, Vec<f64>) = visible
        .keyed()
        .map(|(day, count)| (day, count as f64))
        .unzip();

    let widest = visible
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(0);
    let offset = widest.max(MIN_LABEL_OFFSET) as u16;
    let (width, height) = session.viewport();

    Screen::Graph(GraphPayload {
        dates,
        series,
        width: width.saturating_sub(offset + 1),
        height: height.saturating_sub(2),
        caption: caption(session, visible),
        color: Color::Blue,
        precision: 0,
        offset,
    })
}

fn caption(session: &Session, visible: &DailySeries) -> String {
    let total = session.summary().map_or(0, |s| s.total_stargazers);
    let since = match visible.first_day() {
        Some(first) if session.show_all() => format!("since {}", format_day(first)),
        _ => days_ago(session.window_days()),
    };
    format!("{} {} stargazers ({})", session.repo(), total, since)
}

fn table_payload(session: &Session, visible: &DailySeries) -> TablePayload {
    let rows: Vec<(String, String)> = visible
        .keyed()
        .rev()
        .map(|(day, count)| (day, count.to_string()))
        .collect();
    let (width, height) = session.viewport();
    let selected = session.selected_row().min(rows.len().saturating_sub(1));

    TablePayload {
        columns: TABLE_COLUMNS,
        rows,
        width,
        height: height.saturating_sub(1),
        selected,
    }
}

/// Relative label for a window length, e.g. "1 month ago". A month is 30
/// days and a year is 360, with "2 years" from 18 months on.
pub fn days_ago(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1 => "1 day ago".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        30..=59 => "1 month ago".to_string(),
        60..=359 => format!("{} months ago", days / 30),
        360..=539 => "1 year ago".to_string(),
        540..=719 => "2 years ago".to_string(),
        _ => format!("{} years ago", days / 360),
    }
}
