mod common;

use common::{at, star};
use gh_stars::config::Config;
use gh_stars::error::StarsError;
use gh_stars::keymap::Action;
use gh_stars::repo::RepoId;
use gh_stars::series::bucket_by_day;
use gh_stars::session::{Command, Lifecycle, Message, Session, ViewMode};
use gh_stars::types::RepoSummary;

fn repo() -> RepoId {
    RepoId::new("charmbracelet", "bubbletea")
}

fn session() -> Session {
    Session::with_clock(repo(), Config::default(), at("2024-03-01T12:00:00Z"))
}

fn summary(total: u32) -> RepoSummary {
    RepoSummary {
        name: "charmbracelet/bubbletea".to_string(),
        total_stargazers: total,
    }
}

fn loaded_session() -> Session {
    let mut session = session();
    session.update(Message::RepoLoaded(summary(250)));
    session.update(Message::StargazersLoaded(bucket_by_day(&[
        star("2024-02-20T00:00:00Z"),
        star("2024-02-21T00:00:00Z"),
        star("2024-02-22T00:00:00Z"),
        star("2024-02-23T00:00:00Z"),
        star("2024-02-24T00:00:00Z"),
    ])));
    session
}

#[test]
fn test_initial_state() {
    let session = session();

    assert_eq!(session.lifecycle(), Lifecycle::Init);
    assert_eq!(session.view(), ViewMode::Graph);
    assert_eq!(session.window_days(), 30);
    assert!(!session.show_all());
    assert!(!session.show_help());
    assert!(session.error().is_none());
    assert!(session.is_loading());
    assert_eq!(session.start(), Command::FetchRepository(repo()));
}

#[test]
fn test_repo_loaded_triggers_stargazer_fetch() {
    let mut session = session();

    let command = session.update(Message::RepoLoaded(summary(250)));

    assert_eq!(
        command,
        Some(Command::FetchStargazers {
            repo: repo(),
            total: 250
        })
    );
    assert_eq!(session.lifecycle(), Lifecycle::Ready);
    assert_eq!(session.summary().map(|s| s.total_stargazers), Some(250));
    // Still loading until the series arrives
    assert!(session.is_loading());
}

#[test]
fn test_stargazers_loaded_completes_loading() {
    let session = loaded_session();

    assert_eq!(session.lifecycle(), Lifecycle::Ready);
    assert!(!session.is_loading());
    assert_eq!(session.series().map(|s| s.len()), Some(5));
}

#[test]
fn test_metadata_failure_is_terminal() {
    let mut session = session();

    let command = session.update(Message::FetchFailed(StarsError::NotFound("nope".into())));
    assert_eq!(command, None);
    assert_eq!(session.lifecycle(), Lifecycle::Error);
    assert!(!session.is_loading());

    // Late completions do not revive the session
    assert_eq!(session.update(Message::RepoLoaded(summary(10))), None);
    session.update(Message::StargazersLoaded(bucket_by_day(&[])));
    assert_eq!(session.lifecycle(), Lifecycle::Error);
    assert!(session.series().is_none());
}

#[test]
fn test_stargazer_failure_is_terminal() {
    let mut session = session();
    session.update(Message::RepoLoaded(summary(50_000)));

    session.update(Message::FetchFailed(StarsError::TooManyPages { pages: 500, max: 400 }));

    assert_eq!(session.lifecycle(), Lifecycle::Error);
    assert!(matches!(session.error(), Some(StarsError::TooManyPages { .. })));
}

#[test]
fn test_window_never_below_floor() {
    let mut session = loaded_session();

    for _ in 0..10 {
        session.update(Message::Input(Action::NarrowWindow));
        assert!(session.window_days() >= 30);
    }
    assert_eq!(session.window_days(), 30);

    session.update(Message::Input(Action::WidenWindow));
    session.update(Message::Input(Action::WidenWindow));
    assert_eq!(session.window_days(), 90);

    for _ in 0..5 {
        session.update(Message::Input(Action::NarrowWindow));
    }
    assert_eq!(session.window_days(), 30);
}

#[test]
fn test_window_floor_follows_config() {
    let config = Config {
        window_days: 7,
        ..Config::default()
    };
    let mut session = Session::with_clock(repo(), config, at("2024-03-01T12:00:00Z"));

    session.update(Message::Input(Action::WidenWindow));
    assert_eq!(session.window_days(), 37);
    session.update(Message::Input(Action::NarrowWindow));
    session.update(Message::Input(Action::NarrowWindow));
    assert_eq!(session.window_days(), 7);
}

#[test]
fn test_toggles_do_not_fetch() {
    let mut session = loaded_session();

    for action in [Action::ToggleAll, Action::SwitchView, Action::ToggleHelp, Action::WidenWindow] {
        assert_eq!(session.update(Message::Input(action)), None);
    }
    assert!(session.show_all());
    assert!(session.show_help());
    assert_eq!(session.view(), ViewMode::Table);

    session.update(Message::Input(Action::SwitchView));
    assert_eq!(session.view(), ViewMode::Graph);
}

#[test]
fn test_quit_from_any_state() {
    let mut fresh = session();
    assert_eq!(fresh.update(Message::Input(Action::Quit)), Some(Command::Quit));
    assert!(fresh.should_quit());

    let mut failed = session();
    failed.update(Message::FetchFailed(StarsError::AuthError("bad token".into())));
    assert_eq!(failed.update(Message::Input(Action::Quit)), Some(Command::Quit));
}

#[test]
fn test_resize_updates_viewport() {
    let mut session = session();

    assert_eq!(session.update(Message::Resize { width: 120, height: 40 }), None);

    assert_eq!(session.viewport(), (120, 40));
    assert_eq!(session.table_page_rows(), 38);
}

#[test]
fn test_tick_advances_spinner_only_while_loading() {
    let mut session = session();
    session.update(Message::Tick(at("2024-03-01T12:00:01Z")));
    session.update(Message::Tick(at("2024-03-01T12:00:02Z")));
    assert_eq!(session.spinner_frame(), 2);

    let mut ready = loaded_session();
    ready.update(Message::Tick(at("2024-03-01T12:00:01Z")));
    assert_eq!(ready.spinner_frame(), 0);
}

#[test]
fn test_table_navigation_is_clamped() {
    let mut session = loaded_session();
    session.update(Message::Resize { width: 80, height: 4 });

    // Navigation keys are ignored outside the table
    session.update(Message::Input(Action::LineDown));
    assert_eq!(session.selected_row(), 0);

    session.update(Message::Input(Action::SwitchView));
    session.update(Message::Input(Action::LineDown));
    assert_eq!(session.selected_row(), 1);

    session.update(Message::Input(Action::PageDown));
    assert_eq!(session.selected_row(), 3);

    session.update(Message::Input(Action::GotoBottom));
    assert_eq!(session.selected_row(), 4);

    session.update(Message::Input(Action::LineDown));
    assert_eq!(session.selected_row(), 4);

    session.update(Message::Input(Action::HalfPageUp));
    assert_eq!(session.selected_row(), 3);

    session.update(Message::Input(Action::GotoTop));
    assert_eq!(session.selected_row(), 0);

    session.update(Message::Input(Action::LineUp));
    assert_eq!(session.selected_row(), 0);
}

#[test]
fn test_visible_series_respects_window_and_show_all() {
    let mut session = session();
    session.update(Message::RepoLoaded(summary(3)));
    session.update(Message::StargazersLoaded(bucket_by_day(&[
        star("2024-01-01T00:00:00Z"),
        star("2024-02-15T00:00:00Z"),
    ])));
    let now = at("2024-03-01T12:00:00Z");

    let windowed = session.visible_series(now).unwrap();
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed.get_key("2024-02-15"), Some(1));

    session.update(Message::Input(Action::WidenWindow));
    session.update(Message::Input(Action::WidenWindow));
    assert_eq!(session.visible_series(now).unwrap().len(), 2);

    session.update(Message::Input(Action::NarrowWindow));
    session.update(Message::Input(Action::NarrowWindow));
    session.update(Message::Input(Action::ToggleAll));
    assert_eq!(session.visible_series(now).unwrap().len(), 2);
}
