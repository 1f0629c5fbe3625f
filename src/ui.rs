use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, TableState,
};
use ratatui::Frame;

use crate::keymap::HelpEntry;
use crate::render::{GraphPayload, Screen, TablePayload};

const SPINNER_COLOR: Color = Color::Indexed(205);

/// Render the full TUI frame.
pub fn render(f: &mut Frame, screen: &Screen) {
    let area = f.area();
    match screen {
        Screen::Loading { spinner } => {
            let line = Line::from(vec![
                Span::raw(" "),
                Span::styled(*spinner, Style::default().fg(SPINNER_COLOR)),
                Span::raw(" loading..."),
            ]);
            f.render_widget(Paragraph::new(vec![Line::default(), line]), area);
        }
        Screen::Error(message) => {
            let text = vec![Line::default(), Line::from(format!(" Error: {message}"))];
            f.render_widget(Paragraph::new(text), area);
        }
        Screen::Empty(message) => {
            let text = vec![Line::default(), Line::from(format!(" {message}"))];
            f.render_widget(Paragraph::new(text), area);
        }
        Screen::Help { global, table } => render_help(f, area, global, table),
        Screen::Graph(payload) => render_graph(f, area, payload),
        Screen::Table(payload) => render_table(f, area, payload),
    }
}

fn render_graph(f: &mut Frame, area: Rect, payload: &GraphPayload) {
    let points: Vec<(f64, f64)> = payload
        .series
        .iter()
        .enumerate()
        .map(|(i, count)| (i as f64, *count))
        .collect();

    let max_x = (points.len().saturating_sub(1) as f64).max(1.0);
    let max_y = payload.series.iter().copied().fold(0.0, f64::max).max(1.0);
    let precision = payload.precision;

    let first = payload.dates.first().cloned().unwrap_or_default();
    let last = payload.dates.last().cloned().unwrap_or_default();

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(payload.color))
        .data(&points);

    let width = payload.offset as usize;
    let y_labels: Vec<Span> = [0.0, max_y / 2.0, max_y]
        .iter()
        .map(|v| Span::raw(format!("{v:>width$.precision$}")))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(Block::default().title_bottom(Line::from(payload.caption.as_str()).centered()))
        .x_axis(
            Axis::default()
                .bounds([0.0, max_x])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(Axis::default().bounds([0.0, max_y]).labels(y_labels));

    let graph_area = Rect {
        width: payload.width.saturating_add(payload.offset + 1).min(area.width),
        height: payload.height.saturating_add(2).min(area.height),
        ..area
    };
    f.render_widget(chart, graph_area);
}

fn render_table(f: &mut Frame, area: Rect, payload: &TablePayload) {
    let header = Row::new(payload.columns.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = payload
        .rows
        .iter()
        .map(|(date, stars)| Row::new(vec![date.as_str(), stars.as_str()]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(20), Constraint::Length(10)])
        .header(header)
        .row_highlight_style(Style::default().fg(Color::Indexed(229)).bg(Color::Indexed(57)));

    let mut state = TableState::default();
    if !payload.rows.is_empty() {
        state.select(Some(payload.selected));
    }

    let table_area = Rect {
        width: payload.width.min(area.width),
        height: payload.height.min(area.height),
        ..area
    };
    f.render_stateful_widget(table, table_area, &mut state);
}

fn render_help(f: &mut Frame, area: Rect, global: &[HelpEntry], table: &[HelpEntry]) {
    let rows = global.len().max(table.len()) as u16;
    let [vertical] = Layout::vertical([Constraint::Length(rows)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(48)])
        .flex(Flex::Center)
        .areas(vertical);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(popup);

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(help_lines(global)), columns[0]);
    f.render_widget(Paragraph::new(help_lines(table)), columns[1]);
}

fn help_lines(entries: &[HelpEntry]) -> Vec<Line<'static>> {
    entries
        .iter()
        .map(|e| {
            Line::from(vec![
                Span::styled(format!("{:<8}", e.keys), Style::default().fg(Color::Gray)),
                Span::styled(e.description, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}
