pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Screen, Section};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Register => screens::register::render(frame, area, state),
        Screen::Home => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, layout[2], state),
        Section::Bills => screens::bills::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.login.email.as_str();
    let count = state.store.bills().len();
    let status = if state.store.error().is_some() {
        "ERR"
    } else if state.store.is_loading() {
        "..."
    } else {
        "OK"
    };
    let status_style = if state.store.error().is_some() {
        Style::default().fg(theme.error)
    } else {
        Style::default().fg(theme.positive)
    };

    let line = Line::from(vec![
        Span::styled("User", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Bills", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {count}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("l", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" logout  "));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    let bar = Paragraph::new(Line::from(parts));
    frame.render_widget(bar, area);
}

fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if state.bills_view.form.is_some() {
        return vec![
            Span::styled("Tab", Style::default().fg(theme.accent)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" cancel"),
        ];
    }

    match state.section {
        Section::Dashboard => vec![
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" refresh"),
        ],
        Section::Bills => vec![
            Span::styled("a", Style::default().fg(theme.accent)),
            Span::raw(" add  "),
            Span::styled("e", Style::default().fg(theme.accent)),
            Span::raw(" edit  "),
            Span::styled("x", Style::default().fg(theme.accent)),
            Span::raw(" delete  "),
            Span::styled("j/k", Style::default().fg(theme.accent)),
            Span::raw(" move  "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" refresh"),
        ],
    }
}
