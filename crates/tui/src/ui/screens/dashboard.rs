use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{app::AppState, ui::components::card::StatCard, ui::theme::Theme};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    // A failed load replaces the whole section, stale list included.
    if let Some(error) = state.store.error() {
        frame.render_widget(
            Paragraph::new(Line::styled(error, Style::default().fg(theme.error)))
                .alignment(Alignment::Center),
            area,
        );
        return;
    }
    if state.store.is_loading() {
        frame.render_widget(
            Paragraph::new(Line::styled(
                "Loading bills...",
                Style::default().fg(theme.text_muted),
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Totals row
            Constraint::Min(0),    // Recent bills
        ])
        .split(area);

    render_totals(frame, layout[0], state, &theme);
    render_recent(frame, layout[1], state, &theme);
}

fn render_totals(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let summary = state.store.summary();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    StatCard::new(
        "Total Bills",
        format!("${:.2}", summary.total_amount),
        theme,
    )
    .render(frame, cols[0]);
    StatCard::new("Pending Bills", summary.pending.to_string(), theme).render(frame, cols[1]);
    StatCard::new("Overdue Bills", summary.overdue.to_string(), theme)
        .alert(summary.overdue > 0)
        .render(frame, cols[2]);
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state
        .store
        .bills()
        .iter()
        .map(|bill| {
            let due = bill.due_date.format("%d %b %Y").to_string();
            let text = format!(
                "{due}  {title:<24} ${amount:>9.2}  {status}",
                title = bill.title,
                amount = bill.amount,
                status = bill.status.label(),
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .title("Recent Bills")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    frame.render_widget(List::new(items).block(block), area);
}
