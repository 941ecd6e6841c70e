use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, BillFormState, FormField, FormMode},
    ui::{screens, theme::Theme},
};

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
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_status_line(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);

    if let Some(form) = &state.bills_view.form {
        render_form(frame, area, form, &theme);
    }
}

fn render_status_line(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let line = if let Some(message) = &state.bills_view.message {
        Line::styled(message.as_str(), Style::default().fg(theme.error))
    } else {
        Line::styled(
            format!(
                "  {:<24} {:>10}  {:<12} {:<15} {}",
                "Title", "Amount", "Due", "Category", "Status"
            ),
            Style::default().fg(theme.text_muted),
        )
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state
        .store
        .bills()
        .iter()
        .map(|bill| {
            let due = bill.due_date.format("%d %b %Y").to_string();
            let text = format!(
                "{title:<24} ${amount:>9.2}  {due:<12} {category:<15} {status}",
                title = bill.title,
                amount = bill.amount,
                category = bill.category.label(),
                status = bill.status.label(),
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.bills_view.selected));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, form: &BillFormState, theme: &Theme) {
    let box_width = 52;
    let box_height = 12;
    let card_area = screens::centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let title = match form.mode {
        FormMode::Add => " add bill ",
        FormMode::Edit(_) => " edit bill ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Description
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Due date
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Banner
        ])
        .margin(1)
        .split(inner);

    screens::render_field(
        frame,
        rows[0],
        "Title",
        &form.title,
        false,
        form.focus == FormField::Title,
        theme,
    );
    screens::render_field(
        frame,
        rows[1],
        "Description",
        &form.description,
        false,
        form.focus == FormField::Description,
        theme,
    );
    screens::render_field(
        frame,
        rows[2],
        "Amount",
        &form.amount,
        false,
        form.focus == FormField::Amount,
        theme,
    );
    screens::render_field(
        frame,
        rows[3],
        "Due date",
        &form.due_date,
        false,
        form.focus == FormField::DueDate,
        theme,
    );
    render_category_row(frame, rows[4], form, theme);

    // Inline banner: validation or server message, form stays open.
    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[6],
        );
    } else if form.focus == FormField::DueDate {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Format: YYYY-MM-DD",
                Style::default().fg(theme.text_muted),
            )),
            rows[6],
        );
    }
}

fn render_category_row(frame: &mut Frame<'_>, area: Rect, form: &BillFormState, theme: &Theme) {
    let focused = form.focus == FormField::Category;
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let mut spans = vec![
        Span::styled(
            format!("{:<12}", "Category"),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(form.selected_category().label(), value_style),
    ];
    if focused {
        spans.push(Span::styled(
            "  ↑/↓ change",
            Style::default().fg(theme.text_muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
