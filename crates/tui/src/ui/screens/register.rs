use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, RegisterField},
    ui::{screens, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let box_width = 44;
    let box_height = 9;
    let card_area = screens::centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" create account ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Full name
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
        ])
        .margin(1)
        .split(inner);

    let register = &state.register;

    screens::render_field(
        frame,
        rows[0],
        "Full name",
        &register.full_name,
        false,
        register.focus == RegisterField::FullName,
        &theme,
    );
    screens::render_field(
        frame,
        rows[2],
        "Email",
        &register.email,
        false,
        register.focus == RegisterField::Email,
        &theme,
    );
    screens::render_field(
        frame,
        rows[4],
        "Password",
        &register.password,
        true,
        register.focus == RegisterField::Password,
        &theme,
    );

    if let Some(message) = &register.message {
        let message_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            message_area,
        );
    }

    let hint_area = Rect {
        x: card_area.x,
        y: card_area.y + card_area.height + 2,
        width: card_area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Esc back to sign in",
            Style::default().fg(theme.text_muted),
        ))
        .alignment(Alignment::Center),
        hint_area,
    );
}
