use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::theme::Theme;

/// A bordered card showing a single headline figure.
///
/// Used for the dashboard totals row.
pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    theme: &'a Theme,
    alert: bool,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            title,
            value: value.into(),
            theme,
            alert: false,
        }
    }

    /// Uses the error color for the headline figure.
    pub fn alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }

    pub fn render(self, frame: &mut Frame<'_>, area: Rect) {
        let title_color = if self.alert {
            self.theme.error
        } else {
            self.theme.accent
        };
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(title_color),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let value = Paragraph::new(Span::styled(
            self.value,
            Style::default()
                .fg(self.theme.text)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(value, inner);
    }
}
