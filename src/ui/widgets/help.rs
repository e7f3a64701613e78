//! Help panel widget.

use crate::meter::severity::{EXTREME_DANGER, HIGH_RISK, MODERATE, QUIET};
use crate::meter::AccentToken;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Render the help panel
pub fn render_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    // Clear the area first
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
    };
    let key = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };
    let class = |token: AccentToken, label: &'static str| {
        Line::from(vec![
            Span::styled("  ■ ", Style::default().fg(palette.accent(token))),
            Span::raw(label),
        ])
    };

    let help_text = vec![
        Line::from(""),
        heading("Controls"),
        key("  ?/h/F1", "  - Toggle this help"),
        key("  q/Esc", "   - Quit application"),
        Line::from(""),
        heading("Classifications"),
        class(AccentToken::Red, EXTREME_DANGER),
        class(AccentToken::Yellow, HIGH_RISK),
        class(AccentToken::Green, MODERATE),
        class(AccentToken::Blue, QUIET),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" to close this help"),
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
