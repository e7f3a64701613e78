//! Numeric readout: current level, status, category and peak.

use crate::meter::PanelState;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the readout panel
pub fn render_readout(frame: &mut Frame, area: Rect, panel: Option<&PanelState>, palette: &Palette) {
    let Some(panel) = panel else {
        let block = Block::default()
            .title(" Sound Level ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let paragraph = Paragraph::new("Waiting for readings…")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    };

    // The glow shows on the frame around the number
    let block = Block::default()
        .title(" Sound Level ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(palette.glow_color(panel.glow))
                .add_modifier(palette.glow_modifier(panel.glow)),
        );

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                panel.current_value.clone(),
                palette.readout_style(panel.accent, panel.glow),
            ),
            Span::styled(" dBA", Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            panel.status_text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            panel.category_text.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Peak: "),
            Span::styled(
                format!("{} dBA", panel.peak_value),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
