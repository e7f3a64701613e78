//! Status bar widget.

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the status bar
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    linked: bool,
    source_label: &str,
    readings: u64,
    last_reading_at: Option<DateTime<Local>>,
    window: (f64, f64, f64),
    status_message: Option<&str>,
) {
    let mut spans = vec![];

    // Link status
    let link_text = if linked { "LINK ✓" } else { "LINK ✗" };
    let link_color = if linked { Color::Green } else { Color::Red };
    spans.push(Span::styled(
        link_text,
        Style::default().fg(link_color).add_modifier(Modifier::BOLD)
    ));

    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(source_label.to_string(), Style::default().fg(Color::Cyan)));

    spans.push(Span::raw(" │ "));
    let last = last_reading_at
        .map(|at| at.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    spans.push(Span::raw(format!("{} readings, last {}", readings, last)));

    let (min, max, avg) = window;
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled(
        format!("window min {:.0} avg {:.1} max {:.0}", min, avg, max),
        Style::default().fg(Color::Gray)
    ));

    if let Some(status) = status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Gray)
        ));
    }

    let block = Block::default()
        .title(" noise-meter ")
        .title(Line::from(" ? help ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
