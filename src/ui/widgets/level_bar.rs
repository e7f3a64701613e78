//! Linear level bar with scale legend.

use crate::meter::{AccentToken, PanelState, scale};
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Render the fill bar; empty until the first reading
pub fn render_level_bar(frame: &mut Frame, area: Rect, panel: Option<&PanelState>, palette: &Palette) {
    let block = Block::default()
        .title(" Level ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [bar_area, legend_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);

    let (percent, color) = match panel {
        Some(panel) => (panel.fill_percent, palette.accent(panel.accent)),
        None => (0.0, palette.accent(AccentToken::Blue)),
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", percent));
    frame.render_widget(gauge, bar_area);

    frame.render_widget(Paragraph::new(legend(legend_area.width, palette)), legend_area);
}

/// Scale ends plus the classification thresholds
fn legend(width: u16, palette: &Palette) -> Vec<Line<'static>> {
    let swatch = |token: AccentToken| Span::styled("■", Style::default().fg(palette.accent(token)));
    let low = format!("{}", scale::MIN_DB);
    let high = format!("{} dBA", scale::MAX_DB);
    let gap = (width as usize).saturating_sub(low.len() + high.len());

    vec![
        Line::from(vec![
            Span::raw(low),
            Span::raw(" ".repeat(gap)),
            Span::raw(high),
        ]),
        Line::from(""),
        Line::from(vec![
            swatch(AccentToken::Blue),
            Span::raw(" <60 quiet  "),
            swatch(AccentToken::Green),
            Span::raw(" ≥60 moderate"),
        ]),
        Line::from(vec![
            swatch(AccentToken::Yellow),
            Span::raw(" ≥85 high risk  "),
            swatch(AccentToken::Red),
            Span::raw(" ≥100 extreme"),
        ]),
    ]
}
