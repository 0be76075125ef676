//! Small shared rendering helpers

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use rust_decimal::Decimal;
use shared::{OrderStatus, Rarity};
use tui_input::Input;

/// Points amount formatted to two decimal places
pub fn points(amount: Decimal) -> String {
    format!("{:.2} pts", amount)
}

/// Local-looking timestamp for display
pub fn date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

pub fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Pending => Color::Yellow,
        OrderStatus::Paid => Color::Blue,
        OrderStatus::Completed => Color::Green,
        OrderStatus::Cancelled => Color::DarkGray,
    }
}

pub fn rarity_span(rarity: Rarity) -> Span<'static> {
    Span::styled(rarity.label(), Style::default().fg(rarity_color(rarity)))
}

pub fn status_span(status: OrderStatus) -> Span<'static> {
    Span::styled(status.label(), Style::default().fg(status_color(status)))
}

/// One labelled form line backed by a `tui_input::Input`
pub fn input_line<'a>(label: &'a str, input: &Input, focused: bool, masked: bool) -> Line<'a> {
    let value = if masked {
        "\u{2022}".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{label:>18}: "), Style::default().bold()),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

/// Centered rect for modal overlays
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Yes/no confirmation dialog overlay
pub fn confirm_dialog(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let popup = centered(area, 50, 5);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(Color::Yellow));
    let body = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[y] yes    [n] no", Style::default().bold())),
    ])
    .block(block)
    .centered();
    frame.render_widget(body, popup);
}
