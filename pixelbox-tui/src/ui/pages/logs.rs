//! In-app log pane backed by tui-logger

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use tui_logger::TuiLoggerWidget;

#[derive(Default)]
pub struct LogsPage;

impl LogsPage {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let widget = TuiLoggerWidget::default()
            .block(Block::default().borders(Borders::ALL).title(" Logs (Esc: back) "))
            .style_error(Style::default().fg(Color::Red))
            .style_warn(Style::default().fg(Color::Yellow))
            .style_info(Style::default().fg(Color::Green))
            .style_debug(Style::default().fg(Color::Gray))
            .output_target(true)
            .output_file(false)
            .output_line(false);
        frame.render_widget(widget, area);
    }
}
