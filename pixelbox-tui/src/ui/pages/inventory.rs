//! Inventory page: collection, rarity stats and the two toggles

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use shared::{InventoryFilter, Rarity};

use crate::core::AppContext;
use crate::ui::widgets::rarity_span;
use crate::ui::{failure, PageEvent};

#[derive(Default)]
pub struct InventoryPage {
    selected: usize,
    rarity_idx: usize,
    favorites_only: bool,
}

impl InventoryPage {
    fn rarity(&self) -> Option<Rarity> {
        match self.rarity_idx % 5 {
            0 => None,
            i => Some(Rarity::ALL[i - 1]),
        }
    }

    fn filter(&self, page: u32) -> InventoryFilter {
        InventoryFilter {
            page: Some(page),
            limit: None,
            rarity: self.rarity(),
            favorites_only: self.favorites_only.then_some(true),
        }
    }

    async fn refresh(&mut self, ctx: &AppContext, page: u32) -> PageEvent {
        self.selected = 0;
        match ctx.inventory.fetch_inventory(self.filter(page)).await {
            Ok(()) => PageEvent::None,
            Err(e) => failure(ctx, e, "Failed to load inventory"),
        }
    }

    pub async fn on_enter(&mut self, ctx: &AppContext) -> PageEvent {
        self.refresh(ctx, 1).await
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        let state = ctx.inventory.state();
        match key.code {
            KeyCode::Char('r') => {
                self.rarity_idx = (self.rarity_idx + 1) % 5;
                self.refresh(ctx, 1).await
            }
            KeyCode::Char('o') => {
                self.favorites_only = !self.favorites_only;
                self.refresh(ctx, 1).await
            }
            KeyCode::Char('f') => {
                let Some(entry) = state.entries.get(self.selected) else {
                    return PageEvent::None;
                };
                match ctx.inventory.toggle_favorite(&entry.id).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to update favorite"),
                }
            }
            KeyCode::Char('d') => {
                let Some(entry) = state.entries.get(self.selected) else {
                    return PageEvent::None;
                };
                match ctx.inventory.toggle_display(&entry.id).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to update display"),
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PageEvent::None
            }
            KeyCode::Down => {
                if !state.entries.is_empty() {
                    self.selected = (self.selected + 1).min(state.entries.len() - 1);
                }
                PageEvent::None
            }
            KeyCode::Left if state.pagination.has_prev() => {
                self.refresh(ctx, state.pagination.page - 1).await
            }
            KeyCode::Right if state.pagination.has_next() => {
                self.refresh(ctx, state.pagination.page + 1).await
            }
            _ => PageEvent::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let state = ctx.inventory.state();
        let [stats_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        // Stats are folded from the loaded page, not the whole collection
        let stats = state.stats;
        let stats_line = Line::from(vec![
            Span::styled(format!("Loaded: {}  ", stats.total), Style::default().bold()),
            Span::styled(format!("Common {}  ", stats.common), Style::default().fg(Color::Gray)),
            Span::styled(format!("Rare {}  ", stats.rare), Style::default().fg(Color::Blue)),
            Span::styled(format!("Epic {}  ", stats.epic), Style::default().fg(Color::Magenta)),
            Span::styled(
                format!("Legendary {}", stats.legendary),
                Style::default().fg(Color::Yellow),
            ),
        ]);
        let filter_label = format!(
            " Inventory \u{2014} {}{} \u{2014} page {}/{} ",
            self.rarity().map(|r| r.label()).unwrap_or("All"),
            if self.favorites_only { " (favorites)" } else { "" },
            state.pagination.page.max(1),
            state.pagination.total_pages.max(1),
        );
        frame.render_widget(
            Paragraph::new(stats_line).block(Block::default().borders(Borders::ALL).title(filter_label)),
            stats_area,
        );

        let items: Vec<ListItem> = state
            .entries
            .iter()
            .map(|entry| {
                let fav = if entry.is_favorite { "\u{2665}" } else { " " };
                let shown = if entry.is_displayed { "\u{25c6}" } else { " " };
                let busy = if state.is_busy(&entry.id) { " ..." } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(fav, Style::default().fg(Color::Red)),
                    Span::styled(shown, Style::default().fg(Color::Cyan)),
                    Span::raw(format!(" {:<28}", entry.item.name)),
                    rarity_span(entry.item.rarity),
                    Span::raw(format!("   x{}{}", entry.quantity, busy)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().bg(Color::DarkGray).bold())
            .highlight_symbol("\u{25b6} ");
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, list_area, &mut list_state);
    }
}
