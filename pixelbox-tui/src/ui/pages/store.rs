//! Store page: series listing, search and popular mode

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::core::{AppContext, ListingMode, SERIES_PAGE_SIZE};
use crate::ui::widgets::points;
use crate::ui::{failure, Notice, PageEvent, Route};

#[derive(Default)]
pub struct StorePage {
    selected: usize,
    search: Input,
    searching: bool,
}

impl StorePage {
    pub async fn on_enter(&mut self, ctx: &AppContext) -> PageEvent {
        self.selected = 0;
        match ctx.catalog.fetch_series(1, None).await {
            Ok(()) => PageEvent::None,
            Err(e) => failure(ctx, e, "Failed to load series"),
        }
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        if self.searching {
            return self.on_search_key(key, ctx).await;
        }

        let state = ctx.catalog.state();
        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                PageEvent::None
            }
            KeyCode::Char('p') => {
                self.selected = 0;
                match ctx.catalog.fetch_popular(SERIES_PAGE_SIZE).await {
                    Ok(()) => PageEvent::Notice(Notice::info("Showing popular series")),
                    Err(e) => failure(ctx, e, "Failed to load popular series"),
                }
            }
            KeyCode::Char('r') => self.on_enter(ctx).await,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PageEvent::None
            }
            KeyCode::Down => {
                if !state.series.is_empty() {
                    self.selected = (self.selected + 1).min(state.series.len() - 1);
                }
                PageEvent::None
            }
            KeyCode::Left if state.mode == ListingMode::Browse && state.pagination.has_prev() => {
                self.selected = 0;
                match ctx.catalog.fetch_series(state.pagination.page - 1, None).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to load series"),
                }
            }
            KeyCode::Right if state.mode == ListingMode::Browse && state.pagination.has_next() => {
                self.selected = 0;
                match ctx.catalog.fetch_series(state.pagination.page + 1, None).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to load series"),
                }
            }
            KeyCode::Enter => {
                let Some(series) = state.series.get(self.selected) else {
                    return PageEvent::None;
                };
                match ctx.catalog.fetch_series_detail(&series.id).await {
                    Ok(()) => PageEvent::Navigate(Route::SeriesDetail),
                    Err(e) => failure(ctx, e, "Failed to load series detail"),
                }
            }
            _ => PageEvent::None,
        }
    }

    async fn on_search_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        match key.code {
            KeyCode::Esc => {
                self.searching = false;
                PageEvent::None
            }
            KeyCode::Enter => {
                self.searching = false;
                self.selected = 0;
                let keyword = self.search.value().trim().to_string();
                if keyword.is_empty() {
                    return self.on_enter(ctx).await;
                }
                match ctx.catalog.search_series(&keyword, None).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Search failed"),
                }
            }
            _ => {
                self.search.handle_event(&Event::Key(key));
                PageEvent::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let state = ctx.catalog.state();
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let mode_label = match &state.mode {
            ListingMode::Browse => format!(
                "Browse \u{2014} page {}/{}",
                state.pagination.page.max(1),
                state.pagination.total_pages.max(1)
            ),
            ListingMode::Search(kw) => format!("Search \u{2014} \"{kw}\""),
            ListingMode::Popular => "Popular".to_string(),
        };
        let search_text = if self.searching {
            Line::from(vec![
                Span::raw("Search: "),
                Span::styled(format!("{}_", self.search.value()), Style::default().fg(Color::Cyan)),
            ])
        } else {
            Line::from(format!("{mode_label}{}", if state.loading { "  (loading...)" } else { "" }))
        };
        frame.render_widget(
            Paragraph::new(search_text).block(Block::default().borders(Borders::ALL).title(" Store ")),
            search_area,
        );

        let items: Vec<ListItem> = state
            .series
            .iter()
            .map(|s| {
                let mut spans = vec![
                    Span::styled(format!("{:<28}", s.name), Style::default().bold()),
                    Span::raw(format!("{:>12}", points(s.price))),
                    Span::raw(format!("  \u{2665} {:<6}", s.popularity)),
                ];
                if s.is_hot {
                    spans.push(Span::styled(" HOT", Style::default().fg(Color::Red).bold()));
                }
                if s.is_new {
                    spans.push(Span::styled(" NEW", Style::default().fg(Color::Green).bold()));
                }
                ListItem::new(Line::from(spans))
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
