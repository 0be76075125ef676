//! Player show feed: browse, like, publish and delete

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use shared::{InventoryFilter, MAX_SHOW_CONTENT_LEN};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::core::AppContext;
use crate::ui::widgets::{centered, confirm_dialog, date, rarity_span};
use crate::ui::{failure, Notice, PageEvent, Route};

#[derive(Default, PartialEq)]
enum CreateFocus {
    #[default]
    Content,
    Items,
}

#[derive(Default)]
struct CreateForm {
    content: Input,
    item_idx: usize,
    focus: CreateFocus,
}

#[derive(Default)]
enum Mode {
    #[default]
    List,
    Create(CreateForm),
    ConfirmDelete(String),
}

#[derive(Default)]
pub struct ShowsPage {
    selected: usize,
    mode: Mode,
}

impl ShowsPage {
    pub async fn on_enter(&mut self, ctx: &AppContext) -> PageEvent {
        self.selected = 0;
        self.mode = Mode::List;
        match ctx.shows.fetch_shows(1).await {
            Ok(()) => PageEvent::None,
            Err(e) => failure(ctx, e, "Failed to load player shows"),
        }
    }

    pub async fn on_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        match std::mem::take(&mut self.mode) {
            Mode::List => self.on_list_key(key, ctx).await,
            Mode::Create(form) => self.on_create_key(form, key, ctx).await,
            Mode::ConfirmDelete(show_id) => match key.code {
                KeyCode::Char('y') => match ctx.shows.delete_show(&show_id).await {
                    Ok(()) => PageEvent::Notice(Notice::success("Show deleted")),
                    Err(e) => failure(ctx, e, "Failed to delete show"),
                },
                KeyCode::Char('n') | KeyCode::Esc => PageEvent::None,
                _ => {
                    self.mode = Mode::ConfirmDelete(show_id);
                    PageEvent::None
                }
            },
        }
    }

    async fn on_list_key(&mut self, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        let state = ctx.shows.state();
        match key.code {
            KeyCode::Char('r') => self.on_enter(ctx).await,
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                PageEvent::None
            }
            KeyCode::Down => {
                if !state.shows.is_empty() {
                    self.selected = (self.selected + 1).min(state.shows.len() - 1);
                }
                PageEvent::None
            }
            KeyCode::Left if state.pagination.has_prev() => {
                match ctx.shows.fetch_shows(state.pagination.page - 1).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to load player shows"),
                }
            }
            KeyCode::Right if state.pagination.has_next() => {
                match ctx.shows.fetch_shows(state.pagination.page + 1).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to load player shows"),
                }
            }
            KeyCode::Char('l') => {
                if !ctx.session.is_authenticated() {
                    return PageEvent::NavigateNotice(
                        Route::Login,
                        Notice::error("Please log in to like shows"),
                    );
                }
                let Some(show) = state.shows.get(self.selected) else {
                    return PageEvent::None;
                };
                match ctx.shows.toggle_like(&show.id).await {
                    Ok(()) => PageEvent::None,
                    Err(e) => failure(ctx, e, "Failed to update like"),
                }
            }
            KeyCode::Char('x') => {
                let Some(show) = state.shows.get(self.selected) else {
                    return PageEvent::None;
                };
                let me = ctx.session.user();
                if me.map(|u| u.id) == Some(show.user.id.clone()) {
                    self.mode = Mode::ConfirmDelete(show.id.clone());
                    PageEvent::None
                } else {
                    PageEvent::Notice(Notice::error("You can only delete your own shows"))
                }
            }
            KeyCode::Char('n') => {
                if !ctx.session.is_authenticated() {
                    return PageEvent::NavigateNotice(
                        Route::Login,
                        Notice::error("Please log in to publish a show"),
                    );
                }
                // Load the inventory so the form has entries to pick from
                if let Err(e) = ctx.inventory.fetch_inventory(InventoryFilter::default()).await {
                    return failure(ctx, e, "Failed to load inventory");
                }
                self.mode = Mode::Create(CreateForm::default());
                PageEvent::None
            }
            _ => PageEvent::None,
        }
    }

    async fn on_create_key(&mut self, mut form: CreateForm, key: KeyEvent, ctx: &AppContext) -> PageEvent {
        match key.code {
            KeyCode::Esc => PageEvent::None,
            KeyCode::Tab => {
                form.focus = match form.focus {
                    CreateFocus::Content => CreateFocus::Items,
                    CreateFocus::Items => CreateFocus::Content,
                };
                self.mode = Mode::Create(form);
                PageEvent::None
            }
            KeyCode::Up if form.focus == CreateFocus::Items => {
                form.item_idx = form.item_idx.saturating_sub(1);
                self.mode = Mode::Create(form);
                PageEvent::None
            }
            KeyCode::Down if form.focus == CreateFocus::Items => {
                let count = ctx.inventory.state().entries.len();
                if count > 0 {
                    form.item_idx = (form.item_idx + 1).min(count - 1);
                }
                self.mode = Mode::Create(form);
                PageEvent::None
            }
            KeyCode::Enter if form.focus == CreateFocus::Items => {
                let entries = ctx.inventory.state().entries;
                let Some(entry) = entries.get(form.item_idx) else {
                    self.mode = Mode::Create(form);
                    return PageEvent::Notice(Notice::error("Pick an item to showcase"));
                };
                match ctx.shows.create_show(form.content.value(), &entry.id).await {
                    Ok(()) => PageEvent::Notice(Notice::success("Show published!")),
                    Err(e) => {
                        let event = failure(ctx, e, "Failed to publish show");
                        self.mode = Mode::Create(form);
                        event
                    }
                }
            }
            _ => {
                if form.focus == CreateFocus::Content {
                    form.content.handle_event(&Event::Key(key));
                }
                self.mode = Mode::Create(form);
                PageEvent::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &AppContext) {
        let state = ctx.shows.state();
        let me = ctx.session.user();

        let title = format!(
            " Player shows \u{2014} page {}/{}{} ",
            state.pagination.page.max(1),
            state.pagination.total_pages.max(1),
            if state.loading { " (loading...)" } else { "" }
        );

        let items: Vec<ListItem> = state
            .shows
            .iter()
            .map(|show| {
                let heart = if show.is_liked { "\u{2764}" } else { "\u{2661}" };
                let author = show.user.nickname.clone().unwrap_or_else(|| show.user.username.clone());
                let mine = me.as_ref().map(|u| u.id == show.user.id).unwrap_or(false);
                let mut header = vec![
                    Span::styled(author, Style::default().bold().fg(Color::Cyan)),
                    Span::styled(format!("  {}", date(&show.created_at)), Style::default().fg(Color::DarkGray)),
                    Span::raw(format!("   {heart} {}", show.likes_count)),
                ];
                if mine {
                    header.push(Span::styled("  (yours)", Style::default().fg(Color::DarkGray)));
                }
                let mut lines = vec![Line::from(header), Line::from(show.content.clone())];
                if let Some(item) = &show.item {
                    lines.push(Line::from(vec![
                        Span::raw("  \u{1f381} "),
                        Span::raw(item.name.clone()),
                        Span::raw("  "),
                        rarity_span(item.rarity),
                    ]));
                }
                lines.push(Line::from(""));
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("\u{25b6} ");
        let mut list_state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut list_state);

        match &self.mode {
            Mode::Create(form) => self.render_create(frame, area, ctx, form),
            Mode::ConfirmDelete(_) => {
                confirm_dialog(frame, area, "Delete show", "Really delete this show?")
            }
            Mode::List => {}
        }
    }

    fn render_create(&self, frame: &mut Frame, area: Rect, ctx: &AppContext, form: &CreateForm) {
        let popup = centered(area, 64, 18);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Publish a show ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let [content_area, items_area, hint_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let content_style = if form.focus == CreateFocus::Content {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(format!("{}_", form.content.value()))
                .style(content_style)
                .block(Block::default().borders(Borders::ALL).title(format!(
                    " Content {}/{} ",
                    form.content.value().chars().count(),
                    MAX_SHOW_CONTENT_LEN
                ))),
            content_area,
        );

        let entries = ctx.inventory.state().entries;
        let rows: Vec<ListItem> = entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<26}", entry.item.name)),
                    rarity_span(entry.item.rarity),
                    Span::raw(format!("  x{}", entry.quantity)),
                ]))
            })
            .collect();
        let items_list = List::new(rows)
            .block(Block::default().borders(Borders::ALL).title(" Showcase item "))
            .highlight_style(Style::default().bg(Color::DarkGray).bold())
            .highlight_symbol(if form.focus == CreateFocus::Items { "\u{25b6} " } else { "  " });
        let mut items_state = ListState::default().with_selected(Some(form.item_idx));
        frame.render_stateful_widget(items_list, items_area, &mut items_state);

        frame.render_widget(
            Paragraph::new("Tab: switch   Enter (on item): publish   Esc: discard")
                .style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
    }
}
