use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::groups::{self, Category, Group};
use crate::tui::state::{Focus, TuiApp};
use crate::tui::state_render::{status_label, truncate_display, wrap_display};
use crate::tui::theme::Theme;

const SKELETON_CARDS: usize = 4;
const HIGHLIGHT_SYMBOL: &str = "▶ ";

impl TuiApp {
    pub fn view(&mut self, f: &mut Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Search input
                Constraint::Length(3), // Category chips
                Constraint::Min(1),    // Results
                Constraint::Length(2), // Footer
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        self.render_input(f, chunks[1]);
        self.render_categories(f, chunks[2]);
        self.render_results(f, chunks[3]);
        self.render_footer(f, chunks[4]);
    }

    fn border_for(&self, focus: Focus) -> Style {
        if self.focus == focus {
            self.theme.focus_border_style
        } else {
            self.theme.border_style
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let loading = self.search().loading;
        let status = if self.credentials_missing && !loading {
            "No API key".to_string()
        } else {
            status_label(loading, self.spinner_state)
        };
        let left = format!(" {} · {}", self.title, self.model);
        let pad = (area.width as usize)
            .saturating_sub(left.chars().count() + status.chars().count() + 1);
        let line = Line::from(vec![
            Span::styled(left, self.theme.header_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(status, self.theme.footer_style),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_input(&mut self, f: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Input;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_for(Focus::Input))
            .title(" Search groups ");
        let cursor_style = if focused {
            self.theme.input_style.add_modifier(Modifier::REVERSED)
        } else {
            self.theme.input_style
        };

        self.textarea.set_style(self.theme.input_style);
        self.textarea.set_cursor_style(cursor_style);
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea
            .set_placeholder_style(self.theme.skeleton_style);
        self.textarea.set_block(block);

        f.render_widget(&self.textarea, area);
    }

    fn render_categories(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_for(Focus::Categories))
            .title(" Categories ");
        let active = self.search().category;
        let mut spans = Vec::with_capacity(Category::ALL.len() * 2);
        for (i, c) in Category::ALL.iter().enumerate() {
            let mut style = if active == Some(*c) {
                self.theme.chip_active_style
            } else {
                self.theme.chip_style
            };
            if self.focus == Focus::Categories && i == self.category_cursor {
                style = style.patch(self.theme.chip_cursor_style);
            }
            spans.push(Span::styled(format!(" {} ", c.label()), style));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect) {
        let state = self.search();
        let loading = state.loading;
        let count = state.groups.len();
        let border = self.border_for(Focus::Results);

        if loading && count == 0 {
            let block = Block::default().borders(Borders::ALL).border_style(border);
            let items = skeleton_items(&self.theme, area.width.saturating_sub(4) as usize);
            f.render_widget(List::new(items).block(block), area);
            return;
        }

        if count == 0 {
            let block = Block::default().borders(Borders::ALL).border_style(border);
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    groups::EMPTY_STATE_TITLE,
                    self.theme.card_title_style,
                )),
                Line::from(""),
                Line::from(Span::styled(
                    groups::EMPTY_STATE_HINT,
                    self.theme.card_body_style,
                )),
            ];
            f.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(block),
                area,
            );
            return;
        }

        let mut title = format!(" {} ", groups::results_heading(count));
        if loading {
            title.push_str("· Updating results... ");
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        let card_width = area
            .width
            .saturating_sub(2 + HIGHLIGHT_SYMBOL.chars().count() as u16) as usize;
        let items: Vec<ListItem> = state
            .groups
            .iter()
            .map(|g| card_item(g, &self.theme, card_width))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.selected_style)
            .highlight_symbol(HIGHLIGHT_SYMBOL);
        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let help = match self.focus {
            Focus::Input => "Enter search · Tab focus · /help · Ctrl+C×2 quit",
            Focus::Categories => "←/→ move · Enter/Space select · Esc back",
            Focus::Results => "↑/↓ move · Enter/o open · y copy link · Esc back",
        };
        let first = match &self.notice {
            Some(n) => Line::from(Span::styled(n.clone(), self.theme.notice_style)),
            None => Line::from(Span::styled(help, self.theme.footer_style)),
        };
        let disclaimer = Line::from(Span::styled(
            truncate_display(groups::DISCLAIMER, area.width as usize),
            self.theme.footer_style,
        ));
        f.render_widget(Paragraph::new(vec![first, disclaimer]), area);
    }
}

fn card_item<'a>(group: &Group, theme: &Theme, width: usize) -> ListItem<'a> {
    let mut lines: Vec<Line> = Vec::new();
    let name = if group.name.trim().is_empty() {
        "(unnamed group)".to_string()
    } else {
        group.name.clone()
    };
    lines.push(Line::from(Span::styled(
        truncate_display(&name, width),
        theme.card_title_style,
    )));
    lines.push(Line::from(Span::styled(
        truncate_display(&groups::meta_line(group), width),
        theme.card_meta_style,
    )));
    if !group.description.trim().is_empty() {
        for l in wrap_display(&group.description, width).into_iter().take(3) {
            lines.push(Line::from(Span::styled(l, theme.card_body_style)));
        }
    }
    let tags = groups::tag_line(group);
    if !tags.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_display(&tags, width),
            theme.tag_style,
        )));
    }
    if let Some(lang) = group.language.as_deref()
        && !lang.trim().is_empty()
    {
        lines.push(Line::from(Span::styled(
            format!("Language: {lang}"),
            theme.card_meta_style,
        )));
    }
    if !group.invite_link.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_display(&group.invite_link, width),
            theme.link_style,
        )));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}

fn skeleton_items<'a>(theme: &Theme, width: usize) -> Vec<ListItem<'a>> {
    let bar = |frac: usize| "░".repeat(width * frac / 10);
    (0..SKELETON_CARDS)
        .map(|_| {
            ListItem::new(vec![
                Line::from(Span::styled(bar(5), theme.skeleton_style)),
                Line::from(Span::styled(bar(3), theme.skeleton_style)),
                Line::from(Span::styled(bar(9), theme.skeleton_style)),
                Line::from(Span::styled(bar(7), theme.skeleton_style)),
                Line::from(""),
            ])
        })
        .collect()
}
