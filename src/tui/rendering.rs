use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{Focus, MessageType, StatusMessage};
use super::layout::{CatalogLayout, QuizLayout};
use super::screens::{CatalogScreen, QuizScreen, ResultsPanel, ResultsState};
use crate::catalog::FilterForm;
use crate::results::ProductCard;
use crate::search_history::NO_FILTERS_LABEL;
use crate::utils::single_line;
use crate::view::{HistoryItem, PageNav};

const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const TEXT: Color = Color::Rgb(250, 250, 250);
const BAR: Color = Color::Rgb(24, 24, 27);

fn bordered(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { ACCENT } else { MUTED };
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)).title(title)
}

fn highlighted() -> Style {
    Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Render the quiz page
pub fn render_quiz(frame: &mut Frame, screen: &QuizScreen, status: Option<&StatusMessage>) {
    let layout = QuizLayout::new(frame.area());

    render_question(frame, layout.question_area, screen);
    if screen.results.visible {
        render_results(frame, layout.results_area, &screen.results);
    } else {
        let hint = Paragraph::new("Answer the questions to see matching products")
            .style(Style::default().fg(MUTED))
            .block(bordered(" Results ", false))
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, layout.results_area);
    }

    let mut keys = vec!["↑↓: choose", "Enter: select"];
    if screen.back_visible {
        keys.push("Backspace: back");
    }
    if screen.results.nav.visible {
        keys.push("←→: page");
    }
    if matches!(screen.results.state, ResultsState::Error(_)) {
        keys.push("F5: retry");
    }
    if screen.restart_visible {
        keys.push("Ctrl+R: start over");
    }
    keys.push("Ctrl+C: quit");
    render_status_bar(frame, layout.status_area, &keys, status);
}

fn render_question(frame: &mut Frame, area: Rect, screen: &QuizScreen) {
    let Some(step) = screen.active() else {
        return;
    };

    let selected = screen.selected.get(screen.active_step).and_then(|v| v.as_deref());
    let items: Vec<ListItem> = step
        .options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if selected == Some(option.value.as_str()) { "●" } else { "○" };
            let content = format!("{} {}. {}", marker, idx + 1, single_line(&option.label));
            let style =
                if idx == screen.cursor { highlighted() } else { Style::default().fg(MUTED) };
            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(
        " Question {}/{}: {} ",
        screen.active_step + 1,
        screen.steps.len(),
        single_line(&step.title)
    );
    frame.render_widget(List::new(items).block(bordered(&title, true)), area);
}

fn render_results(frame: &mut Frame, area: Rect, panel: &ResultsPanel) {
    let block = bordered(" Results ", false);

    match &panel.state {
        ResultsState::Idle => frame.render_widget(block, area),
        ResultsState::Loading => {
            let text = Paragraph::new("Loading...").style(Style::default().fg(MUTED)).block(block);
            frame.render_widget(text, area);
        }
        ResultsState::Empty => {
            let text = Text::from(vec![
                Line::from("No products found"),
                Line::from(Span::styled("Ctrl+R: start over", Style::default().fg(MUTED))),
            ]);
            frame.render_widget(Paragraph::new(text).block(block), area);
        }
        ResultsState::Error(message) => {
            let text = Text::from(vec![
                Line::from(Span::styled(
                    format!("Error: {}", single_line(message)),
                    Style::default().fg(ERROR),
                )),
                Line::from(Span::styled(
                    "F5: retry | Ctrl+R: start over",
                    Style::default().fg(MUTED),
                )),
            ]);
            let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        ResultsState::Cards(cards) => {
            let mut items: Vec<ListItem> = cards.iter().map(card_item).collect();
            if panel.nav.visible {
                items.push(ListItem::new(nav_line(panel.nav)));
            }
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

fn card_item(card: &ProductCard) -> ListItem<'static> {
    let lines = vec![
        Line::from(vec![
            Span::styled(single_line(&card.title), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(card.price.clone(), Style::default().fg(ACCENT)),
        ]),
        Line::from(single_line(&card.description)),
        Line::from(Span::styled(
            format!("{}  img: {}", card.link, single_line(&card.image)),
            Style::default().fg(MUTED),
        )),
        Line::from(""),
    ];
    ListItem::new(Text::from(lines))
}

fn nav_line(nav: PageNav) -> Line<'static> {
    let style = |disabled: bool| {
        if disabled { Style::default().fg(MUTED) } else { Style::default().fg(ACCENT) }
    };
    Line::from(vec![
        Span::styled("← Prev", style(nav.prev_disabled)),
        Span::raw("   "),
        Span::styled("Next →", style(nav.next_disabled)),
    ])
}

/// Everything the catalog renderer reads
pub struct CatalogRenderState<'a> {
    pub screen: &'a CatalogScreen,
    pub form: &'a FilterForm,
    pub focus: Focus,
    pub facet_cursor: usize,
    pub history_highlight: usize,
    pub status: Option<&'a StatusMessage>,
}

/// Render the catalog page
pub fn render_catalog(frame: &mut Frame, state: &CatalogRenderState) {
    let layout = CatalogLayout::new(frame.area());

    let query = Paragraph::new(state.form.query.as_str())
        .block(bordered(" Search ", state.focus == Focus::Query));
    frame.render_widget(query, layout.query_area);

    render_filters(frame, layout.filters_area, state);
    render_results(frame, layout.results_area, &state.screen.results);

    let keys = [
        "Tab: focus",
        "Enter: search",
        "Space: toggle",
        "Ctrl+S: sort",
        "Ctrl+R: reset",
        "F5: retry",
        "Ctrl+C: quit",
    ];
    render_status_bar(frame, layout.status_area, &keys, state.status);

    // Drawn last so it overlays the page
    if let Some(items) = &state.screen.history {
        let area = layout.dropdown_area(items.len());
        render_history(frame, area, items, state.history_highlight);
    }
}

fn render_filters(frame: &mut Frame, area: Rect, state: &CatalogRenderState) {
    let form = state.form;
    let mut lines = Vec::new();

    let mut current_field = None;
    for (idx, control) in form.controls().iter().enumerate() {
        if current_field != Some(control.field) {
            current_field = Some(control.field);
            lines.push(Line::from(Span::styled(
                control.field.as_str().to_uppercase(),
                Style::default().fg(MUTED),
            )));
        }
        let mark = if control.checked { "[x]" } else { "[ ]" };
        let text = format!(" {} {}", mark, single_line(&control.label));
        let style = if state.focus == Focus::Facets && idx == state.facet_cursor {
            highlighted()
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let price_style = |focus: Focus| {
        if state.focus == focus { highlighted() } else { Style::default() }
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Price from: {}", form.price_min),
        price_style(Focus::PriceMin),
    )));
    lines.push(Line::from(Span::styled(
        format!("Price to: {}", form.price_max),
        price_style(Focus::PriceMax),
    )));

    let sort = form
        .sort_options()
        .iter()
        .find(|option| option.value == form.sort())
        .map(|option| option.label.as_str())
        .unwrap_or("none");
    lines.push(Line::from(format!("Sort: {}", sort)));

    let focused = state.focus != Focus::Query;
    let paragraph = Paragraph::new(Text::from(lines)).block(bordered(" Filters ", focused));
    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, items: &[HistoryItem], highlight: usize) {
    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let badges = if item.badges.is_empty() {
                let style = Style::default().fg(MUTED).add_modifier(Modifier::ITALIC);
                Span::styled(NO_FILTERS_LABEL, style)
            } else {
                Span::styled(item.badges.join(" · "), Style::default().fg(MUTED))
            };
            let style = if idx == highlight { highlighted() } else { Style::default() };
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(item.query.clone(), style)),
                Line::from(badges),
            ]))
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(List::new(rows).block(bordered(" Recent searches ", true)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, keys: &[&str], status: Option<&StatusMessage>) {
    let (text, style) = match status {
        Some(message) => {
            let color = match message.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => ERROR,
            };
            (format!(" {} ", message.text), Style::default().fg(color).bg(BAR))
        }
        None => (format!(" {} ", keys.join(" | ")), Style::default().fg(TEXT).bg(BAR)),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
