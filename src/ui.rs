//! UI rendering helpers for the terminal user interface.
//!
//! The home screen is a list of apps. An open app is drawn from its active
//! layer: every element's bounds map one to one onto terminal cells inside
//! the body box, clipped to it.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, format_clock};
use crate::config::UiSettings;
use crate::host::PlaybackState;
use crate::phone::{Phone, Screen};
use crate::scene::{Area, Element, HitTarget, Widget};
use crate::widgets::{PicGrid, TrackButtons, TrackProgressBar, TransportButton};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "move");
    map.insert("enter", "open/press");
    map.insert("tab", "next target");
    map.insert("esc", "back");
    map.insert("H", "home");
    map.insert("space/p", "play/pause");
    map.insert("x", "stop");
    map.insert("b/n", "prev/next track");
    // h/l is filled dynamically from config.
    map.insert("q", "quit");
    map
});

/// Render the controls help text for `screen`, incorporating the scrub step.
fn controls_text(screen: Screen, scrub_step: f32) -> String {
    let order: &[&str] = match screen {
        Screen::Home => &["j/k", "enter", "space/p", "x", "b/n", "q"],
        Screen::App(_) => &[
            "j/k", "tab", "h/l", "enter", "esc", "H", "space/p", "x", "b/n", "q",
        ],
    };
    order
        .iter()
        .filter_map(|k| {
            if *k == "h/l" {
                Some(format!("[h/l] scrub -/+{:.0}%", scrub_step * 100.0))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Header, status, body and footer rows of the screen.
fn screen_chunks(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(4),
    ])
    .areas(area)
}

fn body_block(title: String) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title)
}

/// Cells available to an app on a terminal of size `term`.
pub fn app_area(term: Rect) -> Area {
    let [_, _, body, _] = screen_chunks(term);
    let inner = body_block(String::new()).inner(body);
    Area::new(f32::from(inner.width), f32::from(inner.height))
}

fn status_text(phone: &Phone) -> String {
    let Some(now) = phone.now_playing() else {
        return "Nothing selected".to_string();
    };
    let seek = phone.audio().sound(&now.track.key).map_or(0.0, |s| s.seek);
    let state = match now.state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    };
    format!(
        "{state}: {} - {} [{} / {}]",
        now.track.name,
        now.track.artist,
        format_clock(seek),
        format_clock(now.duration)
    )
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, phone: &Phone, ui_settings: &UiSettings) {
    let [header_area, status_area, body_area, footer_area] = screen_chunks(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" pocketos ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, header_area);

    let status = Paragraph::new(status_text(phone)).block(
        Block::bordered()
            .padding(Padding::left(1))
            .title(" status "),
    );
    frame.render_widget(status, status_area);

    match phone.open() {
        None => draw_home(frame, phone, body_area),
        Some((descriptor, app)) => {
            let mut block = body_block(format!(" {} ", descriptor.name));
            if let Some(bg) = app.base().background() {
                block = block.title_bottom(format!(" {bg} "));
            }
            let inner = block.inner(body_area);
            frame.render_widget(block, body_area);
            draw_app(frame, app, inner);
        }
    }

    let footer = Paragraph::new(controls_text(phone.screen(), ui_settings.scrub_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, footer_area);
}

fn draw_home(frame: &mut Frame, phone: &Phone, area: Rect) {
    let items: Vec<ListItem> = phone
        .home_entries()
        .map(|d| ListItem::new(d.name.as_str()))
        .collect();
    let total = items.len();
    let list = List::new(items)
        .block(body_block(" home ".to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(phone.home_selected()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Terminal cells covered by `element`, clipped to `inner`.
fn element_rect(element: &Element, inner: Rect) -> Rect {
    let b = element.bounds();
    let x = i32::from(inner.x) + b.x.floor() as i32;
    let y = i32::from(inner.y) + b.y.floor() as i32;
    let w = b.width.ceil().max(0.0) as i32;
    let h = b.height.ceil().max(0.0) as i32;

    let x0 = x.max(i32::from(inner.x));
    let y0 = y.max(i32::from(inner.y));
    let x1 = (x + w).min(i32::from(inner.right()));
    let y1 = (y + h).min(i32::from(inner.bottom()));
    if x1 <= x0 || y1 <= y0 {
        return Rect::default();
    }
    Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16)
}

fn draw_app(frame: &mut Frame, app: &dyn App, inner: Rect) {
    let focused = app.base().focused();
    for element in app.base().active_layer().elements() {
        let rect = element_rect(element, inner);
        if rect.is_empty() {
            continue;
        }
        let focus = focused.filter(|t| t.element == element.id);
        match &element.widget {
            Widget::Image(img) => {
                let art = Paragraph::new(format!("[{}]", img.key))
                    .alignment(Alignment::Center)
                    .block(Block::bordered().dim());
                frame.render_widget(art, rect);
            }
            Widget::Text(text) => {
                frame.render_widget(Paragraph::new(text.content()), rect);
            }
            Widget::TrackPreview(preview) => {
                let [name, artist] = preview.lines();
                let mut lines = vec![Line::from(name.to_string()).bold(), Line::from(artist.to_string())];
                if focus.is_some() {
                    lines = lines.into_iter().map(|l| l.reversed()).collect();
                }
                frame.render_widget(Paragraph::new(lines), rect);
            }
            Widget::ProgressBar(bar) => {
                frame.render_widget(Paragraph::new(progress_line(bar, rect.width, focus)), rect);
            }
            Widget::Buttons(buttons) => {
                frame.render_widget(Paragraph::new(button_lines(buttons, focus)), rect);
            }
            Widget::PicGrid(grid) => draw_pic_grid(frame, grid, rect, focus),
        }
    }
}

fn progress_line(bar: &TrackProgressBar, width: u16, focus: Option<HitTarget>) -> Line<'static> {
    let width = usize::from(width.max(1));
    let at = |fraction: f32| ((fraction * width as f32) as usize).min(width - 1);
    let filled = at(bar.cursor());
    let marker = focus.map(|t| at(t.pointer.x));

    let spans: Vec<Span> = (0..width)
        .map(|i| {
            if Some(i) == marker {
                Span::styled("◆", Style::default().add_modifier(Modifier::REVERSED))
            } else if i < filled {
                Span::raw("━")
            } else if i == filled {
                Span::raw("●")
            } else {
                Span::raw("─").dim()
            }
        })
        .collect();
    Line::from(spans)
}

fn button_lines(buttons: &TrackButtons, focus: Option<HitTarget>) -> Vec<Line<'static>> {
    let pressed = focus.map(|t| buttons.button_at(t.pointer.x));
    let style_for = |b: TransportButton| {
        if Some(b) == pressed {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    };
    let row = |f: &dyn Fn(TransportButton) -> String| {
        Line::from(
            TransportButton::ALL
                .iter()
                .map(|b| Span::styled(f(*b), style_for(*b)))
                .collect::<Vec<_>>(),
        )
    };
    vec![
        row(&|_| "┌─────┐".to_string()),
        row(&|b| format!("│{:^5}│", b.label())),
        row(&|_| "└─────┘".to_string()),
    ]
}

fn draw_pic_grid(frame: &mut Frame, grid: &PicGrid, rect: Rect, focus: Option<HitTarget>) {
    if let Some(item) = grid.opened() {
        let mut lines = vec![
            Line::from(format!("[{}]", item.image)),
            Line::from(""),
        ];
        if let Some(caption) = &item.caption {
            lines.push(Line::from(caption.clone()).italic());
        }
        lines.push(Line::from("< prev | close | next >").dim());
        let view = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(format!(" {} ", item.title)));
        frame.render_widget(view, rect);
        return;
    }

    let columns = grid.columns().max(1);
    let rows = grid.rows().max(1);
    let cell_w = rect.width / columns as u16;
    let cell_h = rect.height / rows as u16;
    if cell_w == 0 || cell_h == 0 {
        return;
    }
    let selected = focus.and_then(|t| grid.cell_at(t.pointer));

    for (i, item) in grid.media().iter().enumerate() {
        let cell = Rect::new(
            rect.x + (i % columns) as u16 * cell_w,
            rect.y + (i / columns) as u16 * cell_h,
            cell_w,
            cell_h,
        );
        let mut block = Block::bordered().title(item.title.clone());
        if selected == Some(i) {
            block = block.reversed();
        }
        let content = Paragraph::new(format!("[{}]", item.image))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(content, cell);
    }
}

#[cfg(test)]
mod tests;
