#[cfg(test)]
#[path = "pane_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Message;

struct PaneCacheEntry<'a> {
    text_len: usize,
    lines: Vec<Line<'a>>,
}

/// Rendered line cache for one projection of the store. Only the last message
/// in the pane can still grow (the entry a stream is appending to), so all
/// earlier entries are served from cache untouched.
pub struct PaneList<'a> {
    cache: HashMap<usize, PaneCacheEntry<'a>>,
    line_width: usize,
    lines_len: usize,
    header_color: Color,
}

impl<'a> PaneList<'a> {
    pub fn new(header_color: Color) -> PaneList<'a> {
        return PaneList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
            header_color,
        };
    }

    pub fn set_messages(&mut self, messages: &[&Message], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if idx < (messages.len() - 1) || message.text.len() == cache_entry.text_len {
                        return cache_entry.lines.len();
                    }
                }

                let mut lines = vec![Line::from(Span::styled(
                    message.author.to_string(),
                    Style::default()
                        .fg(self.header_color)
                        .add_modifier(Modifier::BOLD),
                ))];
                for text_line in message.as_string_lines(line_width.saturating_sub(2)) {
                    lines.push(Line::from(text_line));
                }
                lines.push(Line::from(""));

                let lines_count = lines.len();
                self.cache.insert(
                    idx,
                    PaneCacheEntry {
                        text_len: message.text.len(),
                        lines,
                    },
                );

                return lines_count;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn is_empty(&self) -> bool {
        return self.lines_len == 0;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();
        let lines: Vec<Line<'a>> = indexes
            .iter()
            .flat_map(|idx| {
                return self.cache.get(idx).unwrap().lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
