//! TUI rendering for the virtual piano.
//!
//! The piano is drawn from the core's [`KeyGeometry`] sequence computed in
//! terminal-cell units: white keys as colored columns with separators, black
//! keys painted over their top rows. The renderer is a read-only consumer of
//! the geometry and the pressed-key set.

use crate::config::Theme;
use clavier_core::{full_note_of, layout, KeyGeometry, KeyKind, KeySizing, NoteRange};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Sizing in terminal cells: the keyboard stretches across the area width
/// and uses the full height for white keys.
pub fn cell_sizing(range: NoteRange, area: Rect) -> KeySizing {
    let mut sizing = KeySizing::fit_horizontally(area.width as f64, range);
    if sizing.white_width < 1.0 {
        // area narrower than the white-key count: let the keyboard overflow
        sizing.white_width = 1.0;
        sizing.offset = 0.0;
    }
    sizing.white_height = area.height as f64;
    sizing.black_height = (area.height as f64 * 0.63).floor().max(1.0);
    sizing.black_width = (sizing.white_width * 0.6).round().max(1.0);
    sizing
}

/// Key geometry in cell units for the given range and area, origin at the
/// area's top-left corner.
pub fn cell_layout(range: NoteRange, area: Rect) -> Vec<KeyGeometry> {
    layout(range, &cell_sizing(range, area))
}

/// Render the piano into `area` from precomputed cell-unit geometry.
pub fn render_piano(
    frame: &mut Frame,
    area: Rect,
    keys: &[KeyGeometry],
    pressed: &[u8],
    theme: &Theme,
) {
    if area.width < 4 || area.height < 2 {
        return;
    }

    let width = area.width as usize;
    let height = area.height as usize;
    let mut grid = vec![vec![(' ', Style::default()); width]; height];

    let is_pressed = |key: u8| pressed.contains(&key);

    // White keys first, black keys painted on top.
    for key in keys.iter().filter(|k| k.kind == KeyKind::White) {
        let style = if is_pressed(key.key) {
            Style::default().bg(theme.pressed_key())
        } else {
            Style::default().bg(theme.white_key())
        };
        let x0 = key.x.round() as usize;
        let x1 = (key.x + key.width).round() as usize;
        for row in grid.iter_mut() {
            for cell in row.iter_mut().take(x1.min(width)).skip(x0.min(width)) {
                *cell = (' ', style);
            }
            // separator on the key's left edge
            if x0 < width {
                row[x0] = ('|', style.fg(Color::Black));
            }
        }
        if theme.show_note_names {
            let label = full_note_of(key.key);
            let key_cells = x1.saturating_sub(x0 + 1);
            if key_cells >= label.len() && height > 0 {
                let start = x0 + 1 + (key_cells - label.len()) / 2;
                for (i, c) in label.chars().enumerate() {
                    if start + i < width {
                        grid[height - 1][start + i] = (c, style.fg(Color::Black));
                    }
                }
            }
        }
    }

    for key in keys.iter().filter(|k| k.kind == KeyKind::Black) {
        let style = if is_pressed(key.key) {
            Style::default()
                .bg(theme.pressed_key())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(theme.black_key())
        };
        let x0 = key.x.round() as usize;
        let x1 = (key.x + key.width).round() as usize;
        let rows = (key.height.round() as usize).min(height);
        for row in grid.iter_mut().take(rows) {
            for cell in row.iter_mut().take(x1.min(width)).skip(x0.min(width)) {
                *cell = (' ', style);
            }
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(c, style)| Span::styled(c.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the user-visible invalid-interval state instead of a keyboard.
pub fn render_invalid_interval(frame: &mut Frame, area: Rect, range: NoteRange, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Invalid interval",
            Style::default()
                .fg(theme.invalid())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} .. {} is not a playable range (bounds must be A0..C8, start before end)",
            full_note_of(range.start),
            full_note_of(range.end),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// The outer frame: border plus a title describing range, input source and
/// the sampler port.
pub fn outer_block<'a>(
    range: NoteRange,
    device: Option<&str>,
    port: Option<&str>,
    theme: &Theme,
) -> Block<'a> {
    let input = device.unwrap_or("mouse");
    let title = match port {
        Some(port) => format!(
            " Clavier [{}..{}] ({}) -> {} ",
            full_note_of(range.start),
            full_note_of(range.end),
            input,
            port
        ),
        None => format!(
            " Clavier [{}..{}] ({}) (no sampler connected) ",
            full_note_of(range.start),
            full_note_of(range.end),
            input
        ),
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_layout_spans_area() {
        let area = Rect::new(0, 0, 120, 12);
        let keys = cell_layout(NoteRange::FULL_PIANO, area);
        assert_eq!(keys.len(), 88);
        for key in &keys {
            assert!(key.x >= 0.0);
            assert!(key.x + key.width <= area.width as f64);
            assert!(key.height <= area.height as f64);
        }
    }

    #[test]
    fn test_cell_layout_black_keys_are_shorter() {
        let area = Rect::new(0, 0, 120, 12);
        let keys = cell_layout(NoteRange::FULL_PIANO, area);
        let white_h = keys
            .iter()
            .find(|k| k.kind == KeyKind::White)
            .map(|k| k.height)
            .unwrap();
        let black_h = keys
            .iter()
            .find(|k| k.kind == KeyKind::Black)
            .map(|k| k.height)
            .unwrap();
        assert!(black_h < white_h);
        assert!(black_h >= 1.0);
    }

    #[test]
    fn test_cell_sizing_narrow_area_keeps_minimum_black_width() {
        let area = Rect::new(0, 0, 60, 8);
        let sizing = cell_sizing(NoteRange::FULL_PIANO, area);
        assert!(sizing.black_width >= 1.0);
        assert!(sizing.white_width >= 1.0);
    }
}
