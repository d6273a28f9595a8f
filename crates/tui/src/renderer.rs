use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use touchview_core::views::surface::render_surface;
use touchview_protocol::{RenderCommand, ThemeToken, Viewport};

use crate::replay::Replay;

/// Client pixels covered by one terminal cell. Cells are about twice as
/// tall as they are wide.
const PX_PER_COL: f64 = 8.0;
const PX_PER_ROW: f64 = 16.0;

fn theme_to_color(token: &ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::SurfaceLight => Color::Rgb(70, 72, 90),
        ThemeToken::SurfaceDark => Color::Rgb(30, 30, 46),
        ThemeToken::SurfaceBorder => Color::LightBlue,
        ThemeToken::SurfaceAxis => Color::LightRed,
        ThemeToken::TouchPoint => Color::Green,
        ThemeToken::PinchMidpoint => Color::Yellow,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextMuted => Color::Gray,
    }
}

#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    s: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        tx: 0.0,
        ty: 0.0,
        s: 1.0,
    };

    /// Client pixel -> fractional cell coordinates.
    fn to_cell(self, x: f64, y: f64) -> (f64, f64) {
        (
            (x * self.s + self.tx) / PX_PER_COL,
            (y * self.s + self.ty) / PX_PER_ROW,
        )
    }
}

/// Rasterize render commands into terminal cells inside `area`.
pub fn render_commands(buf: &mut Buffer, area: Rect, commands: &[RenderCommand]) {
    let mut transform_stack = vec![Transform::IDENTITY];
    let mut clip = area;

    for cmd in commands {
        let tf = transform_stack.last().copied().unwrap_or(Transform::IDENTITY);
        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let (c0, r0) = tf.to_cell(rect.x, rect.y);
                let (c1, r1) = tf.to_cell(rect.x + rect.w, rect.y + rect.h);
                let bg = theme_to_color(color);
                let rows = within(cell_span(r0, r1, area.y, area.height), clip.y, clip.bottom());
                let cols = within(cell_span(c0, c1, area.x, area.width), clip.x, clip.right());
                for row in rows {
                    for col in cols.clone() {
                        buf[(col, row)].set_char(' ').set_bg(bg);
                    }
                }
            }

            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let (c0, r0) = tf.to_cell(from.x, from.y);
                let (c1, r1) = tf.to_cell(to.x, to.y);
                let ch = if (c1 - c0).abs() >= (r1 - r0).abs() * 2.0 {
                    '─'
                } else {
                    '│'
                };
                let steps = ((c1 - c0).abs().max((r1 - r0).abs()) * 2.0).ceil().max(1.0) as usize;
                let fg = theme_to_color(color);
                for i in 0..=steps {
                    let t = i as f64 / steps as f64;
                    if let Some((col, row)) = cell_at(c0 + (c1 - c0) * t, r0 + (r1 - r0) * t, area, clip) {
                        buf[(col, row)].set_char(ch).set_fg(fg);
                    }
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                ..
            } => {
                let (c, r) = tf.to_cell(position.x, position.y);
                let fg = theme_to_color(color);
                for (i, ch) in text.chars().enumerate() {
                    if let Some((col, row)) = cell_at(c + i as f64, r, area, clip) {
                        buf[(col, row)].set_char(ch).set_fg(fg).set_bg(Color::Black);
                    }
                }
            }

            RenderCommand::SetClip { rect } => {
                let (c0, r0) = tf.to_cell(rect.x, rect.y);
                let (c1, r1) = tf.to_cell(rect.x + rect.w, rect.y + rect.h);
                let cols = cell_span(c0, c1, area.x, area.width);
                let rows = cell_span(r0, r1, area.y, area.height);
                clip = Rect::new(
                    cols.start,
                    rows.start,
                    cols.end.saturating_sub(cols.start),
                    rows.end.saturating_sub(rows.start),
                )
                .intersection(clip);
            }

            RenderCommand::ClearClip => clip = area,

            RenderCommand::PushTransform { translate, scale } => {
                transform_stack.push(Transform {
                    tx: tf.tx + translate.x * tf.s,
                    ty: tf.ty + translate.y * tf.s,
                    s: tf.s * scale.x,
                });
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }
        }
    }
}

/// Absolute cell indices covered by the fractional range `[from, to)`
/// (relative to `origin`), limited to `origin..origin + len`.
fn cell_span(from: f64, to: f64, origin: u16, len: u16) -> std::ops::Range<u16> {
    let lo = from.min(to).floor().max(0.0);
    let hi = from.max(to).ceil().min(f64::from(len));
    if hi <= lo {
        return origin..origin;
    }
    (origin + lo as u16)..(origin + hi as u16)
}

fn within(range: std::ops::Range<u16>, lo: u16, hi: u16) -> std::ops::Range<u16> {
    range.start.max(lo)..range.end.min(hi)
}

fn cell_at(col: f64, row: f64, area: Rect, clip: Rect) -> Option<(u16, u16)> {
    if col < 0.0 || row < 0.0 {
        return None;
    }
    let x = area.x.saturating_add(col as u16);
    let y = area.y.saturating_add(row as u16);
    (x >= clip.x && x < clip.right() && y >= clip.y && y < clip.bottom()).then_some((x, y))
}

pub fn render_tui(replay: &mut Replay) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let title = replay
        .trace()
        .name
        .clone()
        .unwrap_or_else(|| "gesture trace".to_string());

    loop {
        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let header = Block::default()
                .title(format!(
                    " touchview | {title} | event {}/{} | ←→ step | Home/End | q quit ",
                    replay.applied(),
                    replay.len(),
                ))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let footer_area = Rect::new(0, area.height.saturating_sub(2), area.width, 2);
            let content_area = Rect::new(0, 1, area.width, area.height.saturating_sub(3));

            let viewport = Viewport::new(
                f64::from(content_area.width) * PX_PER_COL,
                f64::from(content_area.height) * PX_PER_ROW,
            );
            let cmds = render_surface(&viewport, &replay.transform(), replay.touches());
            render_commands(frame.buffer_mut(), content_area, &cmds);

            let event_line = match replay.current_event() {
                Some(ev) => format!(
                    "t={:.0}ms {:?} {} touch(es)",
                    ev.time_ms,
                    ev.phase,
                    ev.touches.len()
                ),
                None => "no events applied".to_string(),
            };
            let gesture = replay
                .controller()
                .gesture()
                .map_or_else(|| "-".to_string(), |g| format!("{g:?}"));
            let footer = Paragraph::new(format!("{event_line} | gesture {gesture}"))
                .block(Block::default().borders(Borders::TOP))
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(footer, footer_area);
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => replay.forward()?,
                    KeyCode::Left | KeyCode::Char('h') => replay.back()?,
                    KeyCode::Home => replay.seek(0)?,
                    KeyCode::End => replay.seek(replay.len())?,
                    _ => {}
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
