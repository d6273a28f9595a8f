use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind, vec2};
use touchview_protocol::{Point, RenderCommand, TextAlign, ThemeToken};

use crate::theme::{self, ThemeMode};

/// Screen mapping accumulated from nested `PushTransform` commands.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenMap {
    origin: Pos2,
    tx: f64,
    ty: f64,
    s: f64,
}

impl ScreenMap {
    fn at(origin: Pos2) -> Self {
        Self {
            origin,
            tx: 0.0,
            ty: 0.0,
            s: 1.0,
        }
    }

    fn pos(&self, p: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + (p.x * self.s + self.tx) as f32,
            self.origin.y + (p.y * self.s + self.ty) as f32,
        )
    }

    fn rect(&self, r: &touchview_protocol::Rect) -> Rect {
        let min = self.pos(Point::new(r.x, r.y));
        Rect::from_min_size(min, vec2((r.w * self.s) as f32, (r.h * self.s) as f32))
    }

    /// Surface transforms are uniform, so only `scale.x` is used.
    fn push(&self, translate: Point, scale: Point) -> Self {
        Self {
            tx: self.tx + translate.x * self.s,
            ty: self.ty + translate.y * self.s,
            s: self.s * scale.x,
            ..*self
        }
    }
}

/// How a rect command is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Block,
    /// Finger contact: filled disc.
    Contact,
    /// Pinch centre: ring with a crosshair.
    Anchor,
}

fn shape_for(token: ThemeToken) -> Shape {
    match token {
        ThemeToken::TouchPoint => Shape::Contact,
        ThemeToken::PinchMidpoint => Shape::Anchor,
        _ => Shape::Block,
    }
}

/// Paint `commands` into `painter`, with client space starting at `origin`.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    origin: Pos2,
    mode: ThemeMode,
) {
    let base = ScreenMap::at(origin);
    let mut maps: Vec<ScreenMap> = Vec::new();
    let mut clips: Vec<Rect> = Vec::new();

    for cmd in commands {
        let map = maps.last().copied().unwrap_or(base);
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
            } => {
                let r = map.rect(rect);
                if r.width() < 0.5 || r.height() < 0.5 || !painter.clip_rect().intersects(r) {
                    continue;
                }
                let fill = theme::resolve(*color, mode);
                let stroke = border_color.map(|bc| Stroke::new(1.5, theme::resolve(bc, mode)));
                paint_rect(painter, r, shape_for(*color), fill, stroke);
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                let size = (*font_size * map.s) as f32;
                if size < 1.0 {
                    continue;
                }
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_CENTER,
                    TextAlign::Center => Align2::CENTER_CENTER,
                    TextAlign::Right => Align2::RIGHT_CENTER,
                };
                painter.text(
                    map.pos(*position),
                    anchor,
                    text,
                    FontId::monospace(size),
                    theme::resolve(*color, mode),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment(
                    [map.pos(*from), map.pos(*to)],
                    Stroke::new(*width as f32, theme::resolve(*color, mode)),
                );
            }

            RenderCommand::SetClip { rect } => {
                clips.push(painter.clip_rect());
                painter.set_clip_rect(painter.clip_rect().intersect(map.rect(rect)));
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clips.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::PushTransform { translate, scale } => {
                maps.push(map.push(*translate, *scale));
            }

            RenderCommand::PopTransform => {
                maps.pop();
            }
        }
    }
}

fn paint_rect(
    painter: &egui::Painter,
    r: Rect,
    shape: Shape,
    fill: Color32,
    stroke: Option<Stroke>,
) {
    let radius = r.width().min(r.height()) / 2.0;
    match shape {
        Shape::Block => {
            painter.rect_filled(r, CornerRadius::ZERO, fill);
            if let Some(stroke) = stroke {
                painter.rect_stroke(r, CornerRadius::ZERO, stroke, StrokeKind::Outside);
            }
        }
        Shape::Contact => {
            painter.circle(r.center(), radius, fill, stroke.unwrap_or(Stroke::NONE));
        }
        Shape::Anchor => {
            let c = r.center();
            let ring = Stroke::new(2.0, fill);
            painter.circle_stroke(c, radius, ring);
            painter.line_segment([c - vec2(radius, 0.0), c + vec2(radius, 0.0)], ring);
            painter.line_segment([c - vec2(0.0, radius), c + vec2(0.0, radius)], ring);
        }
    }
}
