use touchview_protocol::{
    Point, Rect, RenderCommand, TextAlign, ThemeToken, Transform, Viewport,
};

use crate::controller::midpoint;

const TILE_SIZE: f64 = 50.0;
const MARKER_SIZE: f64 = 18.0;
const FONT_SIZE: f64 = 12.0;
const STATUS_MARGIN: f64 = 8.0;

/// Render a checkerboard test surface the size of `viewport` under
/// `transform`, plus markers for the active touches and a status line.
///
/// Everything between `PushTransform` and `PopTransform` is in surface
/// space; touch markers and the status line are in client space.
pub fn render_surface(
    viewport: &Viewport,
    transform: &Transform,
    touches: &[Point],
) -> Vec<RenderCommand> {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }

    let cols = (viewport.width / TILE_SIZE).ceil() as usize;
    let rows = (viewport.height / TILE_SIZE).ceil() as usize;
    let mut commands = Vec::with_capacity(cols * rows + touches.len() + 12);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
        color: ThemeToken::Background,
        border_color: None,
    });
    commands.push(RenderCommand::SetClip {
        rect: Rect::new(0.0, 0.0, viewport.width, viewport.height),
    });

    commands.push(RenderCommand::PushTransform {
        translate: transform.translation(),
        scale: Point::new(transform.scale, transform.scale),
    });

    for row in 0..rows {
        for col in 0..cols {
            let x = col as f64 * TILE_SIZE;
            let y = row as f64 * TILE_SIZE;
            let w = TILE_SIZE.min(viewport.width - x);
            let h = TILE_SIZE.min(viewport.height - y);
            commands.push(RenderCommand::DrawRect {
                rect: Rect::new(x, y, w, h),
                color: if (row + col) % 2 == 0 {
                    ThemeToken::SurfaceLight
                } else {
                    ThemeToken::SurfaceDark
                },
                border_color: None,
            });
        }
    }

    // Surface outline and centre cross, so pan and anchoring are visible.
    let (w, h) = (viewport.width, viewport.height);
    for (from, to) in [
        ((0.0, 0.0), (w, 0.0)),
        ((w, 0.0), (w, h)),
        ((w, h), (0.0, h)),
        ((0.0, h), (0.0, 0.0)),
    ] {
        commands.push(RenderCommand::DrawLine {
            from: Point::new(from.0, from.1),
            to: Point::new(to.0, to.1),
            color: ThemeToken::SurfaceBorder,
            width: 2.0,
        });
    }
    let (cx, cy) = (viewport.width / 2.0, viewport.height / 2.0);
    commands.push(RenderCommand::DrawLine {
        from: Point::new(cx, 0.0),
        to: Point::new(cx, viewport.height),
        color: ThemeToken::SurfaceAxis,
        width: 1.0,
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(0.0, cy),
        to: Point::new(viewport.width, cy),
        color: ThemeToken::SurfaceAxis,
        width: 1.0,
    });

    commands.push(RenderCommand::PopTransform);

    for touch in touches {
        commands.push(marker(*touch, ThemeToken::TouchPoint));
    }
    if let [a, b, ..] = touches {
        commands.push(marker(midpoint(*a, *b), ThemeToken::PinchMidpoint));
    }

    commands.push(RenderCommand::DrawText {
        position: Point::new(STATUS_MARGIN, viewport.height - STATUS_MARGIN - FONT_SIZE / 2.0),
        text: format!(
            "scale {:.2}  x {:.0}  y {:.0}",
            transform.scale, transform.x, transform.y
        ),
        color: ThemeToken::TextPrimary,
        font_size: FONT_SIZE,
        align: TextAlign::Left,
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(STATUS_MARGIN, STATUS_MARGIN + FONT_SIZE / 2.0),
        text: gesture_hint(touches.len()).to_string(),
        color: ThemeToken::TextMuted,
        font_size: FONT_SIZE,
        align: TextAlign::Left,
    });

    commands.push(RenderCommand::ClearClip);
    commands
}

fn gesture_hint(touch_count: usize) -> &'static str {
    match touch_count {
        0 => "double tap to zoom",
        1 => "drag to pan while zoomed",
        _ => "pinch to zoom",
    }
}

fn marker(center: Point, color: ThemeToken) -> RenderCommand {
    RenderCommand::DrawRect {
        rect: Rect::new(
            center.x - MARKER_SIZE / 2.0,
            center.y - MARKER_SIZE / 2.0,
            MARKER_SIZE,
            MARKER_SIZE,
        ),
        color,
        border_color: Some(ThemeToken::Border),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(400.0, 300.0)
    }

    fn texts(cmds: &[RenderCommand], token: ThemeToken) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, color, .. } if *color == token => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn wraps_surface_in_transform() {
        let t = Transform::new(2.0, 15.0, -5.0);
        let cmds = render_surface(&viewport(), &t, &[]);

        let push = cmds
            .iter()
            .position(|c| matches!(c, RenderCommand::PushTransform { .. }))
            .unwrap();
        let pop = cmds
            .iter()
            .position(|c| matches!(c, RenderCommand::PopTransform))
            .unwrap();
        assert!(push < pop);
        assert_eq!(
            cmds[push],
            RenderCommand::PushTransform {
                translate: Point::new(15.0, -5.0),
                scale: Point::new(2.0, 2.0),
            }
        );

        // 8 x 6 tiles of checkerboard inside the transform.
        let tiles = cmds[push..pop]
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    RenderCommand::DrawRect {
                        border_color: None,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(tiles, 48);
    }

    #[test]
    fn marks_touches_and_pinch_midpoint() {
        let touches = [Point::new(10.0, 10.0), Point::new(110.0, 10.0)];
        let cmds = render_surface(&viewport(), &Transform::identity(), &touches);
        let markers: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { rect, color, .. }
                    if matches!(color, ThemeToken::TouchPoint | ThemeToken::PinchMidpoint) =>
                {
                    Some((*color, rect.x + rect.w / 2.0))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            markers,
            vec![
                (ThemeToken::TouchPoint, 10.0),
                (ThemeToken::TouchPoint, 110.0),
                (ThemeToken::PinchMidpoint, 60.0),
            ]
        );
    }

    #[test]
    fn status_line_reports_transform() {
        let cmds = render_surface(&viewport(), &Transform::new(1.25, 10.0, -4.0), &[]);
        assert_eq!(texts(&cmds, ThemeToken::TextPrimary), vec!["scale 1.25  x 10  y -4"]);
    }

    #[test]
    fn hint_follows_touch_count() {
        let t = Transform::identity();
        let hint = |touches: &[Point]| {
            texts(&render_surface(&viewport(), &t, touches), ThemeToken::TextMuted)
                .join("")
        };
        assert_eq!(hint(&[]), "double tap to zoom");
        assert_eq!(hint(&[Point::new(5.0, 5.0)]), "drag to pan while zoomed");
        assert_eq!(
            hint(&[Point::new(5.0, 5.0), Point::new(50.0, 5.0), Point::new(9.0, 9.0)]),
            "pinch to zoom"
        );
    }

    #[test]
    fn empty_viewport_renders_nothing() {
        let vp = Viewport {
            width: 0.0,
            ..viewport()
        };
        assert!(render_surface(&vp, &Transform::identity(), &[]).is_empty());
    }
}
