pub mod commands;
pub mod events;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use events::{TouchEvent, TouchPhase};
pub use theme::ThemeToken;
pub use types::{Point, Rect, Transform, Viewport};
