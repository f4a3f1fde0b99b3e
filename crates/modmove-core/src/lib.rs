pub mod config;
pub mod constraint;
pub mod corner;
pub mod error;
pub mod geometry;
pub mod log;
pub mod mode;
pub mod mover;
pub mod screen;
pub mod speed;
pub mod window;

pub use config::Config;
pub use corner::{Corner, closest_corner};
pub use error::{WindowError, WindowResult};
pub use geometry::{Point, Rect, Size};
pub use mode::{GestureMode, Modifier, Modifiers};
pub use mover::{GestureSnapshot, Mover};
pub use screen::{Display, UsableScreen};
pub use speed::SpeedTracker;
pub use window::{Desktop, Window};
