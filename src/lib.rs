pub mod command;
pub mod deck;
pub mod highlight;
pub mod lesson;
pub mod media;
pub mod render;
pub mod session;
pub mod timer;
pub mod widget;

pub use command::Command;
pub use deck::{DeckCursor, Key};
pub use lesson::{LessonError, SlideRecord, SlideStore};
pub use session::Session;
