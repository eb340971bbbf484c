//! Terminal front end: draws the shared viewport on a fixed tick and turns
//! key and mouse input into scroll and quit actions.

mod app;
mod input;

pub use app::BoardUi;
pub use input::Action;
