pub mod handler;

pub use handler::{InputHandler, TerminalInput};
