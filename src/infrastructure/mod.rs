// Infrastructure module: puzzle files and terminal output

pub mod console;
pub mod loader;

pub use console::{AcceptAll, BoardPresenter, StdinControl, TextPresenter};
pub use loader::read_puzzle;
