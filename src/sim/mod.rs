mod components;
mod systems;
mod tic;

pub use components::{Billboard, FrameCycle, InputCmd};
pub use systems::{animation, apply_input};
pub use tic::TicRunner;
