pub mod constants;
pub mod orchestration;
pub mod panel;
pub mod preset;
pub mod visual;

pub use constants::*;
pub use orchestration::*;
pub use panel::*;
pub use preset::*;
pub use visual::*;
