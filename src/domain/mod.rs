pub mod market;
pub mod prediction;
pub mod state;

pub use market::*;
pub use prediction::*;
pub use state::*;
