pub mod state;

pub use state::{PortfolioState, Position};
