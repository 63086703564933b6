pub mod config;
pub mod datum;
pub mod node;

pub use config::*;
pub use datum::*;
pub use node::*;
