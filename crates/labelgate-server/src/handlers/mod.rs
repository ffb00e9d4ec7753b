pub mod filter;

// Re-export handler functions
pub use filter::*;
