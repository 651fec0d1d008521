pub mod enums;
pub mod filter;
pub mod stats;
pub mod tender;

pub use enums::*;
pub use filter::*;
pub use tender::*;
