pub mod geometry;
pub mod scroll;
pub mod view;

pub use geometry::*;
pub use scroll::*;
pub use view::*;
