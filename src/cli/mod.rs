pub mod analyze;
pub mod encode;
pub mod mask;

pub use analyze::*;
pub use encode::*;
pub use mask::*;
