pub mod compose;
pub mod descriptor;
pub mod remap;
pub mod reverse;
pub mod shift;
pub mod stage;
pub mod xor;

pub use compose::*;
pub use descriptor::*;
pub use remap::*;
pub use reverse::*;
pub use shift::*;
pub use stage::*;
pub use xor::*;
