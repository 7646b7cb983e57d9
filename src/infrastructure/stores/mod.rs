pub mod disk;
pub mod memory;

pub use disk::*;
pub use memory::*;
