pub mod assembler;

pub use assembler::{assemble, CategoryGroup};
