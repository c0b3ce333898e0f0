#![allow(non_snake_case)]

mod colstarts;
mod compare;
mod core;
mod matrix_math;
mod rowblock;

pub use self::core::*;
pub use colstarts::*;
pub use compare::*;
pub use rowblock::*;
