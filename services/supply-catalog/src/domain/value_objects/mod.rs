//! 值对象

mod company_name;
mod embedded_array;

pub use company_name::*;
pub use embedded_array::*;
