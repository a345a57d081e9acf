//! 实体

mod cert;
mod company;
mod embedded;
mod material;
mod product;
mod supplier;

pub use cert::*;
pub use company::*;
pub use embedded::*;
pub use material::*;
pub use product::*;
pub use supplier::*;
