pub mod account;
pub mod order;
pub mod product;

pub use account::*;
pub use order::*;
pub use product::*;
