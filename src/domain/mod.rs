pub mod series;
pub mod stat;

pub use series::*;
pub use stat::*;
