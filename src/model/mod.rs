pub mod common;
pub mod dataset;
pub mod house;
pub mod news;

pub use common::*;
pub use dataset::*;
pub use house::*;
pub use news::*;
