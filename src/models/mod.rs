pub mod money;
pub mod product;
pub mod report;
pub mod sale;

pub use product::*;
pub use report::*;
pub use sale::*;
