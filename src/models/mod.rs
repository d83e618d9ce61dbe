pub mod page;
pub mod keyword;
pub mod report;

pub use page::*;
pub use keyword::*;
pub use report::*;
