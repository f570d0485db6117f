mod extractor;
mod file_info;
mod front_matter;
mod page;
mod scanner;
mod unit;

pub use extractor::*;
pub use file_info::*;
pub use front_matter::*;
pub use page::*;
pub use scanner::*;
pub use unit::*;
