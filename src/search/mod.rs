mod composer;
mod coordinator;
mod fetcher;
pub mod prompt;

pub use composer::*;
pub use coordinator::*;
pub use fetcher::*;
