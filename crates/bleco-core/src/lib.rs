pub mod display;
pub mod error;
pub mod preprocess;
pub mod types;

pub use display::{DisplayMode, DisplayModeCell};
pub use error::{LoadError, SearchError};
pub use types::SearchKind;
