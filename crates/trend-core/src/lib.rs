pub mod error;
pub mod source;
pub mod themes;
pub mod traits;
pub mod types;

pub use error::*;
pub use source::*;
pub use themes::*;
pub use traits::*;
pub use types::*;
