pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, PreferenceError, WebtermError};
pub use id::{new_id, SessionId};
pub use types::{Dimensions, PixelSize};

pub type Result<T> = std::result::Result<T, WebtermError>;
