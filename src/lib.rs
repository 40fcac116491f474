pub mod convert;
pub mod data;
pub mod encoding;
pub mod error;
pub mod projection;
pub mod renderer;

pub use convert::{convert, ConvertSummary};
pub use error::ConvertError;
