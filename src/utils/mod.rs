pub mod error;
pub mod logging;
pub mod response;

pub use error::AppError;
pub use response::{BaseResponse, ErrorResponse};
