pub mod response;
pub mod signup;

pub use response::ApiResponse;
pub use signup::{date_string, iso_timestamp, normalize_email, SignupRecord, SignupRequest};
