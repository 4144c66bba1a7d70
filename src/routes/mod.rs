pub mod export;
pub mod query;
pub mod signup;
pub mod stats;

pub use query::waitlist_query;
pub use signup::submit_signup;
