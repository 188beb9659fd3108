pub mod http;

// Re-export comodi
pub use http::{ListUsersResponse, RegisterRequest, ValidationDetails};
