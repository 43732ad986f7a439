//! Unified error system for the Récif storefront
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`AppError`]: rich error type with codes, messages, and details
//! - [`crate::response::ApiResponse`]: unified API response format
//!
//! # Error code ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Cart errors
//! - 2xxx: Promotion errors
//! - 3xxx: Gift errors
//! - 4xxx: Checkout errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / pricing errors
//! - 7xxx: Order / dispute errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::NotFound);
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
//! let err = AppError::validation("Missing required field").with_detail("field", "email");
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult};
