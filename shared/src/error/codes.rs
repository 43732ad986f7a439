//! Unified error codes for the Récif storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Cart errors
//! - 2xxx: Promotion errors
//! - 3xxx: Gift errors
//! - 4xxx: Checkout errors
//! - 5xxx: Payment errors
//! - 6xxx: Product / pricing errors
//! - 7xxx: Order / dispute errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Cart ====================
    /// Cart not found
    CartNotFound = 1001,
    /// Cart line item not found
    ItemNotFound = 1002,
    /// Quantity increment exceeds the item's stock limit
    StockExceeded = 1003,
    /// Gift line items cannot be modified
    NotModifiable = 1004,

    // ==================== 2xxx: Promotion ====================
    /// Promotion code unknown or inactive
    PromoUnknown = 2001,
    /// Promotion code expired
    PromoExpired = 2002,
    /// Promotion usage limit reached
    PromoExhausted = 2003,
    /// Order subtotal below the promotion minimum
    PromoMinimumNotMet = 2004,

    // ==================== 3xxx: Gift ====================
    /// An expired wheel gift is still in the cart
    ExpiredGiftInCart = 3001,

    // ==================== 4xxx: Checkout ====================
    /// Cart contains no payable items
    NoPayableItems = 4001,
    /// A required customer field is missing
    MissingCustomerField = 4002,
    /// No pickup point selected for relay delivery
    MissingPickupPoint = 4003,
    /// Order total below the provider minimum chargeable amount
    BelowMinimumCharge = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment provider rejected the session
    PaymentProviderError = 5001,

    // ==================== 6xxx: Product / pricing ====================
    /// Product not found
    ProductNotFound = 6001,
    /// No price configuration for a product/variant
    PriceResolutionFailed = 6002,

    // ==================== 7xxx: Order / dispute ====================
    /// Order not found
    OrderNotFound = 7001,
    /// Illegal order status transition
    InvalidStatusTransition = 7002,
    /// Dispute thread is closed to client messages
    DisputeClosed = 7003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Upstream service unreachable
    UpstreamUnavailable = 9003,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::CartNotFound => "Cart not found",
            Self::ItemNotFound => "Cart item not found",
            Self::StockExceeded => "Requested quantity exceeds available stock",
            Self::NotModifiable => "Gift items cannot be modified",

            Self::PromoUnknown => "This promotion code is not valid",
            Self::PromoExpired => "This promotion code has expired",
            Self::PromoExhausted => "This promotion code has reached its usage limit",
            Self::PromoMinimumNotMet => "Order subtotal is below the promotion minimum",

            Self::ExpiredGiftInCart => "An expired gift is still in the cart",

            Self::NoPayableItems => "The cart contains no payable items",
            Self::MissingCustomerField => "A required customer field is missing",
            Self::MissingPickupPoint => "No pickup point selected",
            Self::BelowMinimumCharge => "Order total is below the minimum chargeable amount",

            Self::PaymentProviderError => "Payment provider error",

            Self::ProductNotFound => "Product not found",
            Self::PriceResolutionFailed => "No price configuration for this item",

            Self::OrderNotFound => "Order not found",
            Self::InvalidStatusTransition => "Illegal order status transition",
            Self::DisputeClosed => "This dispute is closed",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::UpstreamUnavailable => "Upstream service unreachable",
        }
    }

    /// HTTP status code mapped to this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ValidationFailed | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound
            | Self::CartNotFound
            | Self::ItemNotFound
            | Self::ProductNotFound
            | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,

            Self::StockExceeded
            | Self::NotModifiable
            | Self::PromoUnknown
            | Self::PromoExpired
            | Self::PromoExhausted
            | Self::PromoMinimumNotMet
            | Self::ExpiredGiftInCart
            | Self::NoPayableItems
            | Self::MissingCustomerField
            | Self::MissingPickupPoint
            | Self::BelowMinimumCharge
            | Self::PriceResolutionFailed
            | Self::InvalidStatusTransition
            | Self::DisputeClosed => StatusCode::UNPROCESSABLE_ENTITY,

            Self::PaymentProviderError | Self::UpstreamUnavailable => StatusCode::BAD_GATEWAY,

            Self::InternalError | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// String form used in the API envelope ("E2001" style)
    pub fn as_code_string(&self) -> String {
        format!("E{:04}", *self as u16)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error raised when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            1001 => Self::CartNotFound,
            1002 => Self::ItemNotFound,
            1003 => Self::StockExceeded,
            1004 => Self::NotModifiable,
            2001 => Self::PromoUnknown,
            2002 => Self::PromoExpired,
            2003 => Self::PromoExhausted,
            2004 => Self::PromoMinimumNotMet,
            3001 => Self::ExpiredGiftInCart,
            4001 => Self::NoPayableItems,
            4002 => Self::MissingCustomerField,
            4003 => Self::MissingPickupPoint,
            4004 => Self::BelowMinimumCharge,
            5001 => Self::PaymentProviderError,
            6001 => Self::ProductNotFound,
            6002 => Self::PriceResolutionFailed,
            7001 => Self::OrderNotFound,
            7002 => Self::InvalidStatusTransition,
            7003 => Self::DisputeClosed,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::UpstreamUnavailable,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::StockExceeded,
            ErrorCode::PromoMinimumNotMet,
            ErrorCode::ExpiredGiftInCart,
            ErrorCode::BelowMinimumCharge,
            ErrorCode::DisputeClosed,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(8888), Err(InvalidErrorCode(8888)));
    }

    #[test]
    fn test_code_string_format() {
        assert_eq!(ErrorCode::StockExceeded.as_code_string(), "E1003");
        assert_eq!(ErrorCode::Success.as_code_string(), "E0000");
    }
}
