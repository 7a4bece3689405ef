use crate::error::{ErrorSeverity, GameError};

/// Reasons a shop purchase is rejected. Nothing is deducted on failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    #[error("insufficient funds: costs {cost}, have {coins}")]
    InsufficientFunds { cost: u32, coins: u32 },
}

impl GameError for ShopError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            ShopError::InsufficientFunds { .. } => "SHOP_INSUFFICIENT_FUNDS",
        }
    }
}
