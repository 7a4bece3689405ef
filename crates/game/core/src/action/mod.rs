//! Player intents and the errors that reject them.
mod direction;
mod movement;
mod shop;

pub use direction::Direction;
pub use movement::MoveError;
pub use shop::ShopError;
