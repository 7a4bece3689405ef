pub mod footer;
pub mod menu;
pub mod messages;
pub mod mine;
pub mod stats;
