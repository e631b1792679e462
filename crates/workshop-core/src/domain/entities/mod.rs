// Domain entities

pub mod gift_request;
pub mod line_item;
pub mod processing_result;

pub use gift_request::*;
pub use line_item::*;
pub use processing_result::*;
