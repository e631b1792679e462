//! Infrastructure adapters for the workshop pipeline.
//!
//! This crate implements the ports defined in `workshop-core::application::ports`.
//! It contains the built-in strategies, the atomic capacity ledger and the
//! request file loader.

pub mod builtin;
pub mod delivery;
pub mod discount;
pub mod notification;
pub mod production;
pub mod request_loader;
pub mod wrapping;

// Re-export commonly used adapters
pub use builtin::{BuiltinOptions, builtin_registries, builtin_registries_with};
pub use delivery::{ElfCourier, ReindeerExpress, SleighDelivery};
pub use discount::{BulkDiscount, NiceListDiscount, NoDiscount};
pub use notification::{LetterNotifier, LogNotifier, MemoryNotifier, SilentNotifier};
pub use production::{AtomicCapacity, SimulatedFloor, WorkshopFloor};
pub use request_loader::{RequestFile, RequestFormat, load_requests, parse_requests};
pub use wrapping::{EcoWrap, FestiveWrap, PlainWrap};
