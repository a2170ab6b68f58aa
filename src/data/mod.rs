//! Data module - CSV loading, filtering and delivery-time derivation

mod loader;
mod processor;
mod table;

pub use loader::DataLoader;
pub use processor::{DataProcessor, DeliveredOrder, ProcessorError};
pub use table::{DateRange, OrderTable};

#[cfg(test)]
pub(crate) use table::fixtures;
