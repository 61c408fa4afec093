mod property_capacity;
mod property_roundtrip;
pub mod utils;
