//! Humidity domain: band classification and the reading record.

pub mod classifier;
pub mod reading;

pub use classifier::{classify, Band, HumidityStatus, HUMIDITY_BANDS};
pub use reading::{HumidityResponse, Reading, TIMESTAMP_FORMAT};
