//! Parsers for chanboard input files

pub mod channel_csv;

pub use channel_csv::{ChannelCsvParser, REQUIRED_COLUMNS};
