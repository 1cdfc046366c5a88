// Parser module: HTML listing pages to job records.

pub mod remoteok_parser;

pub use remoteok_parser::{Parser, RemoteOkParser};
