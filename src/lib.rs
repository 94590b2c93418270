pub mod catalog;
pub mod census;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod flood;
pub mod geoid;
pub mod lidar;
pub mod output;
pub mod pipeline;
pub mod query;
pub mod store;
pub mod transform;
pub mod wget;
