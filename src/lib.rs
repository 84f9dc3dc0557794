pub mod model;
pub mod catalog;
pub mod prune;
pub mod combination;
pub mod filter;
pub mod evaluate;
pub mod search;
pub mod config;
pub mod pipeline;
