pub mod downloads;
pub mod error;
pub mod links;
pub mod listing;
pub mod sites;
