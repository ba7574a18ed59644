pub mod account_api;
pub mod account_categories;
pub mod accounts;
pub mod classify;
pub mod errors;
pub mod request;
pub mod settings;
pub mod statistics;
pub mod times;
pub mod trees;
