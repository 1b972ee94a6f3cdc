pub mod controllers;
pub mod domain;
pub mod error;
pub mod infrastructure;
