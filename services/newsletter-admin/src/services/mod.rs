pub mod backend;
pub mod confirm;
pub mod credential;
