pub mod directory;
pub mod selection;
pub mod send;
