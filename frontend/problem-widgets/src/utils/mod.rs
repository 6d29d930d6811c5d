pub mod escape;
pub mod page;
