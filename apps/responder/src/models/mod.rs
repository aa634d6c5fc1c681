pub mod application;
pub mod vacancy;
