pub mod atomic;
pub mod path;
