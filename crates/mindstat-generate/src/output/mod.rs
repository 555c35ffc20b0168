pub mod atomic;
pub mod csv;
