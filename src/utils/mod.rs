pub mod constants;
pub mod coords;
