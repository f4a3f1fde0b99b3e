pub mod displays;
pub mod window;
