pub mod contrast;
pub mod render;
