pub mod export;
pub mod submit;
pub mod view;
