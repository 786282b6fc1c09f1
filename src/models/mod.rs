pub mod analysis;
pub mod annotation;
pub mod settings;
