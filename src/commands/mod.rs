pub mod bin;
pub mod settings;
