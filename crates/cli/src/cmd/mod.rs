pub mod annotate;
pub mod list_models;
