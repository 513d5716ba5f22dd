// Menu module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Category, MenuItem};
pub use repositories::MenuRepository;
pub use services::MenuService;
