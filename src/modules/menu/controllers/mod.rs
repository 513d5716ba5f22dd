pub mod menu_controller;

pub use menu_controller::configure;
