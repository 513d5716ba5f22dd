pub mod health_controller;

pub use health_controller::{configure, InstanceInfo};
