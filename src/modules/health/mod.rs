pub mod controllers;

pub use controllers::InstanceInfo;
