mod user;

pub use user::{LoginRequest, LoginResponse, Session, User, UserResponse, UserRole};
