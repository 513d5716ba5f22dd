mod menu;

pub use menu::{
    validate_name, Category, CategoryRequest, CreateMenuItemRequest, MenuItem,
    UpdateMenuItemRequest, MAX_NAME_LEN,
};
