pub mod admin_ops;
pub mod cache_ops;
pub mod health;
pub mod status_checks;

pub use admin_ops::clear_cache;
pub use cache_ops::{
    cache_status, get_drive_folder, get_entry, get_sheet, put_drive_folder, put_entry, put_sheet,
};
pub use health::{health_check, root};
pub use status_checks::{create_status_check, list_status_checks};
