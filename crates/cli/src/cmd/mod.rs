mod delete;
mod get;
mod list;
mod put;

pub use delete::cmd_delete;
pub use get::cmd_get;
pub use list::cmd_list;
pub use put::cmd_put;
