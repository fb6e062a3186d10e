pub mod check;
pub mod create;
pub mod delete;
pub mod edit;
pub mod fill;
pub mod init;
pub mod list;
pub mod show;

pub use check::handle_check;
pub use create::handle_create;
pub use delete::handle_delete;
pub use edit::handle_edit;
pub use fill::handle_fill;
pub use init::handle_init;
pub use list::handle_list;
pub use show::handle_show;
