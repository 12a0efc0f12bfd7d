pub mod mount;

pub use mount::handle_mount_command;
