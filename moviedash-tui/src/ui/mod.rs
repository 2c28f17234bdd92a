pub mod dashboard;
pub mod help;
pub mod log_view;
pub mod login;
pub mod theme;
pub mod util;
