pub mod check_installed;
pub mod deactivate;
pub mod grant_permissions;
pub mod install;
pub mod keys;
pub mod save;
pub mod show;
