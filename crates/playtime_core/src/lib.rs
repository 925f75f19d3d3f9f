pub mod core_api;
pub mod player_file;
pub mod usercache;
pub mod validation;
