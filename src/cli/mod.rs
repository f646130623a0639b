pub mod configure;
pub mod export;
pub mod show;
