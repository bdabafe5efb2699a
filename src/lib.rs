pub mod config;
pub mod i18n;
pub mod seo;
pub mod theme;
pub mod web;
