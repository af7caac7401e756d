pub mod auth;
pub mod contact;
pub mod content;
pub mod project;
pub mod service;
pub mod settings;
pub mod team;
pub mod upload;
