//! # Application Module
//!
//! Application services orchestrating the algorithms and outbound ports.

pub mod service;

pub use service::PermissionService;
