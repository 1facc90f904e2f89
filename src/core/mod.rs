//! Core modules: API client, controller, pagination, sorting, session runtime

pub mod api;
pub mod controller;
pub mod pagination;
pub mod session;
pub mod sort;

#[cfg(test)]
pub(crate) mod fake;
