//! Synchronous API client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `Board` keeps the frontend's view of the data in sync with results.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod board;
pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use board::Board;
pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    Category, CreateCategory, CreateTodo, Health, ListTodosParams, SortKey, StatusFilter, Todo,
    UpdateCategory, UpdateTodo,
};
