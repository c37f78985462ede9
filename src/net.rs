//! Request/response collaborators and response header helpers.
//!
//! The helpers in this crate never talk to a server directly. They work
//! against two small traits:
//!
//! - [`Request`]: inbound cookies plus query-string access.
//! - [`Response`]: outbound cookies, headers, redirects and a text writer.
//!
//! [`HttpRequest`] and [`BufferedResponse`] implement them on top of the
//! `http` crate types, so any framework that exposes `http::Request` /
//! `http::HeaderMap` can be adapted with little glue.

mod request;
mod response;
pub mod headers;

pub use request::{HttpRequest, Request};
pub use response::{BufferedResponse, Response};

pub use headers::{redirect, set_cache_header, set_no_cache_headers, write, write_json};
