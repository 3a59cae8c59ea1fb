#![allow(non_snake_case)]

pub mod auth;
pub mod client;
pub mod error;
pub mod exchanges;
pub mod stocks;

pub use client::{cookie_header, BackendClient, LoginRedirect, RequestContext, LOGIN_PATH};
pub use error::ClientError;
