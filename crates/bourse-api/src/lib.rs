#![allow(non_snake_case)]

pub mod middleware;

pub use middleware::session::{route_guard, GuardState};
