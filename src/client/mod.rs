//! Client side of the compose flow: HTTP access to the server and the
//! interaction state a front end renders.

pub mod api;
pub mod composer;

pub use api::{ClientError, EmailApi, HttpEmailApi, DEFAULT_API_URL};
pub use composer::{Composer, Status};
