pub mod email;

pub use email::{
    Draft,
    ErrorResponse,
    GenerateRequest,
    HealthResponse,
    SendRequest,
    SendResponse,
};
