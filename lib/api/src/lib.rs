pub mod rest;

pub use rest::{configure, PredictResponse, RestApi, COMMON_SYMPTOMS};
