mod request;

pub use request::{Method, Request, RequestConfig};
