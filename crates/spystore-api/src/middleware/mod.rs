pub mod exception_filter;
pub mod request_id;

pub use exception_filter::{exception_filter_middleware, with_exception_filter};
pub use request_id::{request_id_middleware, RequestId};
