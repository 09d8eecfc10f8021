pub mod status;
pub mod request;
pub mod response;
