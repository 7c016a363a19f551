pub mod er_api;
pub mod goldapi;
pub mod telegram;

pub(crate) const USER_AGENT: &str = concat!("goldbrief/", env!("CARGO_PKG_VERSION"));
