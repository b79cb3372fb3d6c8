pub mod finnhub;
pub mod sendgrid;

pub(crate) const USER_AGENT: &str = concat!("ipo-watch/", env!("CARGO_PKG_VERSION"));
