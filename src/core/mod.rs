pub mod collector;
pub mod config;
pub mod deal;
pub mod extract;
pub mod feed;
pub mod log;

#[cfg(test)]
pub(crate) mod test_support;
