pub mod client;
pub mod method;
pub mod request;
pub mod response;

#[cfg(test)]
pub mod test_server;
