pub mod raw_socket;
pub mod test_client;
pub mod test_server;
