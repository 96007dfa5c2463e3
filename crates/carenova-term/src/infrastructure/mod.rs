//! Infrastructure layer binding the domain to the network client.

mod chat_socket;
