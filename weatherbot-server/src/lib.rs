//! Library target for the webhook server. Exposes the router so
//! integration tests can drive it without binding a socket.

pub mod routes;
