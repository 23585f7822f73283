//! Ports - Interfaces between the application and the host

pub mod inbound;
pub mod outbound;
