//! Application layer - Use cases over the domain, wired to the host through ports

pub mod ports;
pub mod services;
