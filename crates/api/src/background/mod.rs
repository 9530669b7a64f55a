//! Background maintenance tasks spawned by the server entrypoint.

pub mod session_cleanup;
