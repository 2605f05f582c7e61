pub mod host;
pub mod installation_location;
pub mod invocation;
pub mod launch_config;
pub mod launcher;
pub mod logging;
