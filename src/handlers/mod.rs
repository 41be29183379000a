pub mod health;
pub mod mcp_info;
pub mod recommendations;

pub use health::health_check;
pub use self::mcp_info::mcp_info as mcp_info_handler;
pub use recommendations::recommendations_config;
