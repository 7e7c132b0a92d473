pub mod outreach_handlers;
pub mod portfolio_handlers;
pub mod system_handlers;

pub use outreach_handlers::*;
pub use portfolio_handlers::*;
pub use system_handlers::*;
