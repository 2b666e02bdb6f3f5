//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for the exchange and the notification channel
//! - **Services**: Run-scoped helpers (price resolution, message rendering)
//! - **Use Cases**: Report generation, publication, and the full run

pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::*;
pub use services::*;
pub use use_cases::*;
