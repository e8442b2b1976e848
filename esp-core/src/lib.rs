//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert nur Traits und Pure Functions für die Relais-Steuerung.

#![no_std]

pub mod button;
pub mod command;
pub mod credentials;
pub mod logic;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use button::{BUTTON_PRESSED_LEVEL, ButtonDebouncer};
pub use command::{COMMAND_RULES, CommandRouter, parse_command};
pub use credentials::BrokerCredentials;
pub use logic::RelayArbiter;
pub use traits::{RelayDriver, StatusNotifier};
pub use types::{PinLevel, RelayCommand, RelayStatus};
