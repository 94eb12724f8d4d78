//! Service layer modules for external integrations.
//!
//! Contains the image object store and the Telegram lead-notification client.

pub mod storage;
pub mod telegram;

pub use storage::ImageStore;
pub use telegram::TelegramClient;
