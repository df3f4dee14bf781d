pub mod file;
pub mod store;
pub mod types;

pub use file::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore};
pub use types::{AccountFields, ProfileUpdate, Session, UserProfile};
