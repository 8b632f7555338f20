//! Session collaborators consumed by the HTTP client.
//!
//! The data layer owns none of the session state itself: tokens come from
//! a [`TokenProvider`], persisted client state lives in a
//! [`SessionStorage`], and redirects go through a [`Navigator`]. The only
//! state the layer keeps is the [`ReauthGuard`] flag.

mod guard;
mod navigator;
mod storage;
mod tokens;

pub use guard::{ReauthGuard, SessionGuard};
pub use navigator::{LogNavigator, Navigator};
pub use storage::{
    FileStorage, MemoryStorage, SessionStorage, StorageError, LAST_SEEN_ACK_DATE_KEY,
    LAST_SEEN_ACK_ID_KEY, THEME_KEY,
};
pub use tokens::{EnvTokenProvider, StaticTokenProvider, TokenProvider};
