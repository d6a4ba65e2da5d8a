//! Wordle Server library - session-scoped word-guessing game over HTTP
//!
//! A client submits a guess, the server scores it against the secret word
//! held in the client's session and reports per-letter feedback plus whether
//! the game is over.
//!
//! # Architecture
//!
//! - **Game**: [`GameService`] runs `check` and `restart` against injected capabilities
//! - **Session**: [`SessionStore`] capability with an in-memory implementation
//! - **Identity**: [`ClientSession`] resolves or issues the session cookie
//! - **Server**: axum [`router`] exposing `POST /check` and `POST /restart`
//! - **Config**: [`ServerConfig`] from TOML, overridden by the [`Cli`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wordle_server::{GameService, MemorySessionStore, ServerConfig, SessionId};
//! use wordle_core::ThreadRandom;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let game = GameService::new(
//!     config.rules(),
//!     config.word_list()?,
//!     Arc::new(MemorySessionStore::new()),
//!     Arc::new(ThreadRandom),
//! );
//!
//! let outcome = game.check(&SessionId::generate(), "react")?;
//! assert_eq!(outcome.feedback().len(), 5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod error;
mod game;
mod identity;
mod server;
mod session;

pub use cli::{Cli, Command, score_json};
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorResponse};
pub use game::{CheckOutcome, GameService};
pub use identity::ClientSession;
pub use server::{AppState, CheckRequest, CheckResponse, RestartResponse, router};
pub use session::{
    ATTEMPTS_KEY, DEFAULT_MAX_SESSIONS, GameSession, MemorySessionStore, SECRET_WORD_KEY,
    SessionError, SessionId, SessionStore,
};
