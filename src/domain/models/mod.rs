mod author;
mod backend;
mod credentials;
mod message;
mod session;
mod slash_commands;
mod storage;
pub mod token;

pub use author::*;
pub use backend::*;
pub use credentials::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use storage::*;
pub use token::OneOrMany;
pub use token::TokenClaims;
pub use token::TokenInfo;
