//! Record schemas for the Stack Overflow for Teams JSON export.
//!
//! Policy shared by every record: unknown fields are ignored, optional fields default to `None`
//! (or zero for counters), and a missing required field fails deserialization of the whole file.

mod account;
mod meta;
mod post;
mod user;

pub use account::Account;
pub use meta::{Badge, Comment, Image, Tag};
pub use post::{Post, PostType};
pub use user::User;
