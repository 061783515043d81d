//! Export-to-discussions migration: loading, body rewriting, journaling and the driver.

mod driver;
mod journal;
mod loader;
mod markdown;

pub use driver::{MigratedQuestion, MigrationReport, MigrationTarget, Migrator};
pub use journal::{EntryKind, Journal, JournalEntry};
pub use loader::{ExportData, load_json};
pub use markdown::ImageLinkRewriter;
