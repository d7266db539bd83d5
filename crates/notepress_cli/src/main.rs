//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `notepress_core` wiring: config, logging, storage, services.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `notepress_cli [config.json]`

use notepress_core::db::{open_db, open_db_in_memory};
use notepress_core::{
    init_logging, CoreConfig, Identity, NewsService, NoteRepository, SqliteNewsRepository,
    SqliteNoteRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    init_logging(&config.logging)?;

    let conn = match &config.database_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let news = NewsService::new(SqliteNewsRepository::try_new(&conn)?, &config);
    let home = news.home_page(&Identity::Anonymous)?;
    let notes = SqliteNoteRepository::try_new(&conn)?.count_notes()?;

    println!("notepress_core ping={}", notepress_core::ping());
    println!("notepress_core version={}", notepress_core::core_version());
    println!("home_page news={} page_size={}", home.len(), config.news_page_size);
    println!("notes total={notes}");
    Ok(())
}
