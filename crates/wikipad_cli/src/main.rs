//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `wikipad_core` linkage.
//! - Print the outline of a seeded wiki, optionally configured from a JSON
//!   file given as the first argument.

use log::warn;
use wikipad_core::{
    derive_content_preview, init_logging_from_config, HtmlSurface, PageId, WikiConfig,
    WikiSession,
};

fn main() {
    println!("wikipad_core ping={}", wikipad_core::ping());
    println!("wikipad_core version={}", wikipad_core::core_version());

    let config = match std::env::args().nth(1) {
        Some(path) => match WikiConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("wikipad: {err}; using defaults");
                WikiConfig::default()
            }
        },
        None => WikiConfig::default(),
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("wikipad: logging disabled: {err}");
    }

    let mut session = WikiSession::from_config(&config, HtmlSurface::new());
    let guide = session.create_page("Getting started", Some(PageId::root()));
    session.select_page(&guide);
    if !session.insert_table(2, 2) {
        warn!("event=cli_demo module=cli status=skipped reason=table_not_stored");
    }

    for row in session.outline() {
        let preview = derive_content_preview(&row.page.content).unwrap_or_default();
        println!(
            "{}- {} [{}] {}",
            "  ".repeat(row.depth),
            row.page.title,
            row.page.id,
            preview
        );
    }
}
