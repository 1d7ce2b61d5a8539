//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured catalog store and print what it holds.
//! - Verify `gamecatalog_core` wiring without the interactive menu layer.

use gamecatalog_core::{
    init_from_config, CatalogConfig, CatalogService, ConnectionManager, SqliteCatalogRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CatalogConfig::from_env();
    if let Err(err) = init_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let connections = match ConnectionManager::from_config(&config) {
        Ok(connections) => connections,
        Err(err) => {
            eprintln!("invalid database location: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = connections.bootstrap_schema() {
        eprintln!("could not prepare {}: {err}", connections.path().display());
        return ExitCode::FAILURE;
    }

    let repo = SqliteCatalogRepository::new(connections);
    let service = CatalogService::new(&repo);
    let games = service.catalog();

    println!(
        "gamecatalog_core version={} games={}",
        gamecatalog_core::core_version(),
        games.len()
    );
    for game in &games {
        println!(
            "{} | {} | {} | average={:.1} ratings={}",
            game.title,
            game.studio,
            game.edition,
            game.average_rating(),
            game.ratings().len()
        );
    }
    log::info!("event=cli_list module=cli status=ok count={}", games.len());

    ExitCode::SUCCESS
}
