use gamecatalog_core::{
    CatalogService, CatalogServiceError, ConnectionManager, Game, Rating,
    SqliteCatalogRepository,
};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn sqlite_repo() -> (TempDir, SqliteCatalogRepository) {
    let dir = tempfile::tempdir().unwrap();
    let connections = ConnectionManager::new(dir.path().join("catalog.db")).unwrap();
    connections.bootstrap_schema().unwrap();
    (dir, SqliteCatalogRepository::new(connections))
}

#[test]
fn register_then_show_orbit_scenario() {
    let (_dir, repo) = sqlite_repo();
    let service = CatalogService::new(&repo);

    let mut orbit = Game::new("Orbit", "NovaWorks", "GOTY");
    orbit.add_genre("Action");
    orbit.add_genre("Indie");
    orbit.add_platform("PC");
    service.register_game(&orbit).unwrap();

    let shown = service.game_details("Orbit").unwrap();
    let genres: BTreeSet<&str> = shown.genres().iter().map(String::as_str).collect();
    assert_eq!(genres, BTreeSet::from(["Action", "Indie"]));
    assert_eq!(shown.platforms(), ["PC"]);
    assert!(shown.ratings().is_empty());
    assert_eq!(shown.average_rating(), 0.0);
}

#[test]
fn register_duplicate_title_surfaces_repo_error() {
    let (_dir, repo) = sqlite_repo();
    let service = CatalogService::new(&repo);
    service
        .register_game(&Game::new("Orbit", "NovaWorks", "GOTY"))
        .unwrap();

    let err = service
        .register_game(&Game::new("Orbit", "Other", "Standard"))
        .unwrap_err();
    assert!(matches!(err, CatalogServiceError::Repo(_)));
    assert_eq!(service.catalog().len(), 1);
}

#[test]
fn rate_game_by_title_updates_average() {
    let (_dir, repo) = sqlite_repo();
    let service = CatalogService::new(&repo);
    service
        .register_game(&Game::new("Orbit", "NovaWorks", "GOTY"))
        .unwrap();

    service.rate_game("Orbit", 7).unwrap();
    let rated = service.rate_game("Orbit", 9).unwrap();
    assert_eq!(rated.ratings(), [Rating::new(7), Rating::new(9)]);
    assert_eq!(rated.average_rating(), 8.0);
}

#[test]
fn rate_game_unknown_title_is_not_found() {
    let (_dir, repo) = sqlite_repo();
    let service = CatalogService::new(repo);
    let err = service.rate_game("Missing", 5).unwrap_err();
    assert!(matches!(err, CatalogServiceError::GameNotFound(_)));
}
