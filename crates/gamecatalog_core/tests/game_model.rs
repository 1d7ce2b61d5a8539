use gamecatalog_core::{Game, Rating};
use serde_json::json;

#[test]
fn game_serializes_with_flat_fields() {
    let mut game = Game::with_availability("Orbit", "NovaWorks", "GOTY", false)
        .described("Gravity puzzler");
    game.add_genre("Indie");
    game.add_platform("PC");
    game.add_rating(Rating::new(9));

    let value = serde_json::to_value(&game).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Orbit",
            "studio": "NovaWorks",
            "edition": "GOTY",
            "description": "Gravity puzzler",
            "available": false,
            "genres": ["Indie"],
            "platforms": ["PC"],
            "ratings": [{ "score": 9 }]
        })
    );
}

#[test]
fn deserialized_game_keeps_availability_and_lists() {
    let game: Game = serde_json::from_value(json!({
        "title": "Relic",
        "studio": "Oldsoft",
        "edition": "Standard",
        "description": "",
        "available": true,
        "genres": ["RPG", "RPG"],
        "platforms": [],
        "ratings": [{ "score": 4 }, { "score": 5 }]
    }))
    .unwrap();

    assert!(game.is_available());
    assert_eq!(game.genres(), ["RPG", "RPG"]);
    assert_eq!(game.average_rating(), 4.5);
}
