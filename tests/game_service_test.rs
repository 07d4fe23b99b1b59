//! Tests for the game service over a real SQLite file.

use tempfile::NamedTempFile;

use mastermind::{
    Code, EngineError, GameRepository, GameService, GameStatus, Rules, ServiceError,
};

fn setup_service() -> (NamedTempFile, GameService) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.run_migrations().expect("Migrations failed");
    (db_file, GameService::new(repo))
}

/// Reads the stored secret straight from the repository.
fn secret_of(service: &GameService, game_id: i32) -> Code {
    service
        .repository()
        .find_game(game_id)
        .unwrap()
        .unwrap()
        .parse_secret()
        .unwrap()
}

/// A guess sharing no color with the secret.
fn miss_for(secret: &Code) -> Vec<String> {
    let unused: Vec<String> = mastermind::Color::all()
        .into_iter()
        .filter(|c| secret.position_of(*c).is_none())
        .map(|c| c.name().to_string())
        .collect();
    (0..secret.len()).map(|i| unused[i % unused.len()].clone()).collect()
}

#[test]
fn test_create_game_starts_in_progress() {
    let (_db, service) = setup_service();
    let game = service.create_game(None).expect("Create failed");

    assert_eq!(*game.status(), GameStatus::InProgress);
    assert_eq!(*game.attempts(), 0);
    assert!(game.secret().is_none());

    let secret = secret_of(&service, *game.game_id());
    assert_eq!(secret.len(), 6);
    assert!(secret.is_distinct());
}

#[test]
fn test_seeded_games_share_secret() {
    let (_db, service) = setup_service();
    let a = service.create_game(Some(7)).unwrap();
    let b = service.create_game(Some(7)).unwrap();
    assert_ne!(a.game_id(), b.game_id());
    assert_eq!(
        secret_of(&service, *a.game_id()),
        secret_of(&service, *b.game_id())
    );
}

#[test]
fn test_winning_guess_reveals_secret() {
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(1)).unwrap().game_id();
    let secret = secret_of(&service, id);

    let outcome = service.submit_guess(id, &secret.names()).expect("Guess failed");
    assert_eq!(*outcome.status(), GameStatus::Won);
    assert_eq!(outcome.attempt().tally().exact(), 6);
    assert_eq!(outcome.attempt().number(), 1);
    assert_eq!(outcome.secret().as_ref(), Some(&secret));
    assert!(outcome.is_game_over());

    let err = service.submit_guess(id, &secret.names()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::GameAlreadyFinished(GameStatus::Won))
    ));
}

#[test]
fn test_color_names_are_case_insensitive() {
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(3)).unwrap().game_id();
    let secret = secret_of(&service, id);

    let shouted: Vec<String> = secret.names().iter().map(|n| n.to_uppercase()).collect();
    let outcome = service.submit_guess(id, &shouted).unwrap();
    assert_eq!(*outcome.status(), GameStatus::Won);
}

#[test]
fn test_rejected_guesses_record_nothing() {
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(5)).unwrap().game_id();

    let err = service
        .submit_guess(id, &["Red", "Blue", "Teal", "Green", "Pink", "Black"])
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::UnknownColor(ref name)) if name == "Teal"
    ));

    let err = service.submit_guess(id, &["Red", "Blue"]).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::InvalidGuess(_))
    ));

    let snapshot = service.get_game(id).unwrap();
    assert_eq!(snapshot.game().attempts(), 0);
    assert!(snapshot.game().history().is_empty());
}

#[test]
fn test_unknown_game() {
    let (_db, service) = setup_service();
    let colors = ["Red", "Blue", "Green", "Yellow", "Purple", "Orange"];

    assert!(matches!(
        service.get_game(404),
        Err(ServiceError::GameNotFound(404))
    ));
    assert!(matches!(
        service.submit_guess(404, &colors),
        Err(ServiceError::GameNotFound(404))
    ));
    assert!(matches!(
        service.delete_game(404),
        Err(ServiceError::GameNotFound(404))
    ));
}

#[test]
fn test_game_lost_after_max_attempts() {
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(11)).unwrap().game_id();
    let miss = miss_for(&secret_of(&service, id));

    for attempt in 1..20 {
        let outcome = service.submit_guess(id, &miss).unwrap();
        assert_eq!(*outcome.status(), GameStatus::InProgress, "attempt {attempt}");
        assert!(outcome.secret().is_none());
    }

    let last = service.submit_guess(id, &miss).unwrap();
    assert_eq!(*last.status(), GameStatus::Lost);
    assert_eq!(last.attempt().number(), 20);
    assert!(last.secret().is_some());

    assert!(matches!(
        service.submit_guess(id, &miss),
        Err(ServiceError::Engine(EngineError::GameAlreadyFinished(
            GameStatus::Lost
        )))
    ));

    let snapshot = service.get_game(id).unwrap();
    assert_eq!(snapshot.game().attempts(), 20);
    assert_eq!(snapshot.game().history().len(), 20);
}

#[test]
fn test_history_in_attempt_order() {
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(2)).unwrap().game_id();
    let miss = miss_for(&secret_of(&service, id));

    for _ in 0..3 {
        service.submit_guess(id, &miss).unwrap();
    }

    let snapshot = service.get_game(id).unwrap();
    let numbers: Vec<u32> = snapshot
        .game()
        .history()
        .iter()
        .map(|a| a.number())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(snapshot.game().revealed_secret().is_none());
}

#[test]
fn test_list_games_reveals_only_finished_secrets() {
    let (_db, service) = setup_service();
    let open = *service.create_game(Some(8)).unwrap().game_id();
    let won = *service.create_game(Some(9)).unwrap().game_id();
    let secret = secret_of(&service, won);
    service.submit_guess(won, &secret.names()).unwrap();

    let games = service.list_games().unwrap();
    assert_eq!(games.len(), 2);
    assert_eq!(*games[0].game_id(), open);
    assert!(games[0].secret().is_none());
    assert_eq!(*games[1].status(), GameStatus::Won);
    assert_eq!(games[1].secret().as_ref(), Some(&secret));
}

#[test]
fn test_delete_game() {
    let (_db, service) = setup_service();
    let id = *service.create_game(None).unwrap().game_id();

    service.delete_game(id).expect("Delete failed");
    assert!(matches!(
        service.get_game(id),
        Err(ServiceError::GameNotFound(_))
    ));
    assert!(service.list_games().unwrap().is_empty());
}

#[test]
fn test_custom_rules() {
    let (_db, service) = setup_service();
    let rules = Rules::new(4, 3, 2).unwrap();
    let service = GameService::with_rules(service.repository().clone(), rules);

    assert_eq!(service.colors().len(), 4);
    let id = *service.create_game(Some(4)).unwrap().game_id();
    assert_eq!(secret_of(&service, id).len(), 3);

    let err = service
        .submit_guess(id, &["Red", "Blue", "Silver"])
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::InvalidGuess(_))
    ));
}

#[test]
fn test_negative_seeds_are_reproducible() {
    let (_db, service) = setup_service();
    let a = *service.create_game(Some(-5)).unwrap().game_id();
    let b = *service.create_game(Some(-5)).unwrap().game_id();
    assert_eq!(secret_of(&service, a), secret_of(&service, b));
    assert!(secret_of(&service, a).is_distinct());
}

#[test]
fn test_concurrent_guesses_get_distinct_attempt_numbers() {
    const THREADS: u32 = 12;
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(13)).unwrap().game_id();
    let miss = miss_for(&secret_of(&service, id));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = service.clone();
            let miss = miss.clone();
            std::thread::spawn(move || service.submit_guess(id, &miss))
        })
        .collect();

    let mut numbers: Vec<u32> = handles
        .into_iter()
        .map(|h| h.join().unwrap().expect("Guess failed").attempt().number())
        .collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=THREADS).collect::<Vec<_>>());

    let snapshot = service.get_game(id).unwrap();
    assert_eq!(snapshot.game().attempts(), THREADS);
    assert_eq!(snapshot.game().history().len(), THREADS as usize);
}

#[test]
fn test_concurrent_final_guesses_finish_once() {
    const THREADS: usize = 6;
    let (_db, service) = setup_service();
    let id = *service.create_game(Some(14)).unwrap().game_id();
    let miss = miss_for(&secret_of(&service, id));

    for _ in 1..20 {
        service.submit_guess(id, &miss).unwrap();
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = service.clone();
            let miss = miss.clone();
            std::thread::spawn(move || service.submit_guess(id, &miss))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let finished: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(*finished[0].status(), GameStatus::Lost);
    assert_eq!(finished[0].attempt().number(), 20);
    assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
        e,
        ServiceError::Engine(EngineError::GameAlreadyFinished(GameStatus::Lost))
    )));

    let snapshot = service.get_game(id).unwrap();
    assert_eq!(snapshot.game().attempts(), 20);
    assert_eq!(snapshot.game().history().len(), 20);
}
