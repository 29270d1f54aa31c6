//! Lobby workflow: registration, challenges, games and subscriptions.

use duel_server::{ChallengeStatus, DuelError, Lobby, LobbyConfig, Player};
use duel_tictactoe::{Coord, MoveError, Status, Symbol};
use uuid::Uuid;

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).expect("in range")
}

fn two_players(lobby: &Lobby) -> (Player, Player) {
    let ada = lobby.register_player("Ada").expect("valid name");
    let bob = lobby.register_player("Bob").expect("valid name");
    (ada, bob)
}

#[test]
fn test_register_validates_and_lists_players() {
    let lobby = Lobby::default();
    lobby.register_player("  Zed ").expect("valid name");
    lobby.register_player("Amy").expect("valid name");

    assert!(matches!(
        lobby.register_player(""),
        Err(DuelError::InvalidName { .. })
    ));
    assert!(matches!(
        lobby.register_player("a name far too long"),
        Err(DuelError::InvalidName { .. })
    ));

    let names: Vec<String> = lobby.players().iter().map(|p| p.name().clone()).collect();
    assert_eq!(names, vec!["Amy", "Zed"]);
    assert!(lobby.players().iter().all(|p| *p.available()));
}

#[test]
fn test_max_name_len_comes_from_config() {
    let config: LobbyConfig = toml::from_str("max_name_len = 3").expect("valid");
    let lobby = Lobby::new(config);
    assert!(lobby.register_player("Ada").is_ok());
    assert!(lobby.register_player("Adam").is_err());
}

#[test]
fn test_challenge_rules() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);

    assert_eq!(
        lobby.send_challenge(*ada.id(), *ada.id()),
        Err(DuelError::SelfChallenge)
    );
    let ghost = Uuid::new_v4();
    assert_eq!(
        lobby.send_challenge(*ada.id(), ghost),
        Err(DuelError::PlayerNotFound { id: ghost })
    );

    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");
    assert_eq!(*challenge.status(), ChallengeStatus::Pending);
    assert_eq!(
        lobby.pending_challenges(*bob.id()).expect("known player"),
        vec![challenge.clone()]
    );
    assert!(lobby.pending_challenges(*ada.id()).expect("known player").is_empty());

    // Only the challenged player answers.
    assert_eq!(
        lobby.accept_challenge(*challenge.challenge_id(), *ada.id()),
        Err(DuelError::NotParticipant {
            player_id: *ada.id()
        })
    );
}

#[test]
fn test_accept_creates_game_with_challenger_as_x() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");

    let game = lobby
        .accept_challenge(*challenge.challenge_id(), *bob.id())
        .expect("accepted");
    assert_eq!(game.game_id(), challenge.game_id());
    assert_eq!(game.player_x().id(), ada.id());
    assert_eq!(game.player_o().id(), bob.id());
    assert_eq!(*game.revision(), 0);
    assert_eq!(game.state().status(), Status::Ongoing);

    assert_eq!(
        *lobby
            .challenge(*challenge.challenge_id())
            .expect("exists")
            .status(),
        ChallengeStatus::Accepted
    );
    assert!(lobby.players().iter().all(|p| !*p.available()));
    assert!(lobby.pending_challenges(*bob.id()).expect("known").is_empty());

    assert!(matches!(
        lobby.deny_challenge(*challenge.challenge_id(), *bob.id()),
        Err(DuelError::ChallengeNotPending {
            status: ChallengeStatus::Accepted,
            ..
        })
    ));
}

#[test]
fn test_deny_creates_no_game() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");

    let denied = lobby
        .deny_challenge(*challenge.challenge_id(), *bob.id())
        .expect("denied");
    assert_eq!(*denied.status(), ChallengeStatus::Denied);
    assert_eq!(
        lobby.game(*challenge.game_id()),
        Err(DuelError::GameNotFound {
            id: *challenge.game_id()
        })
    );
}

#[test]
fn test_full_game_frees_players() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");
    let game = lobby
        .accept_challenge(*challenge.challenge_id(), *bob.id())
        .expect("accepted");
    let id = *game.game_id();

    assert_eq!(
        lobby.make_move(id, *bob.id(), at(0, 0)),
        Err(DuelError::NotYourTurn {
            expected: Symbol::X
        })
    );

    lobby.make_move(id, *ada.id(), at(0, 0)).expect("legal");
    assert_eq!(
        lobby.make_move(id, *bob.id(), at(0, 0)),
        Err(DuelError::Move(MoveError::CellOccupied))
    );
    lobby.make_move(id, *bob.id(), at(1, 0)).expect("legal");
    lobby.make_move(id, *ada.id(), at(1, 1)).expect("legal");
    lobby.make_move(id, *bob.id(), at(2, 0)).expect("legal");
    let last = lobby.make_move(id, *ada.id(), at(2, 2)).expect("legal");

    assert_eq!(last.state().status(), Status::Won(Symbol::X));
    assert_eq!(last.state().winner(), Some(Symbol::X));
    assert_eq!(*last.revision(), 5);
    assert!(lobby.players().iter().all(|p| *p.available()));

    assert_eq!(
        lobby.make_move(id, *bob.id(), at(0, 2)),
        Err(DuelError::Move(MoveError::OutOfTurn))
    );
    assert_eq!(lobby.game(id).expect("exists"), last);
}

#[test]
fn test_game_subscription_sees_snapshot_then_each_move() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");
    let game = lobby
        .accept_challenge(*challenge.challenge_id(), *bob.id())
        .expect("accepted");
    let id = *game.game_id();

    let mut watcher = lobby.subscribe_game(id).expect("game exists");
    lobby.make_move(id, *ada.id(), at(0, 0)).expect("legal");
    assert!(lobby.make_move(id, *ada.id(), at(0, 1)).is_err());
    lobby.make_move(id, *bob.id(), at(0, 1)).expect("legal");

    let revisions: Vec<u64> = std::iter::from_fn(|| watcher.try_next())
        .map(|record| *record.revision())
        .collect();
    assert_eq!(revisions, vec![0, 1, 2]);

    watcher.unsubscribe();
    lobby.make_move(id, *ada.id(), at(2, 2)).expect("legal");
    assert_eq!(watcher.try_next(), None);
}

#[test]
fn test_accept_reaches_both_challenge_feeds_and_game_watchers() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");

    let mut ada_feed = lobby.subscribe_challenges(*ada.id()).expect("known");
    let mut bob_feed = lobby.subscribe_challenges(*bob.id()).expect("known");
    assert_eq!(bob_feed.try_next(), Some(challenge.clone()));

    // The reserved game id can be watched before the game exists.
    let mut game_feed = lobby
        .subscribe_game(*challenge.game_id())
        .expect("reserved by pending challenge");
    assert_eq!(game_feed.try_next(), None);

    let game = lobby
        .accept_challenge(*challenge.challenge_id(), *bob.id())
        .expect("accepted");

    let accepted = lobby.challenge(*challenge.challenge_id()).expect("exists");
    assert_eq!(*accepted.status(), ChallengeStatus::Accepted);
    assert_eq!(ada_feed.try_next(), Some(accepted.clone()));
    assert_eq!(bob_feed.try_next(), Some(accepted));
    assert_eq!(game_feed.try_next(), Some(game));
    assert_eq!(game_feed.try_next(), None);
}

#[test]
fn test_unknown_game_cannot_be_watched() {
    let lobby = Lobby::default();
    let id = Uuid::new_v4();
    assert!(matches!(
        lobby.subscribe_game(id),
        Err(DuelError::GameNotFound { .. })
    ));
}

#[test]
fn test_players_in_a_game_cannot_start_another() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let cat = lobby.register_player("Cat").expect("valid name");

    let to_bob = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");
    let to_cat = lobby.send_challenge(*ada.id(), *cat.id()).expect("sent");
    let game = lobby
        .accept_challenge(*to_bob.challenge_id(), *bob.id())
        .expect("accepted");

    // Ada is busy, so Cat cannot accept and nobody can challenge her.
    assert_eq!(
        lobby.accept_challenge(*to_cat.challenge_id(), *cat.id()),
        Err(DuelError::PlayerBusy { id: *ada.id() })
    );
    assert!(
        lobby
            .challenge(*to_cat.challenge_id())
            .expect("exists")
            .is_pending()
    );
    assert_eq!(
        lobby.send_challenge(*cat.id(), *ada.id()),
        Err(DuelError::PlayerBusy { id: *ada.id() })
    );
    assert!(*lobby.player(*cat.id()).expect("known").available());

    // Once Ada's game ends, the waiting challenge can be accepted.
    let id = *game.game_id();
    for (player, row, col) in [(&ada, 0, 0), (&bob, 1, 0), (&ada, 0, 1), (&bob, 1, 1), (&ada, 0, 2)] {
        lobby.make_move(id, *player.id(), at(row, col)).expect("legal");
    }
    assert!(*lobby.player(*ada.id()).expect("known").available());

    let second = lobby
        .accept_challenge(*to_cat.challenge_id(), *cat.id())
        .expect("ada is free again");
    assert_eq!(second.state().status(), Status::Ongoing);
    assert!(!*lobby.player(*ada.id()).expect("known").available());
    assert!(*lobby.player(*bob.id()).expect("known").available());
}

#[test]
fn test_player_feed_tracks_registration_and_availability() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);

    let mut feed = lobby.subscribe_players();
    assert_eq!(feed.try_next(), Some(ada.clone()));
    assert_eq!(feed.try_next(), Some(bob.clone()));
    assert_eq!(feed.try_next(), None);

    let cat = lobby.register_player("Cat").expect("valid name");
    assert_eq!(feed.try_next(), Some(cat));

    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");
    assert_eq!(feed.try_next(), None);

    let game = lobby
        .accept_challenge(*challenge.challenge_id(), *bob.id())
        .expect("accepted");
    let busy: Vec<_> = std::iter::from_fn(|| feed.try_next()).collect();
    assert_eq!(busy.len(), 2);
    assert!(busy.iter().all(|p| !*p.available()));

    let id = *game.game_id();
    for (player, row, col) in [(&ada, 0, 0), (&bob, 1, 0), (&ada, 0, 1), (&bob, 1, 1), (&ada, 0, 2)] {
        lobby.make_move(id, *player.id(), at(row, col)).expect("legal");
    }
    let freed: Vec<_> = std::iter::from_fn(|| feed.try_next()).collect();
    assert_eq!(freed.len(), 2);
    assert!(freed.iter().all(|p| *p.available()));
}

#[test]
fn test_challenge_subscription_reaches_both_sides() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let earlier = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");

    let mut bob_feed = lobby.subscribe_challenges(*bob.id()).expect("known");
    let mut ada_feed = lobby.subscribe_challenges(*ada.id()).expect("known");

    assert_eq!(bob_feed.try_next(), Some(earlier.clone()));
    assert_eq!(ada_feed.try_next(), None);

    let denied = lobby
        .deny_challenge(*earlier.challenge_id(), *bob.id())
        .expect("denied");
    assert_eq!(bob_feed.try_next(), Some(denied.clone()));
    assert_eq!(ada_feed.try_next(), Some(denied));

    assert!(matches!(
        lobby.subscribe_challenges(Uuid::new_v4()),
        Err(DuelError::PlayerNotFound { .. })
    ));
}

#[tokio::test]
async fn test_racing_moves_are_serialized() {
    let lobby = Lobby::default();
    let (ada, bob) = two_players(&lobby);
    let challenge = lobby.send_challenge(*ada.id(), *bob.id()).expect("sent");
    let game = lobby
        .accept_challenge(*challenge.challenge_id(), *bob.id())
        .expect("accepted");
    let id = *game.game_id();
    lobby.make_move(id, *ada.id(), at(0, 0)).expect("legal");

    // Bob fires the same move from many tasks; exactly one lands.
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lobby = lobby.clone();
            let bob = *bob.id();
            tokio::spawn(async move { lobby.make_move(id, bob, at(1, 1)) })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.expect("task").is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
    assert_eq!(*lobby.game(id).expect("exists").revision(), 2);
}
