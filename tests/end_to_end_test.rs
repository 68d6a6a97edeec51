//! End-to-end games against an in-memory game server.

mod common;

use common::{client_for, start_game_server};
use tictactoe_client::{
    normalize_id, Cell, ClientErrorKind, GameApi, GameClient, GameSession, MoveOutcome, Phase,
    Position, SessionError,
};

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

/// Creates Alice and Bob and seats them in a fresh room.
fn seeded_room(client: &GameClient) -> (String, String, String) {
    let alice = client.create_player("Alice").unwrap();
    let bob = client.create_player("Bob").unwrap();
    let room = client.create_room(&alice).unwrap();
    client.add_player(&room, &bob).unwrap();
    (alice, bob, room)
}

#[test]
fn test_first_move_scenario() {
    let client = client_for(&start_game_server());

    let alice = client.create_player("Alice").unwrap();
    let bob = client.create_player("Bob").unwrap();
    assert!(alice.starts_with('"'), "ids come back as JSON strings");
    assert_ne!(alice, bob);

    let room = client.create_room(&alice).unwrap();
    client.add_player(&room, &bob).unwrap();

    let players = client.get_players(&room).unwrap();
    assert_eq!(players.len(), 2);
    assert!(players[0].has_id(&alice));
    assert_eq!(players[0].name(), "Alice");
    assert!(players[1].has_id(&bob));
    assert_eq!(players[1].name(), "Bob");

    let board = client.make_play(&room, &alice, 1, 1).unwrap();
    for index in 0..9 {
        let p = Position::from_index(index).unwrap();
        let expected = if p == pos(1, 1) { Cell::X } else { Cell::Empty };
        assert_eq!(board.get(p), expected, "{}", p);
    }

    assert_eq!(client.decide_result(&room).unwrap(), MoveOutcome::Continue);
}

#[test]
fn test_get_players_before_room_is_full() {
    let client = client_for(&start_game_server());
    let alice = client.create_player("Alice").unwrap();
    let room = client.create_room(&alice).unwrap();

    let err = client.get_players(&room).unwrap_err();
    assert!(matches!(err.kind, ClientErrorKind::Server { code: 400, .. }));

    let err = GameSession::start(&client, &room).unwrap_err();
    assert!(matches!(err, SessionError::Client(_)));
}

#[test]
fn test_room_rejects_third_player() {
    let client = client_for(&start_game_server());
    let (_, _, room) = seeded_room(&client);
    let carol = client.create_player("Carol").unwrap();

    let err = client.add_player(&room, &carol).unwrap_err();
    assert!(matches!(err.kind, ClientErrorKind::Server { code: 406, .. }));
}

#[test]
fn test_server_rejections_surface_as_server_errors() {
    let client = client_for(&start_game_server());
    let (alice, bob, room) = seeded_room(&client);

    let err = client.make_play(&room, &bob, 1, 1).unwrap_err();
    assert!(matches!(err.kind, ClientErrorKind::Server { code: 403, .. }));

    client.make_play(&room, &alice, 1, 1).unwrap();
    let err = client.make_play(&room, &bob, 1, 1).unwrap_err();
    assert!(matches!(err.kind, ClientErrorKind::Server { code: 400, .. }));

    let err = client.create_room("\"no-such-player\"").unwrap_err();
    assert!(matches!(err.kind, ClientErrorKind::Server { code: 404, .. }));
}

#[test]
fn test_session_plays_to_a_win() {
    let client = client_for(&start_game_server());
    let (alice, _, room) = seeded_room(&client);

    let mut game = GameSession::start(&client, &room).unwrap();
    assert_eq!(game.room_id(), normalize_id(&room));
    assert_eq!(game.active_player().name(), "Alice");

    for p in [pos(1, 1), pos(2, 1), pos(1, 2), pos(2, 2)] {
        assert_eq!(game.play(&client, p).unwrap(), &Phase::InPlay);
    }
    assert_eq!(game.active_player().name(), "Alice");

    let phase = game.play(&client, pos(1, 3)).unwrap().clone();
    match phase {
        Phase::Won(winner) => assert!(winner.has_id(&alice)),
        other => panic!("expected a winner, got {:?}", other),
    }
    assert_eq!(game.board().get(pos(1, 3)), Cell::X);
    assert_eq!(game.board().get(pos(2, 2)), Cell::O);

    let err = game.play(&client, pos(3, 3)).unwrap_err();
    assert!(matches!(err, SessionError::GameOver));
}

#[test]
fn test_session_plays_to_a_draw() {
    let client = client_for(&start_game_server());
    let (_, _, room) = seeded_room(&client);

    let mut game = GameSession::start(&client, &room).unwrap();
    let moves = [
        pos(1, 1),
        pos(1, 2),
        pos(1, 3),
        pos(2, 2),
        pos(2, 1),
        pos(2, 3),
        pos(3, 2),
        pos(3, 1),
    ];
    for p in moves {
        assert_eq!(game.play(&client, p).unwrap(), &Phase::InPlay);
    }

    assert_eq!(game.play(&client, pos(3, 3)).unwrap(), &Phase::Draw);
    assert!(game.board().rows().iter().flatten().all(|c| !c.is_empty()));
}

#[test]
fn test_session_keeps_turn_after_rejected_move() {
    let client = client_for(&start_game_server());
    let (_, _, room) = seeded_room(&client);

    let mut game = GameSession::start(&client, &room).unwrap();
    game.play(&client, pos(2, 2)).unwrap();
    assert_eq!(game.active_player().name(), "Bob");

    let err = game.play(&client, pos(2, 2)).unwrap_err();
    match err {
        SessionError::Client(e) => {
            assert!(matches!(e.kind, ClientErrorKind::Server { code: 400, .. }))
        }
        other => panic!("expected client error, got {:?}", other),
    }
    assert_eq!(game.active_player().name(), "Bob");
    assert_eq!(game.phase(), &Phase::InPlay);
}
