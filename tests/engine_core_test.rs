//! Ядро сессии: раздача, атака/защита, конец хода, выбывание, конец игры.
//!
//! Колоды раскладываем вручную (`start_with_deck`), чтобы каждый сценарий
//! был полностью детерминирован: первые 6 карт уходят игроку 1, следующие 6
//! игроку 2 и т.д., последняя карта колоды задаёт козырь.

use durak_engine::domain::card::{Card, Suit};
use durak_engine::domain::config::SessionConfig;
use durak_engine::domain::deck::Deck;
use durak_engine::domain::table::TablePair;
use durak_engine::domain::{PlayerId, TableId};
use durak_engine::engine::{
    all_defended, EngineError, GameEventKind, GameStatus, NoopReleaser, PlayerAction, RandomSource,
    Session, SessionState,
};
use durak_engine::infra::logging;

const P1: PlayerId = 10;
const P2: PlayerId = 20;
const P3: PlayerId = 30;
const P4: PlayerId = 40;

/// RNG, который ничего не перемешивает: колода остаётся в стандартном порядке.
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {
        // no-op
    }
}

fn c(token: &str) -> Card {
    token.parse().expect("bad card token in test")
}

/// Колода: `front` сверху (в порядке раздачи), `bottom` последней,
/// остальные карты между ними в стандартном порядке.
fn stacked_deck(front: &[&str], bottom: &str) -> Deck {
    let front: Vec<Card> = front.iter().map(|t| c(t)).collect();
    let bottom = c(bottom);

    let mut cards = front.clone();
    cards.extend(
        Deck::standard_36()
            .cards
            .into_iter()
            .filter(|card| !front.contains(card) && *card != bottom),
    );
    cards.push(bottom);

    let deck = Deck::from_cards(cards);
    assert!(deck.is_complete(), "stacked deck must be a permutation of 36 cards");
    deck
}

fn session_with(players: &[PlayerId], deck: Deck) -> Session {
    logging::init_for_tests();

    let mut session = Session::new(1, SessionConfig::default());
    session.setup();
    for &id in players {
        session.join(id).expect("join failed");
    }
    session.start_with_deck(deck).expect("start failed");
    session
}

/// Два игрока, козырь ♥ и ни у кого нет червей: атакует игрок с номером хода 1.
fn basic_two_player() -> Session {
    let deck = stacked_deck(
        &[
            "7♠", "6♣", "7♣", "9♦", "10♦", "J♣", // P1
            "8♠", "Q♣", "K♣", "A♣", "6♦", "7♦", // P2
        ],
        "A♥",
    );
    session_with(&[P1, P2], deck)
}

fn hand_of(session: &Session, id: PlayerId) -> Vec<Card> {
    session.player(id).expect("no such player").hand.cards.clone()
}

// ---------------------------------------------------------------------------
// Старт
// ---------------------------------------------------------------------------

#[test]
fn start_deals_six_cards_each_and_reveals_trump() {
    let session = basic_two_player();

    assert_eq!(session.state, SessionState::Playing);
    assert_eq!(session.trump_suit(), Some(Suit::Hearts));
    assert_eq!(session.trump_card, Some(c("A♥")));
    assert!(!session.trump_taken);
    assert_eq!(session.deck.len(), 36 - 12);
    assert_eq!(hand_of(&session, P1).len(), 6);
    assert_eq!(hand_of(&session, P2).len(), 6);
    assert!(hand_of(&session, P1).contains(&c("7♠")));
    assert!(hand_of(&session, P2).contains(&c("8♠")));
}

#[test]
fn start_without_shuffle_deals_the_standard_order() {
    let mut session = Session::new(1, SessionConfig::default());
    session.join(P1).unwrap();
    session.join(P2).unwrap();
    session.start(&mut DummyRng::default()).unwrap();

    // Нижняя карта стандартной колоды A♠, первые 12 карт все червы/бубны.
    assert_eq!(session.trump_card, Some(c("A♠")));
    assert_eq!(
        hand_of(&session, P1),
        ["6♥", "7♥", "8♥", "9♥", "10♥", "J♥"].map(c).to_vec()
    );
    assert_eq!(
        hand_of(&session, P2),
        ["Q♥", "K♥", "A♥", "6♦", "7♦", "8♦"].map(c).to_vec()
    );
    // Пик ни у кого нет: первым ходит номер 1.
    assert_eq!(session.attacker, Some(P1));
}

#[test]
fn hand_lookup_for_strangers_fails() {
    let session = basic_two_player();

    assert_eq!(session.hand(P1).map(|h| h.len()), Ok(6));
    assert_eq!(session.hand(99).map(|h| h.len()), Err(EngineError::NotAPlayer(99)));
}

#[test]
fn without_trumps_player_one_attacks_first() {
    let session = basic_two_player();

    assert_eq!(
        session.status(),
        GameStatus::InProgress {
            attacker: P1,
            defender: P2
        }
    );
}

#[test]
fn lowest_trump_holder_attacks_first() {
    let deck = stacked_deck(
        &[
            "7♥", "6♣", "7♣", "9♦", "10♦", "J♣", // P1: 7♥
            "6♥", "Q♣", "K♣", "A♣", "6♦", "7♦", // P2: 6♥, младший
            "8♥", "8♣", "9♣", "10♣", "8♦", "J♦", // P3
        ],
        "A♥",
    );
    let session = session_with(&[P1, P2, P3], deck);

    assert_eq!(session.attacker, Some(P2));
    assert_eq!(session.defender, Some(P3));
}

#[test]
fn full_table_draws_the_trump_card_during_deal() {
    let players = [1, 2, 3, 4, 5, 6];
    let deck = stacked_deck(&[], "A♠");

    logging::init_for_tests();
    let mut session = Session::new(7, SessionConfig::default());
    for id in players {
        session.join(id).unwrap();
    }
    let outcome = session.start_with_deck(deck).unwrap();

    assert!(session.deck.is_empty());
    assert!(session.trump_taken);
    assert_eq!(session.trump_suit(), Some(Suit::Spades));
    assert!(hand_of(&session, 6).contains(&c("A♠")));
    assert!(outcome.events.contains(&GameEventKind::TrumpCardDrawn {
        player_id: 6,
        trump_suit: Suit::Spades,
    }));
}

#[test]
fn start_needs_two_players_and_setup_state() {
    let mut session = Session::new(1, SessionConfig::default());
    session.join(P1).unwrap();

    assert_eq!(
        session.start_with_deck(Deck::standard_36()),
        Err(EngineError::NotEnoughPlayers)
    );

    session.join(P2).unwrap();
    session.start_with_deck(Deck::standard_36()).unwrap();

    assert_eq!(
        session.start_with_deck(Deck::standard_36()),
        Err(EngineError::WrongState)
    );
    assert_eq!(session.join(P3), Err(EngineError::WrongState));
}

#[test]
fn join_rejects_duplicates_and_overflow() {
    let mut session = Session::new(1, SessionConfig::default());
    session.join(P1).unwrap();
    assert_eq!(session.join(P1), Err(EngineError::AlreadyJoined(P1)));

    for id in 2..=6 {
        session.join(id).unwrap();
    }
    assert_eq!(session.join(7), Err(EngineError::TableFull));

    let turns: Vec<u8> = session.players.iter().map(|p| p.turn_number).collect();
    assert_eq!(turns, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn oversized_config_never_seats_more_than_the_deck_can_deal() {
    let mut session = Session::new(1, SessionConfig { max_players: 300 });
    for id in 1..=6 {
        session.join(id).unwrap();
    }

    assert_eq!(session.join(7), Err(EngineError::TableFull));
    assert_eq!(session.players.len(), 6);
}

#[test]
fn start_with_incomplete_deck_is_rejected() {
    let mut session = Session::new(1, SessionConfig::default());
    session.join(P1).unwrap();
    session.join(P2).unwrap();

    let mut cards: Vec<Card> = Deck::standard_36().cards.into_iter().collect();
    cards[0] = cards[1];
    assert_eq!(
        session.start_with_deck(Deck::from_cards(cards)),
        Err(EngineError::InvalidDeck)
    );
    assert_eq!(session.state, SessionState::Setup);
}

#[test]
fn setup_resets_finished_game_and_bumps_game_number() {
    let mut session = basic_two_player();
    let before = session.game_number;

    session.setup();

    assert_eq!(session.state, SessionState::Setup);
    assert_eq!(session.game_number, before + 1);
    assert!(session.players.is_empty());
    assert!(session.table.is_empty());
    assert!(session.trump_card.is_none());
    assert_eq!(session.history.len(), 1);
}

// ---------------------------------------------------------------------------
// Атака и защита
// ---------------------------------------------------------------------------

#[test]
fn basic_attack_and_defend_same_suit() {
    let mut session = basic_two_player();

    session.attack(P1, &["7♠"]).unwrap();
    assert_eq!(session.table.pairs, vec![TablePair::new(c("7♠"))]);
    assert!(!hand_of(&session, P1).contains(&c("7♠")));

    session.defend(P2, &["8♠"]).unwrap();
    assert_eq!(
        session.table.pairs,
        vec![TablePair {
            attack: c("7♠"),
            defense: Some(c("8♠")),
        }]
    );
    assert!(all_defended(&session.table));
    assert!(!hand_of(&session, P2).contains(&c("8♠")));
}

#[test]
fn only_the_attacker_may_attack_and_only_the_defender_may_defend() {
    let mut session = basic_two_player();

    assert_eq!(session.attack(P2, &["8♠"]), Err(EngineError::NotYourTurn(P2)));

    session.attack(P1, &["7♠"]).unwrap();
    assert_eq!(session.defend(P1, &["6♣"]), Err(EngineError::NotYourTurn(P1)));
    assert_eq!(session.take(P1, &mut NoopReleaser), Err(EngineError::NotYourTurn(P1)));
    assert_eq!(session.give_up(P2, &mut NoopReleaser), Err(EngineError::NotYourTurn(P2)));
}

#[test]
fn attack_validation_errors() {
    let mut session = basic_two_player();

    assert_eq!(session.attack(P1, &["8♠"]), Err(EngineError::CardsNotInHand));
    assert_eq!(session.attack(P1, &["7♠", "7♠"]), Err(EngineError::CardsNotInHand));
    assert_eq!(session.attack(P1, &["7♠", "6♣"]), Err(EngineError::InvalidRankGroup));
    assert!(matches!(
        session.attack(P1, &["7x"]),
        Err(EngineError::InvalidCardFormat(_))
    ));
    assert_eq!(session.attack::<&str>(P1, &[]), Err(EngineError::NoCardsGiven));

    // Ни один отказ ничего не поменял.
    assert!(session.table.is_empty());
    assert_eq!(hand_of(&session, P1).len(), 6);
}

#[test]
fn pile_on_only_with_ranks_already_on_table() {
    let mut session = basic_two_player();
    session.attack(P1, &["7♠"]).unwrap();
    session.defend(P2, &["8♠"]).unwrap();

    assert_eq!(session.attack(P1, &["9♦"]), Err(EngineError::RankNotOnTable));

    session.attack(P1, &["7♣"]).unwrap();
    assert_eq!(session.table.len(), 2);
    assert_eq!(session.table.undefended_count(), 1);
}

#[test]
fn several_cards_of_one_rank_in_one_attack() {
    let mut session = basic_two_player();

    session.attack(P1, &["7♠", "7♣"]).unwrap();

    assert_eq!(session.table.len(), 2);
    assert_eq!(hand_of(&session, P1).len(), 4);
}

#[test]
fn defend_is_all_or_nothing() {
    let mut session = basic_two_player();
    session.attack(P1, &["7♠", "7♣"]).unwrap();

    let table_before = session.table.clone();
    let hand_before = hand_of(&session, P2);

    assert_eq!(
        session.defend(P2, &["8♠"]),
        Err(EngineError::WrongDefenseCount {
            expected: 2,
            given: 1
        })
    );
    // 8♠ бьёт 7♠, но 6♦ не бьёт 7♣: отклоняется вся защита.
    assert_eq!(session.defend(P2, &["8♠", "6♦"]), Err(EngineError::InvalidDefense));
    // Позиционное сопоставление: Q♣ против 7♠ не подходит.
    assert_eq!(session.defend(P2, &["Q♣", "8♠"]), Err(EngineError::InvalidDefense));

    assert_eq!(session.table, table_before);
    assert_eq!(hand_of(&session, P2), hand_before);

    session.defend(P2, &["8♠", "Q♣"]).unwrap();
    assert!(all_defended(&session.table));
}

#[test]
fn defend_and_take_need_open_attack() {
    let mut session = basic_two_player();

    assert_eq!(session.defend(P2, &["8♠"]), Err(EngineError::NothingToDefend));
    assert_eq!(session.take(P2, &mut NoopReleaser), Err(EngineError::NothingToTake));
    assert_eq!(session.give_up(P1, &mut NoopReleaser), Err(EngineError::NothingToGiveUp));

    session.attack(P1, &["7♠"]).unwrap();
    assert_eq!(
        session.give_up(P1, &mut NoopReleaser),
        Err(EngineError::AttackNotFullyDefended)
    );

    session.defend(P2, &["8♠"]).unwrap();
    assert_eq!(session.defend(P2, &["Q♣"]), Err(EngineError::AlreadyFullyDefended));
    assert_eq!(
        session.take(P2, &mut NoopReleaser),
        Err(EngineError::AlreadyFullyDefended)
    );
}

// ---------------------------------------------------------------------------
// Конец хода
// ---------------------------------------------------------------------------

#[test]
fn give_up_passes_attack_to_defender_and_refills_from_new_attacker() {
    let mut session = basic_two_player();
    session.attack(P1, &["7♠"]).unwrap();
    session.defend(P2, &["8♠"]).unwrap();

    let outcome = session.give_up(P1, &mut NoopReleaser).unwrap();

    assert_eq!(
        outcome.status,
        GameStatus::InProgress {
            attacker: P2,
            defender: P1
        }
    );
    assert!(session.table.is_empty());
    assert_eq!(session.discard, vec![c("7♠"), c("8♠")]);

    // Добор начинается с нового атакующего: он берёт верхнюю карту.
    assert!(hand_of(&session, P2).contains(&c("6♥")));
    assert!(hand_of(&session, P1).contains(&c("7♥")));
    assert_eq!(hand_of(&session, P1).len(), 6);
    assert_eq!(hand_of(&session, P2).len(), 6);
    assert_eq!(session.deck.len(), 22);
}

#[test]
fn take_moves_table_into_defender_hand_and_skips_defender() {
    let mut session = basic_two_player();
    session.attack(P1, &["7♠"]).unwrap();

    let outcome = session.take(P2, &mut NoopReleaser).unwrap();

    // Вдвоём: после «взял» снова ходит P1.
    assert_eq!(
        outcome.status,
        GameStatus::InProgress {
            attacker: P1,
            defender: P2
        }
    );
    assert!(session.table.is_empty());
    assert!(session.discard.is_empty());
    assert_eq!(hand_of(&session, P2).len(), 7);
    assert!(hand_of(&session, P2).contains(&c("7♠")));
    assert_eq!(hand_of(&session, P1).len(), 6);
    assert!(matches!(
        outcome.events.first(),
        Some(GameEventKind::CardsTaken { player_id: P2, .. })
    ));
}

#[test]
fn take_in_three_player_game_skips_the_defender() {
    let deck = stacked_deck(
        &[
            "7♠", "6♣", "7♣", "9♦", "10♦", "J♣", // P1
            "8♠", "Q♣", "K♣", "A♣", "6♦", "7♦", // P2
            "8♣", "9♣", "10♣", "8♦", "J♦", "Q♦", // P3
        ],
        "A♥",
    );
    let mut session = session_with(&[P1, P2, P3], deck);
    assert_eq!(session.attacker, Some(P1));
    assert_eq!(session.defender, Some(P2));

    session.attack(P1, &["7♠"]).unwrap();
    session.take(P2, &mut NoopReleaser).unwrap();

    assert_eq!(session.attacker, Some(P3));
    assert_eq!(session.defender, Some(P1));
}

// ---------------------------------------------------------------------------
// Выбывание и конец игры
// ---------------------------------------------------------------------------

/// Козырь ♦. P1 ходит шестёрками, P2 отбивает всё и оба остаются без карт.
fn emptying_round_deck(extra: &[&str]) -> Deck {
    let mut front = vec![
        "6♠", "6♣", "6♥", "6♦", "7♦", "8♠", // P1
        "7♠", "7♣", "7♥", "8♦", "9♦", "9♠", // P2
    ];
    front.extend_from_slice(extra);
    stacked_deck(&front, "A♦")
}

fn play_emptying_round(session: &mut Session) {
    session.attack(P1, &["6♠", "6♣", "6♥"]).unwrap();
    session.defend(P2, &["7♠", "7♣", "7♥"]).unwrap();
    session.attack(P1, &["6♦"]).unwrap();
    session.defend(P2, &["8♦"]).unwrap();
    session.attack(P1, &["7♦"]).unwrap();
    session.defend(P2, &["9♦"]).unwrap();
    // 8 уже лежит на столе (8♦ в защите).
    session.attack(P1, &["8♠"]).unwrap();
    session.defend(P2, &["9♠"]).unwrap();

    assert!(hand_of(session, P1).is_empty());
    assert!(hand_of(session, P2).is_empty());
}

#[test]
fn empty_hands_are_skipped_on_refill_and_last_player_is_durak() {
    let deck = emptying_round_deck(&["10♠", "J♠", "Q♠", "K♠", "A♠", "10♣"]);
    let mut session = session_with(&[P1, P2, P3], deck);
    assert_eq!(session.attacker, Some(P1));

    play_emptying_round(&mut session);

    let mut released = Vec::new();
    let mut releaser =
        |table_id: TableId, player_id: PlayerId| released.push((table_id, player_id));
    let outcome = session.give_up(P1, &mut releaser).unwrap();

    // В колоде ещё есть карты, но пустые руки не пополняются.
    assert_eq!(session.deck.len(), 36 - 18);
    assert_eq!(released, vec![(1, P1), (1, P2)]);
    assert_eq!(session.state, SessionState::Finished);
    assert_eq!(session.durak, Some(P3));
    assert_eq!(
        outcome.status,
        GameStatus::Finished(durak_engine::engine::GameSummary {
            durak: Some(P3),
            winners: vec![P1, P2],
        })
    );
    assert!(outcome.events.contains(&GameEventKind::PlayerFinished {
        player_id: P1,
        place: 1
    }));

    // После конца игры ходить нельзя.
    assert_eq!(session.attack(P3, &["10♠"]), Err(EngineError::WrongState));
}

#[test]
fn eliminated_new_attacker_passes_the_turn_on() {
    let deck = emptying_round_deck(&[
        "10♠", "J♠", "Q♠", "K♠", "A♠", "10♣", // P3
        "J♣", "Q♣", "K♣", "A♣", "10♥", "J♥", // P4
    ]);
    let mut session = session_with(&[P1, P2, P3, P4], deck);

    play_emptying_round(&mut session);
    let outcome = session.give_up(P1, &mut NoopReleaser).unwrap();

    // Атаковать должен был P2 (отбился), но он вышел: ходит следующий, P3.
    assert_eq!(
        outcome.status,
        GameStatus::InProgress {
            attacker: P3,
            defender: P4
        }
    );
    assert_eq!(session.finished_players, vec![P1, P2]);
    assert_eq!(session.players.len(), 2);
}

#[test]
fn everyone_out_at_once_is_a_draw() {
    let mut session = session_with(&[P1, P2], emptying_round_deck(&[]));

    play_emptying_round(&mut session);
    let outcome = session.give_up(P1, &mut NoopReleaser).unwrap();

    assert_eq!(session.state, SessionState::Finished);
    assert_eq!(session.durak, None);
    assert!(outcome.events.contains(&GameEventKind::GameFinished {
        durak: None,
        winners: vec![P1, P2],
    }));
}

#[test]
fn apply_routes_actions_and_history_records_everything() {
    let mut session = basic_two_player();
    let events_after_start = session.history.len();

    session
        .apply(&PlayerAction::attack(P1, &["7♠"]), &mut NoopReleaser)
        .unwrap();
    session
        .apply(&PlayerAction::defend(P2, &["8♠"]), &mut NoopReleaser)
        .unwrap();
    assert_eq!(
        session.apply(&PlayerAction::take(P2), &mut NoopReleaser),
        Err(EngineError::AlreadyFullyDefended)
    );
    session
        .apply(&PlayerAction::give_up(P1), &mut NoopReleaser)
        .unwrap();

    let indices: Vec<u32> = session.history.events.iter().map(|e| e.index).collect();
    let expected: Vec<u32> = (0..session.history.len() as u32).collect();
    assert_eq!(indices, expected);
    assert!(session.history.len() > events_after_start + 3);
}
