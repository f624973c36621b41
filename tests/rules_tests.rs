//! Правила как чистые функции: can_attack, is_defense_valid, all_defended.

use durak_engine::domain::card::{Card, Rank, Suit};
use durak_engine::domain::table::{Table, TablePair};
use durak_engine::engine::rules::{validate_attack, validate_defense};
use durak_engine::engine::{all_defended, can_attack, is_defense_valid, EngineError};

fn c(token: &str) -> Card {
    token.parse().expect("bad card token in test")
}

fn all_cards() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

fn table_of(pairs: &[(&str, Option<&str>)]) -> Table {
    Table {
        pairs: pairs
            .iter()
            .map(|(attack, defense)| TablePair {
                attack: c(attack),
                defense: defense.map(c),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Защита
// ---------------------------------------------------------------------------

#[test]
fn defense_relation_matches_definition_for_every_pair() {
    let cards = all_cards();

    for trump in Suit::ALL {
        for &a in &cards {
            for &d in &cards {
                let expected = (d.suit == trump && a.suit != trump)
                    || (d.suit == a.suit && d.rank > a.rank);
                assert_eq!(
                    is_defense_valid(a, d, trump),
                    expected,
                    "attack={a} defense={d} trump={trump}"
                );
            }
        }
    }
}

#[test]
fn same_suit_higher_rank_beats() {
    assert!(is_defense_valid(c("7♠"), c("8♠"), Suit::Hearts));
    assert!(!is_defense_valid(c("8♠"), c("7♠"), Suit::Hearts));
    assert!(!is_defense_valid(c("8♠"), c("8♠"), Suit::Hearts));
}

#[test]
fn any_trump_beats_non_trump() {
    assert!(is_defense_valid(c("9♣"), c("6♥"), Suit::Hearts));
    assert!(is_defense_valid(c("A♣"), c("6♥"), Suit::Hearts));
}

#[test]
fn trump_is_not_beaten_by_non_trump() {
    assert!(!is_defense_valid(c("6♥"), c("9♣"), Suit::Hearts));
    assert!(!is_defense_valid(c("6♥"), c("A♣"), Suit::Hearts));
    assert!(is_defense_valid(c("6♥"), c("7♥"), Suit::Hearts));
}

#[test]
fn different_non_trump_suits_never_beat() {
    assert!(!is_defense_valid(c("6♠"), c("A♣"), Suit::Hearts));
    assert!(!is_defense_valid(c("6♦"), c("A♠"), Suit::Hearts));
}

#[test]
fn defense_relation_is_not_symmetric() {
    let (a, b) = (c("7♠"), c("8♠"));
    assert!(is_defense_valid(a, b, Suit::Hearts));
    assert!(!is_defense_valid(b, a, Suit::Hearts));

    let (a, b) = (c("9♣"), c("6♥"));
    assert!(is_defense_valid(a, b, Suit::Hearts));
    assert!(!is_defense_valid(b, a, Suit::Hearts));
}

#[test]
fn not_beating_is_not_transitive() {
    // 7♠ и 7♣ друг друга не бьют, 7♣ и 8♠ тоже, но 8♠ бьёт 7♠.
    let trump = Suit::Hearts;
    let (a, b, d) = (c("7♠"), c("7♣"), c("8♠"));

    assert!(!is_defense_valid(a, b, trump) && !is_defense_valid(b, a, trump));
    assert!(!is_defense_valid(b, d, trump) && !is_defense_valid(d, b, trump));
    assert!(is_defense_valid(a, d, trump));
}

#[test]
fn validate_defense_matches_positionally() {
    let table = table_of(&[("7♠", Some("8♠")), ("7♣", None), ("8♦", None)]);

    assert_eq!(validate_defense(&table, &[c("9♣"), c("9♦")], Suit::Hearts), Ok(()));
    assert_eq!(
        validate_defense(&table, &[c("9♦"), c("9♣")], Suit::Hearts),
        Err(EngineError::InvalidDefense)
    );
    assert_eq!(
        validate_defense(&table, &[c("9♣")], Suit::Hearts),
        Err(EngineError::WrongDefenseCount {
            expected: 2,
            given: 1
        })
    );
}

// ---------------------------------------------------------------------------
// Атака
// ---------------------------------------------------------------------------

#[test]
fn empty_table_accepts_any_single_rank_group() {
    let table = Table::new();

    assert!(can_attack(&table, &[c("A♠")]));
    assert!(can_attack(&table, &[c("7♠"), c("7♦"), c("7♥")]));
    assert!(!can_attack(&table, &[c("7♠"), c("8♠")]));
    assert_eq!(validate_attack(&table, &[]), Err(EngineError::NoCardsGiven));
}

#[test]
fn pile_on_accepts_ranks_from_attack_and_defense() {
    // На столе ранги {7, 9}: 9 только в защите.
    let table = table_of(&[("7♠", Some("9♠"))]);

    assert!(can_attack(&table, &[c("9♦")]));
    assert!(can_attack(&table, &[c("7♦")]));
    assert!(!can_attack(&table, &[c("10♦")]));
    assert_eq!(
        validate_attack(&table, &[c("10♦")]),
        Err(EngineError::RankNotOnTable)
    );
    assert_eq!(
        validate_attack(&table, &[c("9♦"), c("7♦")]),
        Err(EngineError::InvalidRankGroup)
    );
}

#[test]
fn all_defended_checks_every_pair() {
    assert!(all_defended(&Table::new()));
    assert!(all_defended(&table_of(&[("7♠", Some("8♠")), ("7♣", Some("9♣"))])));
    assert!(!all_defended(&table_of(&[("7♠", Some("8♠")), ("7♣", None)])));
}
