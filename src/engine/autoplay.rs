//! Простейший бот: подсказывает законный ход за того, чья сейчас очередь.
//!
//! Используется стресс-тестом и dev-CLI. Никакой стратегии, только
//! «дёшево отбиться, иначе взять» и «ходить младшей картой».

use crate::domain::card::{Card, Suit};
use crate::domain::player::Player;
use crate::engine::actions::PlayerAction;
use crate::engine::game_loop::{Session, SessionState};
use crate::engine::rules::{all_defended, can_attack, is_defense_valid};

/// Следующий ход для текущей позиции или `None`, если игра не идёт.
pub fn suggest_action(session: &Session) -> Option<PlayerAction> {
    if session.state != SessionState::Playing {
        return None;
    }
    let trump = session.trump_suit()?;
    let attacker = session.player(session.attacker?)?;
    let defender = session.player(session.defender?)?;

    if !session.table.is_empty() && !all_defended(&session.table) {
        return Some(defend_or_take(session, defender, trump));
    }

    Some(attack_or_give_up(session, attacker, trump))
}

fn defend_or_take(session: &Session, defender: &Player, trump: Suit) -> PlayerAction {
    let mut available: Vec<Card> = defender.hand.cards.clone();
    let mut answer = Vec::new();

    for idx in session.table.undefended_indices() {
        let attack = session.table.pairs[idx].attack;
        let cheapest = available
            .iter()
            .copied()
            .filter(|&c| is_defense_valid(attack, c, trump))
            .min_by_key(|&c| cost(c, trump));

        match cheapest {
            Some(card) => {
                available.retain(|&c| c != card);
                answer.push(card);
            }
            None => return PlayerAction::take(defender.player_id),
        }
    }

    PlayerAction::defend(defender.player_id, &answer)
}

fn attack_or_give_up(session: &Session, attacker: &Player, trump: Suit) -> PlayerAction {
    let cards = &attacker.hand.cards;

    if session.table.is_empty() {
        // На пустой стол ходим всегда, рука атакующего не пуста.
        if let Some(card) = cards.iter().copied().min_by_key(|&c| cost(c, trump)) {
            return PlayerAction::attack(attacker.player_id, &[card]);
        }
        return PlayerAction::give_up(attacker.player_id);
    }

    let toss = cards
        .iter()
        .copied()
        .filter(|c| !c.is_trump(trump))
        .filter(|&c| can_attack(&session.table, &[c]))
        .min_by_key(|&c| c.rank);

    match toss {
        Some(card) => PlayerAction::attack(attacker.player_id, &[card]),
        None => PlayerAction::give_up(attacker.player_id),
    }
}

/// Козыри дороже любой простой карты.
fn cost(card: Card, trump: Suit) -> (bool, u8) {
    (card.is_trump(trump), card.rank as u8)
}
