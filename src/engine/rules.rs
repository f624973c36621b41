//! Правила: чем можно ходить, чем можно отбиваться.
//!
//! Чистые функции без мутаций, работают на снимке стола.

use crate::domain::card::{Card, Suit};
use crate::domain::table::Table;
use crate::engine::errors::EngineError;

/// Можно ли пойти/подкинуть эти карты.
///
/// Все карты одного ранга; если стол не пуст, ранг уже должен быть на столе
/// (в атаке или в защите любой пары).
pub fn can_attack(table: &Table, candidates: &[Card]) -> bool {
    validate_attack(table, candidates).is_ok()
}

/// То же, что `can_attack`, но с конкретной причиной отказа.
pub fn validate_attack(table: &Table, candidates: &[Card]) -> Result<(), EngineError> {
    let Some(first) = candidates.first() else {
        return Err(EngineError::NoCardsGiven);
    };

    if candidates.iter().any(|c| c.rank != first.rank) {
        return Err(EngineError::InvalidRankGroup);
    }

    if !table.is_empty() && !table.ranks().contains(&first.rank) {
        return Err(EngineError::RankNotOnTable);
    }

    Ok(())
}

/// Бьёт ли `defense` карту `attack` при козыре `trump`.
pub fn is_defense_valid(attack: Card, defense: Card, trump: Suit) -> bool {
    let attack_trump = attack.is_trump(trump);
    let defense_trump = defense.is_trump(trump);

    match (attack_trump, defense_trump) {
        // Козырь бьётся только старшим козырем.
        (true, false) => false,
        // Любой козырь бьёт любую некозырную.
        (false, true) => true,
        _ => defense.suit == attack.suit && defense.rank > attack.rank,
    }
}

/// Все пары на столе отбиты.
pub fn all_defended(table: &Table) -> bool {
    table.pairs.iter().all(|p| p.is_defended())
}

/// Проверка защиты: карты сопоставляются с неотбитыми парами по порядку.
/// Защита принимается только целиком.
pub fn validate_defense(table: &Table, defense: &[Card], trump: Suit) -> Result<(), EngineError> {
    let undefended = table.undefended_indices();

    if defense.len() != undefended.len() {
        return Err(EngineError::WrongDefenseCount {
            expected: undefended.len(),
            given: defense.len(),
        });
    }

    let beats_all = undefended
        .iter()
        .zip(defense)
        .all(|(&idx, &card)| is_defense_valid(table.pairs[idx].attack, card, trump));

    if beats_all {
        Ok(())
    } else {
        Err(EngineError::InvalidDefense)
    }
}
