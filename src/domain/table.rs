use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};

/// Пара на столе: атакующая карта и (возможно) карта, которой отбились.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TablePair {
    pub attack: Card,
    pub defense: Option<Card>,
}

impl TablePair {
    pub fn new(attack: Card) -> Self {
        Self {
            attack,
            defense: None,
        }
    }

    pub fn is_defended(&self) -> bool {
        self.defense.is_some()
    }
}

/// Игровое поле текущего хода: упорядоченные пары атака/защита.
/// Очищается в конце каждого хода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Table {
    pub pairs: Vec<TablePair>,
}

impl Table {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Все ранги на столе: и атакующие, и отбивающие.
    pub fn ranks(&self) -> BTreeSet<Rank> {
        self.pairs
            .iter()
            .flat_map(|p| std::iter::once(p.attack.rank).chain(p.defense.map(|d| d.rank)))
            .collect()
    }

    /// Индексы неотбитых пар в порядке стола.
    pub fn undefended_indices(&self) -> Vec<usize> {
        self.pairs
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_defended())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn undefended_count(&self) -> usize {
        self.pairs.iter().filter(|p| !p.is_defended()).count()
    }

    pub fn push_attack(&mut self, card: Card) {
        self.pairs.push(TablePair::new(card));
    }

    /// Все карты стола (атака и защита), в порядке пар.
    pub fn cards(&self) -> Vec<Card> {
        self.pairs
            .iter()
            .flat_map(|p| std::iter::once(p.attack).chain(p.defense))
            .collect()
    }

    /// Забрать все карты со стола, стол пустеет.
    pub fn take_all(&mut self) -> Vec<Card> {
        let cards = self.cards();
        self.pairs.clear();
        cards
    }
}
