use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Suit};

/// Сколько карт добирается в руку после хода.
pub const HAND_SIZE: usize = 6;

/// Карты на руке у игрока. Порядок = порядок получения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Все карты на руке и ни одна не повторяется в запросе.
    pub fn contains_all(&self, wanted: &[Card]) -> bool {
        wanted.iter().enumerate().all(|(i, card)| {
            self.contains(card) && !wanted[..i].contains(card)
        })
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Убрать карты с руки. Вызывающий заранее проверил `contains_all`.
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
    }

    /// Сколько карт не хватает до полной руки.
    pub fn missing(&self) -> usize {
        HAND_SIZE.saturating_sub(self.cards.len())
    }

    /// Младший козырь на руке (для выбора первого атакующего).
    pub fn lowest_of_suit(&self, suit: Suit) -> Option<Card> {
        self.cards
            .iter()
            .filter(|c| c.suit == suit)
            .min_by_key(|c| c.rank)
            .copied()
    }
}
