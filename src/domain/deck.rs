use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Размер колоды для «Дурака».
pub const DECK_SIZE: usize = 36;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("колода пуста")]
pub struct EmptyDeck;

/// Колода карт. Берём спереди, козырь лежит последней картой.
/// Перемешивание делает engine (через RNG из infra), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Deck {
    pub cards: VecDeque<Card>,
}

impl Deck {
    /// Стандартная 36-карточная колода в порядке:
    /// Hearts 6..A, Diamonds 6..A, Clubs 6..A, Spades 6..A.
    pub fn standard_36() -> Self {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push_back(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Deck {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw(&mut self) -> Result<Card, EmptyDeck> {
        self.cards.pop_front().ok_or(EmptyDeck)
    }

    /// Нижняя (последняя) карта: она определяет козырь.
    pub fn bottom(&self) -> Option<&Card> {
        self.cards.back()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Это перестановка полного набора из 36 карт (без дублей и потерь)?
    pub fn is_complete(&self) -> bool {
        if self.cards.len() != DECK_SIZE {
            return false;
        }
        let mut sorted: Vec<Card> = self.cards.iter().copied().collect();
        sorted.sort_unstable();
        sorted.dedup();
        sorted.len() == DECK_SIZE
    }

    /// Слайс для перемешивания через `RandomSource`.
    pub fn as_mut_slice(&mut self) -> &mut [Card] {
        self.cards.make_contiguous()
    }
}
