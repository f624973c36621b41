use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::table::TablePair;
use crate::domain::{PlayerId, TableId};
use crate::engine::{GameEvent, Session};

use super::dto::{PlayerViewDto, SessionViewDto, TrumpViewDto};

/// Запросы «только чтение».
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Состояние стола глазами игрока (`viewer`) или наблюдателя (`None`).
    GetSession {
        table_id: TableId,
        viewer: Option<PlayerId>,
    },

    /// Карты на руке игрока (личное сообщение).
    GetHand {
        table_id: TableId,
        player_id: PlayerId,
    },

    /// История текущей игры.
    GetHistory { table_id: TableId },

    /// Список столов.
    ListTables,
}

/// Результат запроса «только чтение».
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Session(SessionViewDto),
    Hand(Vec<Card>),
    History(Vec<GameEvent>),
    Tables(Vec<TableId>),
}

/// `"7♠<-8♠"` для отбитой пары, `"7♠"` для неотбитой.
pub fn render_pair(pair: &TablePair) -> String {
    match pair.defense {
        Some(defense) => format!("{}<-{}", pair.attack, defense),
        None => pair.attack.to_string(),
    }
}

/// Сформировать DTO стола. Руку видит только её владелец.
pub fn build_session_view(session: &Session, viewer: Option<PlayerId>) -> SessionViewDto {
    let trump = session.trump_card.map(|card| {
        if session.trump_taken {
            TrumpViewDto::Suit(card.suit)
        } else {
            TrumpViewDto::Card(card)
        }
    });

    let players = session
        .players
        .iter()
        .map(|p| PlayerViewDto {
            player_id: p.player_id,
            turn_number: p.turn_number,
            card_count: p.card_count(),
            is_attacker: session.attacker == Some(p.player_id),
            is_defender: session.defender == Some(p.player_id),
            hand: (viewer == Some(p.player_id)).then(|| p.hand.cards.clone()),
        })
        .collect();

    SessionViewDto {
        table_id: session.table_id,
        game_number: session.game_number,
        state: session.state,
        trump,
        deck_size: session.deck.len(),
        discard_size: session.discard.len(),
        table: session.table.pairs.iter().map(render_pair).collect(),
        attacker: session.attacker,
        defender: session.defender,
        players,
        finished_players: session.finished_players.clone(),
        durak: session.durak,
    }
}
