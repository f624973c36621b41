use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::card::{Card, Suit};
use crate::domain::config::{SessionConfig, MIN_PLAYERS};
use crate::domain::deck::{Deck, DECK_SIZE};
use crate::domain::hand::{Hand, HAND_SIZE};
use crate::domain::player::{Player, TurnNumber};
use crate::domain::table::Table;
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::history::{GameEventKind, GameHistory};
use crate::engine::positions::{
    first_at_or_after, first_attacker, index_of, next_index, next_turn_pair, rotation_from,
};
use crate::engine::rules::{all_defended, validate_attack, validate_defense};
use crate::engine::{RandomSource, ResourceReleaser};

/// Состояние стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    /// Набор игроков.
    Setup,
    Playing,
    /// Терминальное состояние, выйти можно только через новый `setup`.
    Finished,
}

/// Итог игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    /// Проигравший. `None`: последние игроки вышли одновременно (ничья).
    pub durak: Option<PlayerId>,
    /// Вышедшие игроки в порядке выхода.
    pub winners: Vec<PlayerId>,
}

/// Статус сессии для внешнего кода.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Setup { players: usize },
    InProgress { attacker: PlayerId, defender: PlayerId },
    Finished(GameSummary),
}

/// Результат успешной операции: что произошло + куда пришла игра.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionOutcome {
    pub events: Vec<GameEventKind>,
    pub status: GameStatus,
}

/// Одна игра за одним столом.
///
/// Каждая операция сначала всё проверяет и только потом мутирует,
/// поэтому отказ оставляет сессию нетронутой.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub table_id: TableId,
    /// Растёт на каждом `setup`: новая логическая игра на том же столе.
    pub game_number: u64,
    pub config: SessionConfig,
    pub state: SessionState,
    /// Оставшиеся игроки, отсортированы по turn_number.
    pub players: Vec<Player>,
    pub deck: Deck,
    /// Открытая нижняя карта. Масть остаётся козырем и после того, как карту взяли.
    pub trump_card: Option<Card>,
    pub trump_taken: bool,
    pub table: Table,
    /// Отбой.
    pub discard: Vec<Card>,
    pub attacker: Option<PlayerId>,
    pub defender: Option<PlayerId>,
    pub finished_players: Vec<PlayerId>,
    pub durak: Option<PlayerId>,
    pub history: GameHistory,
}

impl Session {
    pub fn new(table_id: TableId, config: SessionConfig) -> Self {
        Self {
            table_id,
            game_number: 0,
            config,
            state: SessionState::Setup,
            players: Vec::new(),
            deck: Deck::default(),
            trump_card: None,
            trump_taken: false,
            table: Table::new(),
            discard: Vec::new(),
            attacker: None,
            defender: None,
            finished_players: Vec::new(),
            durak: None,
            history: GameHistory::new(),
        }
    }

    pub fn trump_suit(&self) -> Option<Suit> {
        self.trump_card.map(|c| c.suit)
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Рука игрока (для личного показа карт).
    pub fn hand(&self, player_id: PlayerId) -> Result<&Hand, EngineError> {
        self.player(player_id)
            .map(|p| &p.hand)
            .ok_or(EngineError::NotAPlayer(player_id))
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn status(&self) -> GameStatus {
        match (self.state, self.attacker, self.defender) {
            (SessionState::Playing, Some(attacker), Some(defender)) => {
                GameStatus::InProgress { attacker, defender }
            }
            (SessionState::Finished, _, _) => GameStatus::Finished(GameSummary {
                durak: self.durak,
                winners: self.finished_players.clone(),
            }),
            _ => GameStatus::Setup {
                players: self.players.len(),
            },
        }
    }

    /// Все карты в обороте: колода, руки, стол, отбой.
    /// После старта это всегда ровно 36 разных карт.
    pub fn card_census(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.cards.iter().copied().collect();
        for p in &self.players {
            cards.extend(p.hand.cards.iter().copied());
        }
        cards.extend(self.table.cards());
        cards.extend(self.discard.iter().copied());
        cards
    }

    // ---------------------------------------------------------------------
    // Набор игроков и старт
    // ---------------------------------------------------------------------

    /// Новая игра на этом столе: из любого состояния в `Setup`.
    pub fn setup(&mut self) -> ActionOutcome {
        let game_number = self.game_number + 1;
        *self = Session::new(self.table_id, self.config.clone());
        self.game_number = game_number;

        info!(table_id = self.table_id, game_number, "стол открыт для набора игроков");

        self.commit(vec![GameEventKind::SessionReset {
            table_id: self.table_id,
            game_number,
        }])
    }

    pub fn join(&mut self, player_id: PlayerId) -> Result<ActionOutcome, EngineError> {
        self.ensure_state(SessionState::Setup)?;

        if self.player(player_id).is_some() {
            return Err(EngineError::AlreadyJoined(player_id));
        }
        // Больше мест, чем влезает в начальную раздачу, не бывает даже при битом конфиге.
        if self.players.len() >= self.config.max_players.min(DECK_SIZE / HAND_SIZE) {
            return Err(EngineError::TableFull);
        }

        let turn_number = (self.players.len() + 1) as TurnNumber;
        self.players.push(Player::new(player_id, turn_number));

        debug!(table_id = self.table_id, player_id, turn_number, "игрок сел за стол");

        Ok(self.commit(vec![GameEventKind::PlayerJoined {
            player_id,
            turn_number,
        }]))
    }

    /// Старт: новая колода, перемешивание, раздача по 6 карт.
    pub fn start<R: RandomSource>(&mut self, rng: &mut R) -> Result<ActionOutcome, EngineError> {
        self.ensure_can_start()?;

        let mut deck = Deck::standard_36();
        rng.shuffle(deck.as_mut_slice());

        self.deal(deck)
    }

    /// Старт с заранее разложенной колодой (реплей, тесты, турнирные расклады).
    pub fn start_with_deck(&mut self, deck: Deck) -> Result<ActionOutcome, EngineError> {
        self.ensure_can_start()?;

        if !deck.is_complete() {
            return Err(EngineError::InvalidDeck);
        }

        self.deal(deck)
    }

    fn ensure_can_start(&self) -> Result<(), EngineError> {
        self.ensure_state(SessionState::Setup)?;
        if self.players.len() < MIN_PLAYERS {
            return Err(EngineError::NotEnoughPlayers);
        }
        if self.players.len() * HAND_SIZE > DECK_SIZE {
            return Err(EngineError::TableFull);
        }
        Ok(())
    }

    fn deal(&mut self, deck: Deck) -> Result<ActionOutcome, EngineError> {
        let trump_card = *deck.bottom().ok_or(EngineError::InvalidDeck)?;

        self.deck = deck;
        self.trump_card = Some(trump_card);
        self.trump_taken = false;

        let mut events = vec![GameEventKind::GameStarted {
            trump_card,
            players: self.players.iter().map(|p| p.player_id).collect(),
        }];

        // Каждому игроку по 6 карт подряд, в порядке номеров хода.
        for idx in 0..self.players.len() {
            let cards = (0..HAND_SIZE)
                .map(|_| self.deck.draw())
                .collect::<Result<Vec<Card>, _>>()?;
            self.give_cards(idx, cards, &mut events);
        }

        let attacker_idx =
            first_attacker(&self.players, trump_card.suit).ok_or(EngineError::NotEnoughPlayers)?;
        let defender_idx = next_index(&self.players, attacker_idx);
        self.set_turn(attacker_idx, defender_idx, &mut events);
        self.state = SessionState::Playing;

        info!(
            table_id = self.table_id,
            game_number = self.game_number,
            players = self.players.len(),
            trump = %trump_card,
            "игра началась"
        );

        Ok(self.commit(events))
    }

    // ---------------------------------------------------------------------
    // Ходы
    // ---------------------------------------------------------------------

    /// Единая точка входа для хоста: разбирает действие и логирует отказ.
    pub fn apply<E: ResourceReleaser>(
        &mut self,
        action: &PlayerAction,
        releaser: &mut E,
    ) -> Result<ActionOutcome, EngineError> {
        let player_id = action.player_id;
        let result = match &action.kind {
            PlayerActionKind::Attack(tokens) => self.attack(player_id, tokens),
            PlayerActionKind::Defend(tokens) => self.defend(player_id, tokens),
            PlayerActionKind::Take => self.take(player_id, releaser),
            PlayerActionKind::GiveUp => self.give_up(player_id, releaser),
        };

        if let Err(err) = &result {
            debug!(table_id = self.table_id, player_id, error = %err, "ход отклонён");
        }

        result
    }

    /// Пойти или подкинуть карты одного ранга.
    pub fn attack<S: AsRef<str>>(
        &mut self,
        player_id: PlayerId,
        tokens: &[S],
    ) -> Result<ActionOutcome, EngineError> {
        self.ensure_state(SessionState::Playing)?;
        let idx = self.turn_guard(self.attacker, player_id)?;

        let cards = parse_tokens(tokens)?;
        if !self.players[idx].hand.contains_all(&cards) {
            return Err(EngineError::CardsNotInHand);
        }
        validate_attack(&self.table, &cards)?;

        self.players[idx].hand.remove_cards(&cards);
        for &card in &cards {
            self.table.push_attack(card);
        }

        debug!(table_id = self.table_id, player_id, cards = ?cards, "атака");

        Ok(self.commit(vec![GameEventKind::Attacked { player_id, cards }]))
    }

    /// Отбить все неотбитые карты сразу: i-я карта бьёт i-ю неотбитую пару.
    pub fn defend<S: AsRef<str>>(
        &mut self,
        player_id: PlayerId,
        tokens: &[S],
    ) -> Result<ActionOutcome, EngineError> {
        self.ensure_state(SessionState::Playing)?;
        let idx = self.turn_guard(self.defender, player_id)?;

        if self.table.is_empty() {
            return Err(EngineError::NothingToDefend);
        }
        if all_defended(&self.table) {
            return Err(EngineError::AlreadyFullyDefended);
        }

        let cards = parse_tokens(tokens)?;
        if !self.players[idx].hand.contains_all(&cards) {
            return Err(EngineError::CardsNotInHand);
        }
        let trump = self.trump_suit().ok_or(EngineError::WrongState)?;
        validate_defense(&self.table, &cards, trump)?;

        let mut defended = Vec::with_capacity(cards.len());
        for (pair_idx, &card) in self.table.undefended_indices().into_iter().zip(&cards) {
            let pair = &mut self.table.pairs[pair_idx];
            pair.defense = Some(card);
            defended.push(*pair);
        }
        self.players[idx].hand.remove_cards(&cards);

        debug!(table_id = self.table_id, player_id, cards = ?cards, "защита");

        Ok(self.commit(vec![GameEventKind::Defended {
            player_id,
            pairs: defended,
        }]))
    }

    /// Защитник забирает всё со стола.
    pub fn take<E: ResourceReleaser>(
        &mut self,
        player_id: PlayerId,
        releaser: &mut E,
    ) -> Result<ActionOutcome, EngineError> {
        self.ensure_state(SessionState::Playing)?;
        let idx = self.turn_guard(self.defender, player_id)?;

        if self.table.is_empty() {
            return Err(EngineError::NothingToTake);
        }
        if all_defended(&self.table) {
            return Err(EngineError::AlreadyFullyDefended);
        }

        let cards = self.table.take_all();
        self.players[idx].hand.extend(cards.iter().copied());

        debug!(table_id = self.table_id, player_id, taken = cards.len(), "защитник взял");

        let mut events = vec![GameEventKind::CardsTaken { player_id, cards }];
        self.end_turn(true, releaser, &mut events)?;

        Ok(self.commit(events))
    }

    /// «Бито»: атакующий заканчивает ход, все карты отбиты.
    pub fn give_up<E: ResourceReleaser>(
        &mut self,
        player_id: PlayerId,
        releaser: &mut E,
    ) -> Result<ActionOutcome, EngineError> {
        self.ensure_state(SessionState::Playing)?;
        self.turn_guard(self.attacker, player_id)?;

        if self.table.is_empty() {
            return Err(EngineError::NothingToGiveUp);
        }
        if !all_defended(&self.table) {
            return Err(EngineError::AttackNotFullyDefended);
        }

        let discarded = self.table.take_all();
        self.discard.extend(discarded.iter().copied());

        debug!(table_id = self.table_id, player_id, discarded = discarded.len(), "бито");

        let mut events = vec![GameEventKind::AttackGivenUp {
            player_id,
            discarded,
        }];
        self.end_turn(false, releaser, &mut events)?;

        Ok(self.commit(events))
    }

    // ---------------------------------------------------------------------
    // Конец хода: смена ролей, добор, выбывание, проверка конца игры
    // ---------------------------------------------------------------------

    fn end_turn<E: ResourceReleaser>(
        &mut self,
        turn_taken: bool,
        releaser: &mut E,
        events: &mut Vec<GameEventKind>,
    ) -> Result<(), EngineError> {
        let old_defender = self
            .defender
            .and_then(|id| index_of(&self.players, id))
            .ok_or(EngineError::WrongState)?;

        let (attacker_idx, _) = next_turn_pair(&self.players, old_defender, turn_taken);
        let attacker_turn = self.players[attacker_idx].turn_number;

        self.table.pairs.clear();
        self.refill(attacker_idx, events)?;
        self.eliminate_empty_hands(releaser, events);

        if self.players.len() <= 1 {
            self.finish(events);
            return Ok(());
        }

        // Новый атакующий мог выйти при доборе, тогда ходит следующий за ним.
        let attacker_idx =
            first_at_or_after(&self.players, attacker_turn).ok_or(EngineError::WrongState)?;
        let defender_idx = next_index(&self.players, attacker_idx);
        self.set_turn(attacker_idx, defender_idx, events);

        Ok(())
    }

    /// Добор до 6 карт, начиная с нового атакующего и дальше по кругу.
    /// Пустую руку не пополняем: игрок выходит.
    fn refill(&mut self, start: usize, events: &mut Vec<GameEventKind>) -> Result<(), EngineError> {
        for idx in rotation_from(&self.players, start) {
            if self.deck.is_empty() {
                break;
            }

            let hand = &self.players[idx].hand;
            if hand.is_empty() {
                continue;
            }

            let wanted = hand.missing().min(self.deck.len());
            let drawn = (0..wanted)
                .map(|_| self.deck.draw())
                .collect::<Result<Vec<Card>, _>>()?;

            if !drawn.is_empty() {
                self.give_cards(idx, drawn, events);
            }
        }
        Ok(())
    }

    fn eliminate_empty_hands<E: ResourceReleaser>(
        &mut self,
        releaser: &mut E,
        events: &mut Vec<GameEventKind>,
    ) {
        let (out, remaining): (Vec<Player>, Vec<Player>) = std::mem::take(&mut self.players)
            .into_iter()
            .partition(|p| p.hand.is_empty());
        self.players = remaining;

        for player in out {
            self.finished_players.push(player.player_id);
            let place = self.finished_players.len();
            releaser.release(self.table_id, player.player_id);

            info!(
                table_id = self.table_id,
                player_id = player.player_id,
                place,
                "игрок вышел из игры"
            );

            events.push(GameEventKind::PlayerFinished {
                player_id: player.player_id,
                place,
            });
        }
    }

    fn finish(&mut self, events: &mut Vec<GameEventKind>) {
        self.state = SessionState::Finished;
        self.durak = self.players.first().map(|p| p.player_id);
        self.attacker = None;
        self.defender = None;

        info!(
            table_id = self.table_id,
            game_number = self.game_number,
            durak = ?self.durak,
            "игра окончена"
        );

        events.push(GameEventKind::GameFinished {
            durak: self.durak,
            winners: self.finished_players.clone(),
        });
    }

    // ---------------------------------------------------------------------
    // Вспомогательное
    // ---------------------------------------------------------------------

    fn ensure_state(&self, expected: SessionState) -> Result<(), EngineError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EngineError::WrongState)
        }
    }

    /// Проверка, что ходит именно этот игрок; возвращает его индекс.
    fn turn_guard(&self, expected: Option<PlayerId>, player_id: PlayerId) -> Result<usize, EngineError> {
        if expected != Some(player_id) {
            return Err(EngineError::NotYourTurn(player_id));
        }
        index_of(&self.players, player_id).ok_or(EngineError::NotYourTurn(player_id))
    }

    fn give_cards(&mut self, idx: usize, cards: Vec<Card>, events: &mut Vec<GameEventKind>) {
        let player_id = self.players[idx].player_id;

        if let Some(trump_card) = self.trump_card {
            if !self.trump_taken && cards.contains(&trump_card) {
                self.trump_taken = true;
                events.push(GameEventKind::TrumpCardDrawn {
                    player_id,
                    trump_suit: trump_card.suit,
                });
            }
        }

        self.players[idx].hand.extend(cards.iter().copied());
        events.push(GameEventKind::CardsDealt { player_id, cards });
    }

    fn set_turn(&mut self, attacker_idx: usize, defender_idx: usize, events: &mut Vec<GameEventKind>) {
        let attacker = self.players[attacker_idx].player_id;
        let defender = self.players[defender_idx].player_id;
        self.attacker = Some(attacker);
        self.defender = Some(defender);

        debug!(table_id = self.table_id, attacker, defender, "новый ход");

        events.push(GameEventKind::TurnPassed { attacker, defender });
    }

    /// Записать события в историю и собрать ответ.
    fn commit(&mut self, events: Vec<GameEventKind>) -> ActionOutcome {
        self.history.extend(events.iter().cloned());
        ActionOutcome {
            events,
            status: self.status(),
        }
    }
}

fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Card>, EngineError> {
    if tokens.is_empty() {
        return Err(EngineError::NoCardsGiven);
    }
    tokens
        .iter()
        .map(|t| t.as_ref().parse::<Card>().map_err(EngineError::from))
        .collect()
}
