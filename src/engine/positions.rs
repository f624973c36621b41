use crate::domain::card::{Rank, Suit};
use crate::domain::player::{Player, TurnNumber};
use crate::domain::PlayerId;

// Все функции ждут `players`, отсортированных по turn_number.

/// Индекс игрока в порядке хода.
pub fn index_of(players: &[Player], player_id: PlayerId) -> Option<usize> {
    players.iter().position(|p| p.player_id == player_id)
}

/// Следующий игрок по кругу после `idx`.
pub fn next_index(players: &[Player], idx: usize) -> usize {
    (idx + 1) % players.len()
}

/// Первый оставшийся игрок с номером хода >= `turn_number` (по кругу).
pub fn first_at_or_after(players: &[Player], turn_number: TurnNumber) -> Option<usize> {
    if players.is_empty() {
        return None;
    }
    players
        .iter()
        .position(|p| p.turn_number >= turn_number)
        .or(Some(0))
}

/// Индексы всех игроков по кругу, начиная с `start`.
pub fn rotation_from(players: &[Player], start: usize) -> Vec<usize> {
    let n = players.len();
    (0..n).map(|i| (start + i) % n).collect()
}

/// Первый атакующий: у кого младший козырь; при равенстве первый по порядку хода.
/// Если козырей ни у кого нет: игрок с номером хода 1.
pub fn first_attacker(players: &[Player], trump: Suit) -> Option<usize> {
    let mut best: Option<(usize, Rank)> = None;

    for (idx, player) in players.iter().enumerate() {
        if let Some(card) = player.hand.lowest_of_suit(trump) {
            if best.map_or(true, |(_, rank)| card.rank < rank) {
                best = Some((idx, card.rank));
            }
        }
    }

    best.map(|(idx, _)| idx).or_else(|| first_at_or_after(players, 1))
}

/// Новая пара (атакующий, защищающийся) после хода.
///
/// Защитник взял, ходит следующий за ним; отбился, ходит он сам.
/// Чистая функция от (старый защитник, взял/не взял).
pub fn next_turn_pair(players: &[Player], old_defender: usize, turn_taken: bool) -> (usize, usize) {
    let attacker = if turn_taken {
        next_index(players, old_defender)
    } else {
        old_defender
    };
    (attacker, next_index(players, attacker))
}
