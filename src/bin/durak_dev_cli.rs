// src/bin/durak_dev_cli.rs
//
// Интерактивный dev-CLI: один стол, команды со stdin, как их прислал бы чат-хост.
//
//   cargo run --bin durak_dev_cli [seed]
//
// Команды:
//   setup | join <id> | start | show [id]
//   attack <id> <карты…> | defend <id> <карты…> | take <id> | giveup <id>
//   auto   – сделать ход за того, чья очередь
//   quit

use std::io::{self, BufRead, Write};

use durak_engine::api::{
    handle_command, handle_query, ApiError, Command, CommandResponse, PlayerActionCommand, Query,
    QueryResponse, SessionViewDto, TrumpViewDto,
};
use durak_engine::domain::{PlayerId, TableId};
use durak_engine::engine::autoplay::suggest_action;
use durak_engine::engine::{GameStatus, TableManager};
use durak_engine::infra::{logging, DeterministicRng};
use tracing::info;

const TABLE_ID: TableId = 1;

fn main() {
    logging::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    info!(seed, "durak_dev_cli: старт");

    let manager = TableManager::new();
    let mut rng = DeterministicRng::from_seed(seed);
    let mut releaser = |table_id: TableId, player_id: PlayerId| {
        println!("[CLI] стол {table_id}: игрок {player_id} вышел, ресурсы освобождены");
    };

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let words: Vec<&str> = line.split_whitespace().collect();

        let command = match words.as_slice() {
            [] => {
                prompt();
                continue;
            }
            ["quit"] | ["exit"] => break,
            ["show"] => {
                show(&manager, None);
                prompt();
                continue;
            }
            ["show", id] => {
                show(&manager, id.parse().ok());
                prompt();
                continue;
            }
            ["auto"] => {
                let suggestion = manager
                    .with_session(TABLE_ID, |s| suggest_action(s))
                    .ok()
                    .flatten();
                match suggestion {
                    Some(action) => {
                        println!("[CLI] бот: {:?}", action);
                        Command::Action(PlayerActionCommand {
                            table_id: TABLE_ID,
                            action,
                        })
                    }
                    None => {
                        println!("[CLI] сейчас ходить некому");
                        prompt();
                        continue;
                    }
                }
            }
            ["setup"] => Command::Setup { table_id: TABLE_ID },
            ["start"] => Command::Start { table_id: TABLE_ID },
            ["join", id] => match id.parse() {
                Ok(player_id) => Command::Join {
                    table_id: TABLE_ID,
                    player_id,
                },
                Err(_) => {
                    println!("[CLI] id игрока должен быть числом");
                    prompt();
                    continue;
                }
            },
            [verb, id, rest @ ..] => {
                let Ok(player_id) = id.parse::<PlayerId>() else {
                    println!("[CLI] id игрока должен быть числом");
                    prompt();
                    continue;
                };
                match *verb {
                    "attack" => Command::attack(TABLE_ID, player_id, rest),
                    "defend" => Command::defend(TABLE_ID, player_id, rest),
                    "take" => Command::take(TABLE_ID, player_id),
                    "giveup" => Command::give_up(TABLE_ID, player_id),
                    _ => {
                        println!("[CLI] неизвестная команда `{verb}`");
                        prompt();
                        continue;
                    }
                }
            }
            [verb] => {
                println!("[CLI] неизвестная команда `{verb}`");
                prompt();
                continue;
            }
        };

        match handle_command(&manager, command, &mut rng, &mut releaser) {
            Ok(response) => print_response(&response),
            Err(err) => print_error(&err),
        }
        prompt();
    }

    info!("durak_dev_cli: завершение");
}

fn prompt() {
    print!("> ");
    io::stdout().flush().ok();
}

fn print_response(response: &CommandResponse) {
    match response {
        CommandResponse::Applied { events, status } => {
            for event in events {
                println!("  {:?}", event);
            }
            match status {
                GameStatus::Setup { players } => println!("[CLI] набор игроков: {players}"),
                GameStatus::InProgress { attacker, defender } => {
                    println!("[CLI] ходит {attacker}, отбивается {defender}")
                }
                GameStatus::Finished(summary) => match summary.durak {
                    Some(durak) => println!("[CLI] игра окончена, дурак: {durak}"),
                    None => println!("[CLI] игра окончена вничью"),
                },
            }
        }
        CommandResponse::TableRemoved { table_id, existed } => {
            println!("[CLI] стол {table_id} удалён: {existed}")
        }
    }
}

fn print_error(err: &ApiError) {
    println!("[CLI] отказ: {err}");
}

fn show(manager: &TableManager, viewer: Option<PlayerId>) {
    match handle_query(
        manager,
        Query::GetSession {
            table_id: TABLE_ID,
            viewer,
        },
    ) {
        Ok(QueryResponse::Session(view)) => print_view(&view),
        Ok(other) => println!("[CLI] неожиданный ответ: {:?}", other),
        Err(err) => print_error(&err),
    }
}

fn print_view(view: &SessionViewDto) {
    println!(
        "--- стол {} | игра #{} | {:?} ---",
        view.table_id, view.game_number, view.state
    );
    match &view.trump {
        Some(TrumpViewDto::Card(card)) => println!("Козырь: {card} (колода: {})", view.deck_size),
        Some(TrumpViewDto::Suit(suit)) => println!("Козырь: {suit} (колода: {})", view.deck_size),
        None => {}
    }
    if !view.table.is_empty() {
        println!("Стол: {}", view.table.join("  "));
    }
    for p in &view.players {
        let role = if p.is_attacker {
            " [атакует]"
        } else if p.is_defender {
            " [защищается]"
        } else {
            ""
        };
        let hand = p
            .hand
            .as_ref()
            .map(|cards| {
                let tokens: Vec<String> = cards.iter().map(ToString::to_string).collect();
                format!(": {}", tokens.join(" "))
            })
            .unwrap_or_default();
        println!(
            "  #{} игрок {} – {} карт{}{}",
            p.turn_number, p.player_id, p.card_count, role, hand
        );
    }
    if !view.finished_players.is_empty() {
        println!("Вышли: {:?}", view.finished_players);
    }
}
