//! Диспетчер: команда/запрос -> TableManager -> ответ для клиента.

use tracing::warn;

use crate::engine::{ActionOutcome, RandomSource, ResourceReleaser, TableManager};

use super::commands::Command;
use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::{build_session_view, Query, QueryResponse};

/// Выполнить команду. Отказ правил не меняет состояние стола.
pub fn handle_command<R: RandomSource, E: ResourceReleaser>(
    manager: &TableManager,
    command: Command,
    rng: &mut R,
    releaser: &mut E,
) -> Result<CommandResponse, ApiError> {
    let result = match command {
        Command::Setup { table_id } => Ok(manager.setup(table_id)),
        Command::Join {
            table_id,
            player_id,
        } => manager.join(table_id, player_id),
        Command::Start { table_id } => manager.start(table_id, rng),
        Command::Action(cmd) => manager.apply_action(cmd.table_id, &cmd.action, releaser),
        Command::RemoveTable { table_id } => {
            let existed = manager.remove_table(table_id);
            return Ok(CommandResponse::TableRemoved { table_id, existed });
        }
    };

    let outcome: ActionOutcome = result.map_err(ApiError::from).inspect_err(log_if_internal)?;

    Ok(CommandResponse::Applied {
        events: outcome.events,
        status: outcome.status,
    })
}

/// Выполнить запрос на чтение.
pub fn handle_query(manager: &TableManager, query: Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetSession { table_id, viewer } => manager
            .with_session(table_id, |s| QueryResponse::Session(build_session_view(s, viewer)))
            .map_err(ApiError::from),
        Query::GetHand {
            table_id,
            player_id,
        } => manager
            .with_session(table_id, |s| s.hand(player_id).map(|h| h.cards.clone()))?
            .map(QueryResponse::Hand)
            .map_err(ApiError::from),
        Query::GetHistory { table_id } => manager
            .with_session(table_id, |s| QueryResponse::History(s.history.events.clone()))
            .map_err(ApiError::from),
        Query::ListTables => Ok(QueryResponse::Tables(manager.table_ids())),
    }
}

fn log_if_internal(err: &ApiError) {
    if let ApiError::Internal(msg) = err {
        warn!(error = %msg, "внутренняя ошибка движка");
    }
}
