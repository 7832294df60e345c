//! Maps per-letter numeric states from the service onto tile statuses.

use serde_json::Value;
use tracing::instrument;

use crate::board::{TileStatus, WORD_LENGTH};
use crate::error::ServiceError;

/// Maps a single numeric state.
///
/// `2` is a hit, `1` is a misplaced letter, anything else (0, -1, null,
/// non-numbers) is a miss.
pub fn status_for(value: &Value) -> TileStatus {
    match value.as_f64() {
        Some(v) if v == 2.0 => TileStatus::Correct,
        Some(v) if v == 1.0 => TileStatus::Present,
        _ => TileStatus::Absent,
    }
}

/// Maps a full `state` array positionally.
///
/// The array must have exactly [`WORD_LENGTH`] entries.
#[instrument(level = "debug")]
pub fn map_states(states: &[Value]) -> Result<[TileStatus; WORD_LENGTH], ServiceError> {
    if states.len() != WORD_LENGTH {
        return Err(ServiceError::ContractViolation(format!(
            "expected {} letter states, got {}",
            WORD_LENGTH,
            states.len()
        )));
    }

    let mut statuses = [TileStatus::Absent; WORD_LENGTH];
    for (status, value) in statuses.iter_mut().zip(states) {
        *status = status_for(value);
    }
    Ok(statuses)
}
