use crate::rows::intent::{Intent, TaggedIntent};
use crate::rows::reducer::Reducer;
use crate::rows::state::CollectionState;
use anyhow::{Context, Result};

/// Feeds a scripted intent stream through the reducer, stopping at the first
/// intent that is unknown or rejected.
pub fn replay(
    initial: CollectionState,
    reducer: &Reducer,
    intents: Vec<TaggedIntent>,
) -> Result<CollectionState> {
    let mut state = initial;

    for (position, raw) in intents.into_iter().enumerate() {
        let step = position + 1;
        let intent = Intent::try_from(raw).with_context(|| format!("Intent #{} is invalid", step))?;
        tracing::debug!(step, intent = intent.tag(), "replaying intent");

        state = reducer
            .apply(&state, intent)
            .with_context(|| format!("Intent #{} was rejected", step))?;
    }

    Ok(state)
}

pub fn format_state(state: &CollectionState) -> String {
    let mut lines: Vec<String> = state
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| format!("{}\t{}\t{}", index, record.id, record.name))
        .collect();
    lines.push(format!(
        "undo: {}",
        if state.can_undo() { "available" } else { "unavailable" }
    ));
    lines.join("\n")
}
