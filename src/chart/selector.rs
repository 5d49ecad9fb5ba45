use crate::chart::model::{DeviceSelection, Series};
use crate::chart::store::ChartState;

/// Series to render, in fetch order.
///
/// With an explicit device selection every fetched series is shown; otherwise
/// only series whose toggle is on. A series without a toggle entry counts as on.
#[must_use]
pub fn visible_series(state: &ChartState) -> Vec<&Series> {
    match state.selection() {
        DeviceSelection::ExplicitSet(_) => state.series().iter().collect(),
        DeviceSelection::AllWithToggle => state
            .series()
            .iter()
            .enumerate()
            .filter(|(i, _)| state.toggles().get(*i).copied().unwrap_or(true))
            .map(|(_, s)| s)
            .collect(),
    }
}
