//! Dwell time normalization.

use crate::domain::{DwellStat, TransitLine};

/// Fill in unset dwell statistics on every served stop of every line.
///
/// A zero mean becomes `defaults.mean` and a zero deviation becomes
/// `defaults.deviation`; non-zero values are left alone. Returns the number
/// of stop slots visited.
pub fn normalize_dwell_times<'a>(
    lines: impl IntoIterator<Item = &'a mut TransitLine>,
    defaults: DwellStat,
) -> usize {
    let mut visited = 0;

    for line in lines {
        let slots: Vec<usize> = line.served_slots().collect();
        let schedule = line.schedule_mut();

        for slot in slots {
            let mut stat = schedule.dwell_at(slot);
            if stat.mean == 0 {
                stat.mean = defaults.mean;
            }
            if stat.deviation == 0 {
                stat.deviation = defaults.deviation;
            }
            schedule.set_dwell(slot, stat);
            visited += 1;
        }
    }

    visited
}
