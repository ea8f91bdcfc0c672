//! Transit line and timetable types.
//!
//! A `TransitLine` is the persistent output of a run: a named route over the
//! network with the stops it serves and one timetable holding every
//! departure seen for it.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{DayDuration, DomainError, LinkId, NetworkStop, VisitTime};

/// A stop position along a line's route.
///
/// One slot exists per route link; `None` where no stop sits on that link.
pub type StopSlot = Option<NetworkStop>;

/// How departures within a schedule are specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureType {
    /// Departures at explicitly listed times.
    Fixed,
}

/// The class of vehicle operating a departure (e.g. "Bus").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VehicleClass(pub String);

/// A single scheduled departure from the start of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// When the vehicle leaves the first stop.
    pub time: VisitTime,
    /// The vehicle class operating it.
    pub vehicle: VehicleClass,
    /// Mean deviation from the departure time, in seconds.
    pub mean_deviation_secs: u32,
}

impl Departure {
    /// Creates an on-time departure.
    pub fn new(time: VisitTime, vehicle: VehicleClass) -> Self {
        Self {
            time,
            vehicle,
            mean_deviation_secs: 0,
        }
    }
}

/// Dwell statistics for one stop on a schedule, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DwellStat {
    pub mean: u32,
    pub deviation: u32,
}

impl DwellStat {
    /// Creates a dwell stat.
    pub fn new(mean: u32, deviation: u32) -> Self {
        Self { mean, deviation }
    }
}

/// A period of the day during which a line runs departures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    start: VisitTime,
    duration: DayDuration,
    departure_type: DepartureType,
    departures: Vec<Departure>,
    /// Keyed by stop slot index; absent entries read as zero.
    dwell: BTreeMap<usize, DwellStat>,
}

impl Schedule {
    /// A fixed-departure schedule spanning the whole day.
    pub fn full_day() -> Self {
        Self {
            start: VisitTime::MIDNIGHT,
            duration: DayDuration::FULL_DAY,
            departure_type: DepartureType::Fixed,
            departures: Vec::new(),
            dwell: BTreeMap::new(),
        }
    }

    /// Returns the schedule start time.
    pub fn start(&self) -> VisitTime {
        self.start
    }

    /// Returns how long the schedule is active.
    pub fn duration(&self) -> DayDuration {
        self.duration
    }

    /// Returns the departure type.
    pub fn departure_type(&self) -> DepartureType {
        self.departure_type
    }

    /// Returns departures in the order they were added.
    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    /// Appends a departure. Departures are never sorted or merged.
    pub fn add_departure(&mut self, departure: Departure) {
        self.departures.push(departure);
    }

    /// Returns the dwell stat for a stop slot, zero if never set.
    pub fn dwell_at(&self, slot: usize) -> DwellStat {
        self.dwell.get(&slot).copied().unwrap_or_default()
    }

    /// Sets the dwell stat for a stop slot.
    pub fn set_dwell(&mut self, slot: usize, stat: DwellStat) {
        self.dwell.insert(slot, stat);
    }
}

/// The timetable of a line: a name and its single schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    pub name: String,
    pub schedule: Schedule,
}

impl Timetable {
    /// Creates the full-day timetable for the named line.
    pub fn for_line(line_name: &str) -> Self {
        Self {
            name: format!("Timetable - {line_name}"),
            schedule: Schedule::full_day(),
        }
    }
}

/// A named, deduplicated transit line.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `stop_slots.len() == route.len()`
///
/// Route and stop alignment are fixed at construction; only the timetable
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitLine {
    name: String,
    route: Vec<LinkId>,
    stop_slots: Vec<StopSlot>,
    timetable: Timetable,
}

impl TransitLine {
    /// Construct a line with an empty full-day timetable.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the name is blank or the slots don't align with the
    /// route.
    pub fn new(
        name: String,
        route: Vec<LinkId>,
        stop_slots: Vec<StopSlot>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyLineName);
        }
        if route.len() != stop_slots.len() {
            return Err(DomainError::MisalignedStops {
                route: route.len(),
                slots: stop_slots.len(),
            });
        }

        let timetable = Timetable::for_line(&name);
        Ok(Self {
            name,
            route,
            stop_slots,
            timetable,
        })
    }

    /// Returns the line name, its identity key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the links the line runs over.
    pub fn route(&self) -> &[LinkId] {
        &self.route
    }

    /// Returns the stop served on each route link, if any.
    pub fn stop_slots(&self) -> &[StopSlot] {
        &self.stop_slots
    }

    /// Returns the indices of slots that hold a stop.
    pub fn served_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.stop_slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|_| idx))
    }

    /// Returns the line's timetable.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Returns the line's single schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.timetable.schedule
    }

    /// Returns the line's single schedule for modification.
    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.timetable.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopId;

    fn network_stop(id: &str, link: u64) -> NetworkStop {
        NetworkStop {
            id: StopId::parse(id).unwrap(),
            name: format!("Stop {id}"),
            link: LinkId(link),
        }
    }

    fn time(s: &str) -> VisitTime {
        VisitTime::parse_hhmmss(s).unwrap()
    }

    #[test]
    fn new_line_has_full_day_schedule() {
        let line = TransitLine::new(
            "route42: A [A] to B [B]".to_string(),
            vec![LinkId(1), LinkId(2)],
            vec![Some(network_stop("A", 1)), Some(network_stop("B", 2))],
        )
        .unwrap();

        assert_eq!(line.timetable().name, "Timetable - route42: A [A] to B [B]");
        let schedule = line.schedule();
        assert_eq!(schedule.start().to_string(), "00:00:00");
        assert_eq!(schedule.duration(), DayDuration::FULL_DAY);
        assert_eq!(schedule.departure_type(), DepartureType::Fixed);
        assert!(schedule.departures().is_empty());
    }

    #[test]
    fn misaligned_slots_rejected() {
        let result = TransitLine::new(
            "x".to_string(),
            vec![LinkId(1), LinkId(2)],
            vec![Some(network_stop("A", 1))],
        );
        assert!(matches!(
            result,
            Err(DomainError::MisalignedStops { route: 2, slots: 1 })
        ));
    }

    #[test]
    fn blank_name_rejected() {
        let result = TransitLine::new("  ".to_string(), vec![], vec![]);
        assert!(matches!(result, Err(DomainError::EmptyLineName)));
    }

    #[test]
    fn departures_keep_insertion_order() {
        let mut line = TransitLine::new("x".to_string(), vec![], vec![]).unwrap();
        let bus = VehicleClass("Bus".to_string());

        line.schedule_mut()
            .add_departure(Departure::new(time("17:00:00"), bus.clone()));
        line.schedule_mut()
            .add_departure(Departure::new(time("08:00:00"), bus.clone()));
        line.schedule_mut()
            .add_departure(Departure::new(time("08:00:00"), bus));

        let times: Vec<String> = line
            .schedule()
            .departures()
            .iter()
            .map(|d| d.time.to_string())
            .collect();
        assert_eq!(times, vec!["17:00:00", "08:00:00", "08:00:00"]);
        assert!(line.schedule().departures().iter().all(|d| d.mean_deviation_secs == 0));
    }

    #[test]
    fn served_slots_skip_empty_links() {
        let line = TransitLine::new(
            "x".to_string(),
            vec![LinkId(1), LinkId(2), LinkId(3)],
            vec![Some(network_stop("A", 1)), None, Some(network_stop("B", 3))],
        )
        .unwrap();

        assert_eq!(line.served_slots().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn dwell_defaults_to_zero() {
        let mut schedule = Schedule::full_day();
        assert_eq!(schedule.dwell_at(3), DwellStat::default());

        schedule.set_dwell(3, DwellStat::new(20, 10));
        assert_eq!(schedule.dwell_at(3), DwellStat::new(20, 10));
        assert_eq!(schedule.dwell_at(4), DwellStat::new(0, 0));
    }
}
