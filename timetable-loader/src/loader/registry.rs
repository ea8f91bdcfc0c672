//! Line registry.
//!
//! Legs are identified by a name derived from their source file and end
//! stops. The first leg with a given name creates the line and fixes its
//! route; every later leg with that name only adds a departure.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Departure, DomainError, Leg, ResolvedStop, TransitLine, VehicleClass};

use super::project::project_stops;

/// Compute the identity name of a line.
///
/// # Examples
///
/// ```
/// use timetable_loader::domain::{LinkId, NetworkStop, ResolvedStop, StopId, StopVisit, VisitTime};
/// use timetable_loader::loader::line_name;
///
/// let stop = |id: &str, name: &str| {
///     let id = StopId::parse(id).unwrap();
///     let time = VisitTime::parse_hhmmss("08:00:00").unwrap();
///     ResolvedStop::new(
///         StopVisit::new(id.clone(), time),
///         NetworkStop { id, name: name.to_string(), link: LinkId(1) },
///     )
/// };
///
/// let name = line_name("110", &stop("450010", "Kirkgate"), &stop("450020", "Outwood"));
/// assert_eq!(name, "110: Kirkgate [450010] to Outwood [450020]");
/// ```
pub fn line_name(source: &str, first: &ResolvedStop, last: &ResolvedStop) -> String {
    format!(
        "{}: {} [{}] to {} [{}]",
        source,
        first.name(),
        first.id(),
        last.name(),
        last.id()
    )
}

/// What adding a leg did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineUpdate {
    /// A new line was created for the leg.
    Created,
    /// The leg's departure joined an existing line.
    Extended,
}

/// Transit lines by name, in creation order.
#[derive(Debug, Default)]
pub struct LineRegistry {
    lines: Vec<TransitLine>,
    index: HashMap<String, usize>,
}

impl LineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a leg's departure, creating its line on first sight.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the leg serves fewer than two stops.
    pub fn add_leg(
        &mut self,
        source: &str,
        leg: &Leg,
        vehicle: VehicleClass,
    ) -> Result<LineUpdate, DomainError> {
        if !leg.is_addressable() {
            return Err(DomainError::InvalidLeg(
                "a line needs a leg serving at least two stops",
            ));
        }

        let name = line_name(source, leg.first_stop(), leg.last_stop());
        let (idx, update) = match self.index.get(&name) {
            Some(&idx) => (idx, LineUpdate::Extended),
            None => {
                let line = TransitLine::new(name.clone(), leg.route().to_vec(), project_stops(leg))?;
                debug!(line = %name, links = line.route().len(), "created line");
                self.lines.push(line);
                let idx = self.lines.len() - 1;
                self.index.insert(name, idx);
                (idx, LineUpdate::Created)
            }
        };

        self.lines[idx]
            .schedule_mut()
            .add_departure(Departure::new(leg.first_stop().time(), vehicle));

        Ok(update)
    }

    /// Returns all lines in creation order.
    pub fn lines(&self) -> &[TransitLine] {
        &self.lines
    }

    /// Returns all lines for modification.
    pub fn lines_mut(&mut self) -> impl Iterator<Item = &mut TransitLine> {
        self.lines.iter_mut()
    }

    /// Consumes the registry, returning its lines in creation order.
    pub fn into_lines(self) -> Vec<TransitLine> {
        self.lines
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no line has been created.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the total number of departures across all lines.
    pub fn departure_count(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.schedule().departures().len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinkId, NetworkStop, StopId, StopVisit, VisitTime};

    fn stop(id: &str, link: u64, time: &str) -> ResolvedStop {
        let stop_id = StopId::parse(id).unwrap();
        ResolvedStop::new(
            StopVisit::new(stop_id.clone(), VisitTime::parse_hhmmss(time).unwrap()),
            NetworkStop {
                id: stop_id,
                name: format!("{id} Road"),
                link: LinkId(link),
            },
        )
    }

    fn leg(stops: Vec<ResolvedStop>, route: &[u64]) -> Leg {
        Leg::new(route.iter().copied().map(LinkId).collect(), stops).unwrap()
    }

    fn bus() -> VehicleClass {
        VehicleClass("Bus".to_string())
    }

    fn departure_times(line: &TransitLine) -> Vec<String> {
        line.schedule()
            .departures()
            .iter()
            .map(|d| d.time.to_string())
            .collect()
    }

    #[test]
    fn first_leg_creates_line() {
        let mut registry = LineRegistry::new();
        let morning = leg(
            vec![stop("A", 1, "08:00:00"), stop("B", 3, "08:10:00")],
            &[1, 2, 3],
        );

        let update = registry.add_leg("110", &morning, bus()).unwrap();

        assert_eq!(update, LineUpdate::Created);
        assert_eq!(registry.len(), 1);
        let line = &registry.lines()[0];
        assert_eq!(line.name(), "110: A Road [A] to B Road [B]");
        assert_eq!(line.route(), &[LinkId(1), LinkId(2), LinkId(3)]);
        assert_eq!(line.stop_slots().len(), 3);
        assert!(line.stop_slots()[1].is_none());
        assert_eq!(departure_times(line), vec!["08:00:00"]);
    }

    #[test]
    fn same_name_adds_departure_only() {
        let mut registry = LineRegistry::new();
        let morning = leg(
            vec![stop("A", 1, "08:00:00"), stop("B", 3, "08:10:00")],
            &[1, 2, 3],
        );
        // Same end stops, different route in between
        let evening = leg(
            vec![stop("A", 1, "17:30:00"), stop("B", 3, "17:45:00")],
            &[1, 5, 3],
        );

        registry.add_leg("110", &morning, bus()).unwrap();
        let update = registry.add_leg("110", &evening, bus()).unwrap();

        assert_eq!(update, LineUpdate::Extended);
        assert_eq!(registry.len(), 1);
        let line = &registry.lines()[0];
        assert_eq!(line.route(), &[LinkId(1), LinkId(2), LinkId(3)]);
        assert_eq!(departure_times(line), vec!["08:00:00", "17:30:00"]);
        assert_eq!(registry.departure_count(), 2);
    }

    #[test]
    fn departures_follow_processing_order() {
        let mut registry = LineRegistry::new();
        for time in ["18:00:00", "07:00:00", "12:00:00"] {
            let l = leg(vec![stop("A", 1, time), stop("B", 2, "23:00:00")], &[1, 2]);
            registry.add_leg("110", &l, bus()).unwrap();
        }

        assert_eq!(
            departure_times(&registry.lines()[0]),
            vec!["18:00:00", "07:00:00", "12:00:00"]
        );
    }

    #[test]
    fn different_end_stops_make_distinct_lines() {
        let mut registry = LineRegistry::new();
        let full = leg(
            vec![stop("A", 1, "08:00:00"), stop("C", 4, "08:20:00")],
            &[1, 2, 3, 4],
        );
        let short = leg(
            vec![stop("A", 1, "09:00:00"), stop("B", 3, "09:10:00")],
            &[1, 2, 3],
        );

        registry.add_leg("110", &full, bus()).unwrap();
        registry.add_leg("110", &short, bus()).unwrap();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn different_sources_make_distinct_lines() {
        let mut registry = LineRegistry::new();
        let l = leg(
            vec![stop("A", 1, "08:00:00"), stop("B", 2, "08:10:00")],
            &[1, 2],
        );

        registry.add_leg("110", &l, bus()).unwrap();
        registry.add_leg("111", &l, bus()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lines()[1].name(), "111: A Road [A] to B Road [B]");
    }

    #[test]
    fn single_stop_leg_rejected() {
        let mut registry = LineRegistry::new();
        let l = leg(vec![stop("A", 1, "08:00:00")], &[]);

        assert!(matches!(
            registry.add_leg("110", &l, bus()),
            Err(DomainError::InvalidLeg(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn routeless_leg_creates_empty_line() {
        let mut registry = LineRegistry::new();
        let l = leg(
            vec![stop("B", 3, "08:05:00"), stop("C", 9, "08:10:00")],
            &[],
        );

        registry.add_leg("110", &l, bus()).unwrap();
        let line = &registry.lines()[0];
        assert!(line.route().is_empty());
        assert!(line.stop_slots().is_empty());
    }
}
