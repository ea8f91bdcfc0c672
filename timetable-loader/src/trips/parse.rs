//! Parsing of trip-file tokens.
//!
//! Each token has the form `StopId(HH:MM:SS)`. The stop id is whatever is
//! left once every parenthetical is removed; the time is the content of the
//! first parenthetical. Times are kept as text until a visit is matched to
//! the network, so a bad time on a stop outside the model is harmless.

use crate::domain::{StopId, StopVisit, VisitTime};

use super::TripError;

/// A token read from a trip file, with its time not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVisit {
    stop: StopId,
    time: String,
    token: String,
}

impl RawVisit {
    /// The stop id written in the token.
    pub fn stop(&self) -> &StopId {
        &self.stop
    }

    /// The time text exactly as written in the token.
    pub fn time_text(&self) -> &str {
        &self.time
    }

    /// Validate the time, producing a stop visit.
    ///
    /// # Errors
    ///
    /// Returns `TripError::InvalidTime` if the time is not `HH:MM:SS`.
    pub fn to_visit(&self) -> Result<StopVisit, TripError> {
        let time = VisitTime::parse_hhmmss(&self.time).map_err(|source| {
            TripError::InvalidTime {
                token: self.token.clone(),
                source,
            }
        })?;
        Ok(StopVisit::new(self.stop.clone(), time))
    }
}

/// One vehicle's run through a sequence of stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    visits: Vec<RawVisit>,
}

impl Trip {
    /// Creates a trip from visits in visit order.
    pub fn new(visits: Vec<RawVisit>) -> Self {
        Self { visits }
    }

    /// Returns the stop visits in order.
    pub fn visits(&self) -> &[RawVisit] {
        &self.visits
    }

    /// Returns the time text of the first visit, if there is one.
    pub fn start_time(&self) -> Option<&str> {
        self.visits.first().map(RawVisit::time_text)
    }
}

/// Parse a single `StopId(HH:MM:SS)` token.
///
/// Only the presence of a parenthetical is checked here; the time itself
/// is validated by [`RawVisit::to_visit`].
///
/// # Examples
///
/// ```
/// use timetable_loader::trips::parse_visit;
///
/// let visit = parse_visit("450030204(08:05:00)").unwrap();
/// assert_eq!(visit.stop().as_str(), "450030204");
/// assert_eq!(visit.to_visit().unwrap().time.to_string(), "08:05:00");
///
/// assert!(parse_visit("450030204").is_err());
/// assert!(parse_visit("450030204(late)").unwrap().to_visit().is_err());
/// ```
pub fn parse_visit(token: &str) -> Result<RawVisit, TripError> {
    let time = first_parenthetical(token).ok_or_else(|| TripError::MissingTime {
        token: token.to_string(),
    })?;
    let stop = StopId::parse(&strip_parentheticals(token))?;

    Ok(RawVisit {
        stop,
        time: time.to_string(),
        token: token.to_string(),
    })
}

/// Parse every token of a row into a trip.
pub fn parse_row<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Trip, TripError> {
    let visits = tokens
        .into_iter()
        .map(parse_visit)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Trip::new(visits))
}

/// Content of the first complete `(...)` group.
fn first_parenthetical(token: &str) -> Option<&str> {
    let open = token.find('(')?;
    let rest = &token[open + 1..];
    let close = rest.find(')')?;
    Some(&rest[..close])
}

/// The token with every complete `(...)` group removed.
fn strip_parentheticals(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut rest = token;

    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
