//! Conversion from Darwin DTOs to a flat departure summary.

use std::fmt;

use super::types::{ServiceItem, StationBoardWithDetails};

/// One upcoming departure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub scheduled: Option<String>,
    pub expected: Option<String>,
    pub destination: String,
    pub platform: Option<String>,
    pub operator: Option<String>,
    pub is_cancelled: bool,
}

/// Renders as `10:00 Bristol Temple Meads (On time, plat 3, GWR)`, or
/// `(cancelled)` in place of the details.
impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.scheduled.as_deref().unwrap_or("--:--"),
            self.destination
        )?;
        if self.is_cancelled {
            return write!(f, " (cancelled)");
        }

        let details: Vec<String> = [
            self.expected.clone(),
            self.platform.as_ref().map(|p| format!("plat {p}")),
            self.operator.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !details.is_empty() {
            write!(f, " ({})", details.join(", "))?;
        }
        Ok(())
    }
}

/// A departure board reduced to what callers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureBoard {
    pub station_name: String,
    pub crs: String,
    pub departures: Vec<Departure>,
}

impl DepartureBoard {
    /// Merge boards fetched per destination filter, keeping the first
    /// board's station details and dropping repeated services.
    pub fn merge(boards: Vec<DepartureBoard>) -> Option<DepartureBoard> {
        let mut iter = boards.into_iter();
        let mut merged = iter.next()?;
        for board in iter {
            for dep in board.departures {
                if !merged.departures.contains(&dep) {
                    merged.departures.push(dep);
                }
            }
        }
        merged
            .departures
            .sort_by(|a, b| a.scheduled.cmp(&b.scheduled));
        Some(merged)
    }
}

/// Flatten a station board into departures, trains first then buses.
pub fn convert_station_board(board: &StationBoardWithDetails) -> DepartureBoard {
    let trains = board.train_services.as_deref().unwrap_or(&[]);
    let buses = board.bus_services.as_deref().unwrap_or(&[]);

    DepartureBoard {
        station_name: board.location_name.clone(),
        crs: board.crs.to_uppercase(),
        departures: trains.iter().chain(buses).map(convert_service).collect(),
    }
}

fn convert_service(item: &ServiceItem) -> Departure {
    let destination = item
        .destination
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|loc| match &loc.via {
            Some(via) => format!("{} {}", loc.location_name, via),
            None => loc.location_name.clone(),
        })
        .collect::<Vec<_>>()
        .join(" & ");

    let is_cancelled =
        item.is_cancelled.unwrap_or(false) || item.etd.as_deref() == Some("Cancelled");

    Departure {
        scheduled: item.std.clone(),
        expected: item.etd.clone(),
        destination,
        platform: item.platform.clone(),
        operator: item.operator.clone(),
        is_cancelled,
    }
}
