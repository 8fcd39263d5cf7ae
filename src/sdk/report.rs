use crate::sdk::routing::RouteResult;
use crate::sdk::selection::{Selection, Slot, TransportMode};
use crate::sdk::session::RouteStatus;
use std::fmt;

/// Whole hours and minutes, seconds truncated: `"1 h 1 min"`.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hrs = total / 3600;
    let mins = (total % 3600) / 60;
    match (hrs, mins) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

/// Metres shown as kilometres with two decimals.
pub fn format_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

pub fn mode_label(mode: &str) -> &str {
    match mode {
        "truck" => "Camión",
        "car" => "Automóvil",
        other => other,
    }
}

pub fn status_line(status: &RouteStatus, mode: TransportMode) -> String {
    match status {
        RouteStatus::SelectingOrigin | RouteStatus::SelectingDestination => {
            "Seleccione dos puntos…".to_string()
        }
        RouteStatus::Processing => "Procesando…".to_string(),
        RouteStatus::Ready => format!("Ruta ({}) lista", mode_label(mode.as_str())),
        RouteStatus::Unavailable(reason) => format!("Ruta no disponible: {reason}"),
    }
}

/// What the next click will pick, or `None` once both points are set.
pub fn instructions(selection: &Selection) -> Option<&'static str> {
    match selection.next_slot()? {
        Slot::Origin => Some("Click para origen."),
        Slot::Destination => Some("Click para destino."),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub mode: String,
    pub duration: String,
    pub distance: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteReport {
    pub status: String,
    pub instructions: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub total_duration: Option<String>,
    pub total_distance: Option<String>,
    pub rows: Vec<StatsRow>,
}

impl RouteReport {
    pub fn new(selection: &Selection, status: &RouteStatus, route: Option<&RouteResult>) -> Self {
        let rows = route
            .map(|r| {
                r.segments
                    .iter()
                    .map(|s| StatsRow {
                        mode: mode_label(&s.mode).to_string(),
                        duration: format_duration(s.duration_seconds),
                        distance: format_distance(s.length_meters),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            status: status_line(status, selection.mode()),
            instructions: instructions(selection).map(str::to_string),
            origin: selection.origin().map(|p| p.label()),
            destination: selection.destination().map(|p| p.label()),
            total_duration: route.map(|r| format_duration(r.total_duration_seconds)),
            total_distance: route.map(|r| format_distance(r.total_length_meters)),
            rows,
        }
    }
}

impl fmt::Display for RouteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status)?;
        if let Some(instructions) = &self.instructions {
            writeln!(f, "{instructions}")?;
        }
        if let Some(origin) = &self.origin {
            writeln!(f, "Origen: {origin}")?;
        }
        if let Some(destination) = &self.destination {
            writeln!(f, "Destino: {destination}")?;
        }
        if let (Some(duration), Some(distance)) = (&self.total_duration, &self.total_distance) {
            writeln!(f, "Duración total: {duration}")?;
            writeln!(f, "Distancia total: {distance}")?;
            writeln!(f, "{:<12} {:>12} {:>12}", "Modo", "Duración", "Distancia")?;
            for row in &self.rows {
                writeln!(f, "{:<12} {:>12} {:>12}", row.mode, row.duration, row.distance)?;
            }
        }
        Ok(())
    }
}
