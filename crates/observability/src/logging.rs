//! Logging-Setup fuer Server und Client
//!
//! Das konfigurierte Level gilt fuer die eigenen `schnick_*`-Crates.
//! Alle fremden Crates (tokio, ...) bleiben auf `warn`, damit Debug-Ausgaben
//! einer Session nicht im Rauschen der Laufzeit untergehen.
//!
//! Umgebungsvariablen haben Vorrang vor der Konfigurationsdatei:
//! - `SCHNICK_LOG_LEVEL`: vollstaendige Filter-Direktive,
//!   z.B. `schnick_matchmaking=trace,warn`
//! - `SCHNICK_LOG_FORMAT`: `text` oder `json`

use std::error::Error;

use tracing_subscriber::{fmt, EnvFilter};

const ENV_LEVEL: &str = "SCHNICK_LOG_LEVEL";
const ENV_FORMAT: &str = "SCHNICK_LOG_FORMAT";

/// Crates, fuer die das konfigurierte Level gilt
const EIGENE_CRATES: &[&str] = &[
    "schnick_server",
    "schnick_client",
    "schnick_matchmaking",
    "schnick_protocol",
    "schnick_core",
];

/// Level fuer alle uebrigen Crates
const FREMD_LEVEL: &str = "warn";

/// Ausgabeformat der Log-Zeilen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Menschenlesbar, eine Zeile pro Event
    #[default]
    Text,
    /// Ein JSON-Objekt pro Event inkl. aktuellem Span (Session-ID)
    Json,
}

impl LogFormat {
    /// Liest das Format aus dem Konfigurationswert; nur Kleinschreibung
    pub fn aus_str(wert: &str) -> Option<Self> {
        match wert {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

/// Baut die Filter-Direktive: `level` fuer eigene Crates, `warn` fuer den Rest
pub fn filter_direktive(level: &str) -> String {
    let mut direktive = String::from(FREMD_LEVEL);
    for name in EIGENE_CRATES {
        direktive.push(',');
        direktive.push_str(name);
        direktive.push('=');
        direktive.push_str(level);
    }
    direktive
}

/// Ermittelt das wirksame Format; ein unbekannter Wert in der Umgebung wird ignoriert
fn wirksames_format(konfiguriert: LogFormat, aus_umgebung: Option<&str>) -> LogFormat {
    aus_umgebung
        .and_then(LogFormat::aus_str)
        .unwrap_or(konfiguriert)
}

/// Initialisiert den globalen Subscriber.
///
/// Schlaegt fehl, wenn bereits ein Subscriber gesetzt ist.
pub fn logging_initialisieren(
    level: &str,
    format: LogFormat,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_env(ENV_LEVEL) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_direktive(level))?,
    };
    let format = wirksames_format(format, std::env::var(ENV_FORMAT).ok().as_deref());

    match format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(false)
            .try_init(),
        LogFormat::Text => fmt().with_env_filter(filter).with_target(true).try_init(),
    }
}
