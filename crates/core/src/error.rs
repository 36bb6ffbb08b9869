//! Fehlertypen fuer Schnick
//!
//! Zentraler Fehler-Enum fuer Verbindungs-, Session- und Konfigurationsfehler.
//! Ungueltige Spielzuege sind KEIN Fehler, sondern `Move::Invalid`.

use thiserror::Error;

/// Globaler Result-Alias fuer Schnick
pub type Result<T> = std::result::Result<T, SchnickError>;

/// Alle moeglichen Fehler im Schnick-System
#[derive(Debug, Error)]
pub enum SchnickError {
    // --- Verbindung & Netzwerk ---
    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zeitlimit ueberschritten: {0}")]
    Zeitlimit(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),
}

impl SchnickError {
    /// Erstellt einen Konfigurationsfehler
    pub fn konfiguration(msg: impl Into<String>) -> Self {
        Self::Konfiguration(msg.into())
    }

    /// Gibt true zurueck wenn der Fehler nur die betroffene Verbindung
    /// betrifft (Session-Scope) und nicht den ganzen Prozess
    pub fn ist_verbindungsfehler(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Zeitlimit(_))
    }
}
