//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use std::time::Duration;

use schnick_core::SchnickError;
use schnick_matchmaking::SessionKonfig;
use schnick_observability::LogFormat;
use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Matchmaking-Einstellungen (Timeouts, Pool-Limit)
    pub matchmaking: MatchmakingEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Herkunft der geladenen Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigQuelle {
    /// Aus der angegebenen TOML-Datei gelesen
    Datei,
    /// Datei nicht vorhanden, Standardwerte
    Standardwerte,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer den Spiel-Listener
    pub bind_adresse: String,
    /// TCP-Port fuer Spieler
    pub port: u16,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 12345,
        }
    }
}

/// Matchmaking-Einstellungen
///
/// Beide Grenzen sind standardmaessig aus: ein Spieler ohne Gegner wartet
/// unbegrenzt, und eine Session wartet unbegrenzt auf beide Zuege.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakingEinstellungen {
    /// Zeitlimit pro Zug-Lesevorgang in Sekunden (leer = kein Limit)
    pub lese_timeout_sek: Option<u64>,
    /// Maximale Anzahl wartender Verbindungen (leer = unbegrenzt)
    pub max_wartende: Option<usize>,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    ///
    /// Fehlt die Datei, gilt die Standardkonfiguration. Hier wird nicht
    /// geloggt; der Aufrufer meldet die Quelle erst nach
    /// `logging_initialisieren`.
    pub fn laden(pfad: &str) -> anyhow::Result<(Self, ConfigQuelle)> {
        let (config, quelle): (Self, _) = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                (config, ConfigQuelle::Datei)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), ConfigQuelle::Standardwerte)
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };
        config.validieren()?;
        Ok((config, quelle))
    }

    /// Log-Format als Enum; `validieren` stellt sicher, dass der Wert bekannt ist
    pub fn log_format(&self) -> LogFormat {
        LogFormat::aus_str(&self.logging.format).unwrap_or_default()
    }

    /// Prueft Werte, die TOML allein nicht ausschliessen kann
    pub fn validieren(&self) -> Result<(), SchnickError> {
        if self.matchmaking.lese_timeout_sek == Some(0) {
            return Err(SchnickError::konfiguration(
                "matchmaking.lese_timeout_sek muss groesser als 0 sein",
            ));
        }
        if let Some(max) = self.matchmaking.max_wartende {
            if max < 2 {
                return Err(SchnickError::konfiguration(format!(
                    "matchmaking.max_wartende={max} verhindert jede Paarbildung (mindestens 2)"
                )));
            }
        }
        if !schnick_observability::log_level_gueltig(&self.logging.level) {
            return Err(SchnickError::konfiguration(format!(
                "Unbekanntes Log-Level '{}'",
                self.logging.level
            )));
        }
        if LogFormat::aus_str(&self.logging.format).is_none() {
            return Err(SchnickError::konfiguration(format!(
                "Unbekanntes Log-Format '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse fuer den Spiel-Listener zurueck
    pub fn tcp_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.port)
    }

    /// Session-Einstellungen fuer den Matchmaker
    pub fn session_konfig(&self) -> SessionKonfig {
        SessionKonfig {
            lese_timeout: self.matchmaking.lese_timeout_sek.map(Duration::from_secs),
        }
    }
}
