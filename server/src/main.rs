//! Schnick Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.
//! Startfehler (Konfiguration, Bind) beenden den Prozess mit Exit-Code != 0.

use anyhow::Result;
use schnick_server::config::{ConfigQuelle, ServerConfig};
use schnick_server::Server;

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("SCHNICK_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let (config, quelle) = ServerConfig::laden(&config_pfad)?;

    schnick_observability::logging_initialisieren(&config.logging.level, config.log_format())
        .map_err(|e| anyhow::anyhow!("Logging konnte nicht initialisiert werden: {e}"))?;

    if quelle == ConfigQuelle::Standardwerte {
        tracing::warn!(
            pfad = %config_pfad,
            "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Schnick Server wird initialisiert"
    );

    Server::neu(config).starten().await
}
