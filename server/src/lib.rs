//! schnick-server – Bibliotheks-Root
//!
//! Verdrahtet Warte-Pool, Acceptor und Matchmaker und stellt den
//! oeffentlichen Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use config::ServerConfig;
use schnick_matchmaking::{Acceptor, Matchmaker, WartePool};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Haelt den Server-Zustand vor dem Start zusammen
pub struct Server {
    pub config: ServerConfig,
}

/// Ein gebundener, laufender Server mit Acceptor- und Matchmaker-Task
pub struct LaufenderServer {
    lokale_addr: SocketAddr,
    shutdown_tx: watch::Sender<bool>,
    acceptor: JoinHandle<()>,
    matchmaker: JoinHandle<()>,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Bindet den Listener und startet Acceptor und Matchmaker
    ///
    /// Ein Bind-Fehler ist fatal und wird an den Aufrufer gegeben.
    pub async fn binden(self) -> Result<LaufenderServer> {
        let adresse = self.config.tcp_bind_adresse();
        let pool = Arc::new(WartePool::mit_limit(self.config.matchmaking.max_wartende));

        let acceptor = Acceptor::binden(adresse.as_str(), Arc::clone(&pool))
            .await
            .map_err(|e| anyhow::anyhow!("Listener auf '{adresse}' nicht bindbar: {e}"))?;
        let lokale_addr = acceptor.lokale_addr()?;
        let matchmaker = Matchmaker::neu(pool, self.config.session_konfig());

        tracing::info!(
            adresse = %lokale_addr,
            lese_timeout_sek = ?self.config.matchmaking.lese_timeout_sek,
            max_wartende = ?self.config.matchmaking.max_wartende,
            "Server startet"
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let acceptor = tokio::spawn(acceptor.ausfuehren(shutdown_rx.clone()));
        let matchmaker = tokio::spawn(matchmaker.ausfuehren(shutdown_rx));

        Ok(LaufenderServer {
            lokale_addr,
            shutdown_tx,
            acceptor,
            matchmaker,
        })
    }

    /// Startet den Server und laeuft bis zum Shutdown-Signal (Ctrl-C)
    pub async fn starten(self) -> Result<()> {
        let laufend = self.binden().await?;

        tracing::info!("Server laeuft. Warte auf Shutdown-Signal (Ctrl-C)...");
        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown-Signal empfangen, Server wird beendet");

        laufend.stoppen().await
    }
}

impl LaufenderServer {
    /// Tatsaechlich gebundene Adresse (relevant bei Port 0)
    pub fn lokale_addr(&self) -> SocketAddr {
        self.lokale_addr
    }

    /// Signalisiert den Shutdown und wartet auf beide Tasks
    pub async fn stoppen(self) -> Result<()> {
        // Fehler nur wenn alle Empfaenger weg sind; dann laeuft ohnehin nichts mehr
        let _ = self.shutdown_tx.send(true);
        self.acceptor.await?;
        self.matchmaker.await?;
        tracing::info!("Server gestoppt");
        Ok(())
    }
}
