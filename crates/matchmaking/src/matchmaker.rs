//! Matchmaker – bildet Paare aus dem Warte-Pool und startet Sessions
//!
//! Wartet (ohne Busy-Spin) auf das Signal des Pools und entnimmt dann so
//! lange Paare, bis weniger als zwei Verbindungen warten. Jede Session laeuft
//! als eigener Task in einem `JoinSet`; der Matchmaker wartet nie auf eine
//! Session, sondern raeumt nur beendete Tasks ab.
//!
//! Beim Shutdown werden noch laufende Sessions abgebrochen.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::pool::WartePool;
use crate::session::{SessionBericht, SessionKonfig, SpielSession};
use crate::verbindung::Verbindung;

/// Paarbildung fuer wartende Spieler
pub struct Matchmaker {
    pool: Arc<WartePool<Verbindung>>,
    konfig: SessionKonfig,
}

impl Matchmaker {
    pub fn neu(pool: Arc<WartePool<Verbindung>>, konfig: SessionKonfig) -> Self {
        Self { pool, konfig }
    }

    /// Matchmaking-Loop; laeuft bis `shutdown_rx` ein `true`-Signal empfaengt
    pub async fn ausfuehren(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut sessionen: JoinSet<SessionBericht> = JoinSet::new();
        tracing::info!("Matchmaker gestartet");

        loop {
            // Alle verfuegbaren Paare abarbeiten; ein Signal kann fuer
            // mehrere Pushes stehen
            while let Some((spieler1, spieler2)) = self.pool.try_pop_pair() {
                self.session_starten(&mut sessionen, spieler1, spieler2);
            }

            tokio::select! {
                _ = self.pool.veraenderung_abwarten() => {}

                Some(beendet) = sessionen.join_next(), if !sessionen.is_empty() => {
                    if let Err(e) = beendet {
                        tracing::error!(fehler = %e, "Session-Task abgebrochen");
                    }
                }

                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!("Matchmaker: Shutdown-Signal empfangen");
                        break;
                    }
                }
            }
        }

        if !sessionen.is_empty() {
            tracing::info!(
                laufend = sessionen.len(),
                "Laufende Sessions werden abgebrochen"
            );
        }
        sessionen.shutdown().await;
        tracing::info!("Matchmaker gestoppt");
    }

    fn session_starten(
        &self,
        sessionen: &mut JoinSet<SessionBericht>,
        spieler1: Verbindung,
        spieler2: Verbindung,
    ) {
        let session = SpielSession::neu(spieler1, spieler2, self.konfig.clone());
        let span = tracing::info_span!("session", id = %session.id());

        tracing::debug!(
            session = %session.id(),
            wartende = self.pool.len(),
            "Paar gebildet"
        );
        sessionen.spawn(session.ausfuehren().instrument(span));
    }
}
