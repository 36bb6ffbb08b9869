//! Spiel-Session – verarbeitet genau ein gepaartes Spielerpaar
//!
//! Ablauf:
//! 1. Beide Zuege unabhaengig voneinander lesen (je ein eigener Puffer)
//! 2. Ergebnis per `entscheiden` bestimmen
//! 3. Jedem Teilnehmer seine personalisierte Antwort senden
//! 4. Beide Verbindungen schliessen, auch bei `Invalid` oder Fehlern
//!
//! Ungueltige Eingaben sind ein normaler Zug (`Move::Invalid`) und laufen
//! durch die Spielregel. Ein Lese- oder Sendefehler dagegen betrifft nur die
//! jeweilige Verbindung: sie wird geloggt und ohne Antwort geschlossen. Hat
//! nur eine Seite keinen Zug geliefert, gewinnt die andere kampflos, egal auf
//! welchem Sitzplatz. Fallen beide aus, wird die Runde verworfen. Es gibt
//! keine Wiederholung.

use std::time::Duration;

use schnick_core::SessionId;
use schnick_protocol::{antwort_kampflos, antwort_text, entscheiden, Move, Outcome, Seite};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::verbindung::Verbindung;

/// Einstellungen fuer alle Sessions
#[derive(Debug, Clone, Default)]
pub struct SessionKonfig {
    /// Zeitlimit pro Lesevorgang; `None` = unbegrenzt blockieren
    pub lese_timeout: Option<Duration>,
}

/// Zusammenfassung einer abgeschlossenen Session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBericht {
    pub id: SessionId,
    /// Zug von Spieler 1; `None` wenn das Lesen fehlgeschlagen ist
    pub zug_spieler1: Option<Move>,
    /// Zug von Spieler 2; `None` wenn das Lesen fehlgeschlagen ist
    pub zug_spieler2: Option<Move>,
    /// `None` wenn keine Seite einen Zug geliefert hat
    pub ergebnis: Option<Outcome>,
    /// Hat Spieler 1 seine Antwort erhalten?
    pub zugestellt_spieler1: bool,
    /// Hat Spieler 2 seine Antwort erhalten?
    pub zugestellt_spieler2: bool,
}

/// Eine laufende Session mit zwei exklusiv besessenen Verbindungen
pub struct SpielSession<S = TcpStream> {
    id: SessionId,
    spieler1: Verbindung<S>,
    spieler2: Verbindung<S>,
    konfig: SessionKonfig,
}

impl<S> SpielSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Bindet zwei Verbindungen zu einer Session; die erste ist Spieler 1
    pub fn neu(spieler1: Verbindung<S>, spieler2: Verbindung<S>, konfig: SessionKonfig) -> Self {
        Self {
            id: SessionId::new(),
            spieler1,
            spieler2,
            konfig,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Fuehrt die Session vollstaendig aus und schliesst beide Verbindungen
    pub async fn ausfuehren(self) -> SessionBericht {
        let SpielSession {
            id,
            mut spieler1,
            mut spieler2,
            konfig,
        } = self;

        tracing::debug!(
            session = %id,
            spieler1 = %spieler1.peer_addr(),
            spieler2 = %spieler2.peer_addr(),
            "Session gestartet"
        );

        // Zwei unabhaengige Reads; ein haengender Client blockiert den anderen nicht
        let (lesen1, lesen2) = tokio::join!(
            spieler1.zug_lesen(konfig.lese_timeout),
            spieler2.zug_lesen(konfig.lese_timeout),
        );

        let zug1 = zug_auswerten(id, Seite::Spieler1, &spieler1, lesen1);
        let zug2 = zug_auswerten(id, Seite::Spieler2, &spieler2, lesen2);

        let (ergebnis, antwort1, antwort2) = match (zug1, zug2) {
            (Some(zug1), Some(zug2)) => {
                let ergebnis = entscheiden(zug1, zug2);
                (
                    Some(ergebnis),
                    Some(antwort_text(Seite::Spieler1, zug1, zug2, ergebnis)),
                    Some(antwort_text(Seite::Spieler2, zug2, zug1, ergebnis)),
                )
            }
            (Some(zug1), None) => (
                Some(Outcome::kampflos_fuer(Seite::Spieler1)),
                Some(antwort_kampflos(zug1)),
                None,
            ),
            (None, Some(zug2)) => (
                Some(Outcome::kampflos_fuer(Seite::Spieler2)),
                None,
                Some(antwort_kampflos(zug2)),
            ),
            (None, None) => (None, None, None),
        };

        match ergebnis {
            Some(ergebnis) => tracing::info!(
                session = %id,
                zug1 = ?zug1,
                zug2 = ?zug2,
                gewinner = ?ergebnis.gewinner(),
                "Runde entschieden"
            ),
            None => tracing::warn!(session = %id, "Keine Seite hat einen Zug geliefert, Runde verworfen"),
        }

        let (zugestellt1, zugestellt2) = tokio::join!(
            abschliessen(id, Seite::Spieler1, spieler1, antwort1),
            abschliessen(id, Seite::Spieler2, spieler2, antwort2),
        );

        tracing::debug!(session = %id, "Session beendet");

        SessionBericht {
            id,
            zug_spieler1: zug1,
            zug_spieler2: zug2,
            ergebnis,
            zugestellt_spieler1: zugestellt1,
            zugestellt_spieler2: zugestellt2,
        }
    }
}

/// Wertet das Leseergebnis einer Seite aus
///
/// `None` heisst: kein Zug, die Verbindung bekommt keine Antwort.
fn zug_auswerten<S>(
    id: SessionId,
    seite: Seite,
    verbindung: &Verbindung<S>,
    gelesen: schnick_core::Result<Move>,
) -> Option<Move> {
    match gelesen {
        Ok(zug) => {
            if !zug.ist_gueltig() {
                tracing::debug!(session = %id, seite = ?seite, "Ungueltiger Zug empfangen");
            }
            Some(zug)
        }
        Err(e) if e.ist_verbindungsfehler() => {
            tracing::warn!(
                session = %id,
                seite = ?seite,
                peer = %verbindung.peer_addr(),
                fehler = %e,
                "Zug konnte nicht gelesen werden"
            );
            None
        }
        Err(e) => {
            tracing::error!(session = %id, seite = ?seite, fehler = %e, "Unerwarteter Lesefehler");
            None
        }
    }
}

/// Sendet (falls vorhanden) die Antwort und schliesst die Verbindung
async fn abschliessen<S>(
    id: SessionId,
    seite: Seite,
    mut verbindung: Verbindung<S>,
    antwort: Option<String>,
) -> bool
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let zugestellt = match antwort {
        Some(text) => match verbindung.antwort_senden(&text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    session = %id,
                    seite = ?seite,
                    peer = %verbindung.peer_addr(),
                    fehler = %e,
                    "Antwort konnte nicht gesendet werden"
                );
                false
            }
        },
        None => false,
    };
    verbindung.schliessen().await;
    zugestellt
}
