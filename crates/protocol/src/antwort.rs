//! Personalisierte Ergebnisnachricht
//!
//! Format: `You played <eigener>. Opponent played <gegner>. <Satz>`
//! wobei der Satz aus Sicht des Empfaengers formuliert ist
//! (`Draw`, `You win`, `You lose`).
//!
//! Ist der Gegner vor seinem Zug weggebrochen, gibt es keinen Gegnerzug zu
//! melden: `You played <eigener>. Opponent disconnected. You win`.

use crate::ergebnis::Outcome;
use crate::zug::Move;

/// Sitzplatz eines Teilnehmers innerhalb einer Session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seite {
    Spieler1,
    Spieler2,
}

impl Outcome {
    /// Ergebnissatz aus Sicht des gegebenen Sitzplatzes
    pub fn satz_fuer(&self, seite: Seite) -> &'static str {
        match (self, seite) {
            (Outcome::Draw, _) => "Draw",
            (Outcome::Player1Wins, Seite::Spieler1) | (Outcome::Player2Wins, Seite::Spieler2) => {
                "You win"
            }
            (Outcome::Player1Wins, Seite::Spieler2) | (Outcome::Player2Wins, Seite::Spieler1) => {
                "You lose"
            }
        }
    }

    /// Kampfloser Sieg fuer den verbliebenen Sitzplatz
    pub fn kampflos_fuer(seite: Seite) -> Self {
        match seite {
            Seite::Spieler1 => Outcome::Player1Wins,
            Seite::Spieler2 => Outcome::Player2Wins,
        }
    }

    /// Gibt den Gewinner-Sitzplatz zurueck, `None` bei Unentschieden
    pub fn gewinner(&self) -> Option<Seite> {
        match self {
            Outcome::Draw => None,
            Outcome::Player1Wins => Some(Seite::Spieler1),
            Outcome::Player2Wins => Some(Seite::Spieler2),
        }
    }
}

/// Baut die Antwort fuer einen Teilnehmer
pub fn antwort_text(seite: Seite, eigener: Move, gegner: Move, ergebnis: Outcome) -> String {
    format!(
        "You played {eigener}. Opponent played {gegner}. {}",
        ergebnis.satz_fuer(seite)
    )
}

/// Antwort fuer den verbliebenen Teilnehmer, wenn der Gegner keinen Zug
/// geliefert hat
pub fn antwort_kampflos(eigener: Move) -> String {
    format!("You played {eigener}. Opponent disconnected. You win")
}
