//! Zug-Codec
//!
//! Wandelt den rohen Text eines Clients in einen `Move` um und zurueck.
//! Die Dekodierung ist total: alles was kein gueltiger Zug ist wird zu
//! `Move::Invalid` und fliesst ganz normal durch die Spielregel.

use serde::{Deserialize, Serialize};

/// Ein Spielzug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    /// Sentinel fuer jede nicht erkannte Eingabe (auch leer)
    Invalid,
}

impl Move {
    /// Alle vier Varianten, inklusive `Invalid`
    pub const ALLE: [Move; 4] = [Move::Rock, Move::Paper, Move::Scissors, Move::Invalid];

    /// Dekodiert einen Zug aus Client-Text
    pub fn aus_text(text: &str) -> Self {
        let normalisiert = text.trim().to_ascii_lowercase();
        match normalisiert.as_str() {
            "rock" => Self::Rock,
            "paper" => Self::Paper,
            "scissors" => Self::Scissors,
            _ => Self::Invalid,
        }
    }

    /// Dekodiert einen Zug aus rohen Bytes (nicht-UTF-8 wird verlustbehaftet ersetzt)
    pub fn aus_bytes(bytes: &[u8]) -> Self {
        Self::aus_text(&String::from_utf8_lossy(bytes))
    }

    /// Textdarstellung fuer Ergebnisnachrichten
    pub fn als_text(&self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
            Self::Invalid => "invalid",
        }
    }

    pub fn ist_gueltig(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl From<&str> for Move {
    fn from(text: &str) -> Self {
        Self::aus_text(text)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_text())
    }
}
