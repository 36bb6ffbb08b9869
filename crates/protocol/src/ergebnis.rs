//! Spielregel
//!
//! Entscheidet eine Runde Schere, Stein, Papier. Gleiche Zuege sind immer
//! ein Unentschieden (auch `Invalid` gegen `Invalid`). Spieler 1 gewinnt
//! genau bei Stein/Schere, Papier/Stein und Schere/Papier; jedes andere
//! ungleiche Paar geht an Spieler 2.
//!
//! `Invalid` gegen einen gueltigen Zug faellt damit in den Catch-all-Zweig.
//! Es gibt keine Moeglichkeit einen Zug erneut einzureichen, deshalb wird
//! eine ungueltige Eingabe nicht abgelehnt sondern einfach gewertet.

use serde::{Deserialize, Serialize};

use crate::zug::Move;

/// Ausgang einer Runde aus Sicht der Sitzplaetze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    Player1Wins,
    Player2Wins,
}

/// Entscheidet eine Runde
pub fn entscheiden(spieler1: Move, spieler2: Move) -> Outcome {
    if spieler1 == spieler2 {
        return Outcome::Draw;
    }
    match (spieler1, spieler2) {
        (Move::Rock, Move::Scissors)
        | (Move::Paper, Move::Rock)
        | (Move::Scissors, Move::Paper) => Outcome::Player1Wins,
        _ => Outcome::Player2Wins,
    }
}
