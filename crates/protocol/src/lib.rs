//! schnick-protocol – Text-Protokoll und Spielregeln
//!
//! Dieses Crate definiert den Zug-Codec (Text <-> `Move`), die Spielregel
//! (`entscheiden`) und die personalisierte Ergebnisnachricht, die jeder
//! Teilnehmer am Ende einer Session erhaelt.
//!
//! ## Wire-Format
//! - Client -> Server: ein einzelner Write mit `rock`, `paper` oder `scissors`
//!   (Gross-/Kleinschreibung egal, Whitespace wird ignoriert)
//! - Server -> Client: ein einzelner ASCII-Satz ohne Terminator, danach Close

pub mod antwort;
pub mod ergebnis;
pub mod zug;

pub use antwort::{antwort_kampflos, antwort_text, Seite};
pub use ergebnis::{entscheiden, Outcome};
pub use zug::Move;
