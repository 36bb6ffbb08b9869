//! schnick-matchmaking – Paarbildung und Session-Verarbeitung
//!
//! Dieser Crate nimmt TCP-Verbindungen an, sammelt sie in einem FIFO-Warte-Pool
//! und bildet daraus Zweier-Sessions. Jede Session laeuft in einem eigenen
//! tokio-Task und ist nach der Uebergabe vollstaendig isoliert.
//!
//! ## Architektur
//!
//! ```text
//! Acceptor (ein Task, accept-Loop)
//!     |  push
//!     v
//! WartePool (Mutex<VecDeque> + Notify)   <- einziger geteilter Zustand
//!     |  try_pop_pair
//!     v
//! Matchmaker (ein Task, wartet auf Notify)
//!     |  spawn (JoinSet)
//!     v
//! SpielSession (ein Task pro Paar)
//!     lesen -> entscheiden -> antworten -> schliessen
//! ```
//!
//! ## Bekannte Einschraenkung
//! Ohne konfiguriertes `lese_timeout` blockiert eine Session fuer immer, wenn
//! ein Teilnehmer nie sendet. Ebenso wartet ein einzelner Spieler ohne Gegner
//! unbegrenzt im Pool.

pub mod acceptor;
pub mod matchmaker;
pub mod pool;
pub mod session;
pub mod verbindung;

// Bequeme Re-Exporte
pub use acceptor::{Acceptor, VerbindungsQuelle};
pub use matchmaker::Matchmaker;
pub use pool::WartePool;
pub use session::{SessionBericht, SessionKonfig, SpielSession};
pub use verbindung::Verbindung;
