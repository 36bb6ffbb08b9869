//! Warte-Pool – FIFO der noch nicht gepaarten Verbindungen
//!
//! Der Pool ist der einzige Zustand, den Acceptor und Matchmaker teilen.
//! Alle Zugriffe laufen ueber einen einzigen Mutex; `Notify` uebernimmt die
//! Rolle der Condition Variable. `notify_one` speichert ein Permit, falls der
//! Matchmaker gerade nicht wartet, daher geht kein Wecksignal verloren.
//!
//! Der Pool ist generisch ueber den Eintragstyp, damit er ohne Sockets
//! getestet werden kann.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Thread-sicherer FIFO-Warte-Pool
pub struct WartePool<T> {
    warteschlange: Mutex<VecDeque<T>>,
    signal: Notify,
    /// Optionale Obergrenze; `None` = unbegrenzt
    max_wartende: Option<usize>,
}

impl<T> WartePool<T> {
    /// Erstellt einen unbegrenzten Pool
    pub fn neu() -> Self {
        Self {
            warteschlange: Mutex::new(VecDeque::new()),
            signal: Notify::new(),
            max_wartende: None,
        }
    }

    /// Erstellt einen Pool mit optionaler Obergrenze
    pub fn mit_limit(max_wartende: Option<usize>) -> Self {
        Self {
            max_wartende,
            ..Self::neu()
        }
    }

    /// Haengt einen Eintrag hinten an und weckt den Matchmaker
    ///
    /// Ist eine Obergrenze gesetzt und erreicht, wird der Eintrag
    /// unveraendert zurueckgegeben. Ohne Obergrenze gelingt `push` immer.
    pub fn push(&self, eintrag: T) -> Result<usize, T> {
        let wartende = {
            let mut schlange = self.warteschlange.lock();
            if let Some(max) = self.max_wartende {
                if schlange.len() >= max {
                    return Err(eintrag);
                }
            }
            schlange.push_back(eintrag);
            schlange.len()
        };
        self.signal.notify_one();
        Ok(wartende)
    }

    /// Entnimmt atomar die zwei vordersten Eintraege
    ///
    /// Gibt `None` zurueck und laesst den Pool unveraendert, wenn weniger
    /// als zwei Eintraege warten.
    pub fn try_pop_pair(&self) -> Option<(T, T)> {
        let mut schlange = self.warteschlange.lock();
        if schlange.len() < 2 {
            return None;
        }
        let erster = schlange.pop_front()?;
        let zweiter = schlange.pop_front()?;
        Some((erster, zweiter))
    }

    /// Aktuelle Anzahl wartender Eintraege (nur fuer Logging/Tests)
    pub fn len(&self) -> usize {
        self.warteschlange.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_wartende(&self) -> Option<usize> {
        self.max_wartende
    }

    /// Wartet bis der Pool veraendert wurde
    ///
    /// Ein Wecken garantiert nicht, dass ein Paar bereitsteht; der Aufrufer
    /// prueft das ueber `try_pop_pair`.
    pub async fn veraenderung_abwarten(&self) {
        self.signal.notified().await;
    }
}
