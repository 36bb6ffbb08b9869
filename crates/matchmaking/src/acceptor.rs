//! Acceptor – nimmt Verbindungen an und legt sie in den Warte-Pool
//!
//! Laeuft in einem eigenen tokio-Task bis das Shutdown-Signal kommt.
//! Der einzige Synchronisationspunkt mit dem Matchmaker ist `WartePool::push`.
//! Accept-Fehler einzelner Verbindungen werden geloggt, die Schleife laeuft weiter.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::sync::watch;

use crate::pool::WartePool;
use crate::verbindung::Verbindung;

/// Pause nach einem fehlgeschlagenen accept()
const ACCEPT_FEHLER_PAUSE: Duration = Duration::from_millis(10);

/// Quelle eingehender Verbindungen
///
/// Im Betrieb ein `TcpListener`. Jeder Aufruf liefert genau eine neue
/// Verbindung oder einen Fehler, der nur diesen Accept-Versuch betrifft.
pub trait VerbindungsQuelle: Send + Sync + 'static {
    type Stream: Send + 'static;

    fn annehmen(&self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;
}

impl VerbindungsQuelle for TcpListener {
    type Stream = TcpStream;

    async fn annehmen(&self) -> io::Result<(TcpStream, SocketAddr)> {
        let (stream, peer_addr) = self.accept().await?;
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(peer = %peer_addr, fehler = %e, "TCP_NODELAY nicht gesetzt");
        }
        Ok((stream, peer_addr))
    }
}

/// Accept-Loop fuer neue Spieler
pub struct Acceptor<L: VerbindungsQuelle = TcpListener> {
    quelle: L,
    pool: Arc<WartePool<Verbindung<L::Stream>>>,
}

impl Acceptor<TcpListener> {
    /// Bindet den Listener
    ///
    /// Ein Fehler hier ist fatal fuer den Serverstart.
    pub async fn binden(
        addr: impl ToSocketAddrs,
        pool: Arc<WartePool<Verbindung>>,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(adresse = ?listener.local_addr().ok(), "Listener gebunden");
        Ok(Self::neu(listener, pool))
    }

    /// Gibt die tatsaechlich gebundene Adresse zurueck (relevant bei Port 0)
    pub fn lokale_addr(&self) -> io::Result<SocketAddr> {
        self.quelle.local_addr()
    }
}

impl<L: VerbindungsQuelle> Acceptor<L> {
    pub fn neu(quelle: L, pool: Arc<WartePool<Verbindung<L::Stream>>>) -> Self {
        Self { quelle, pool }
    }

    /// Accept-Loop; laeuft bis `shutdown_rx` ein `true`-Signal empfaengt
    pub async fn ausfuehren(self, mut shutdown_rx: watch::Receiver<bool>) {
        tracing::info!("Acceptor gestartet");

        loop {
            tokio::select! {
                // Neue eingehende Verbindung
                result = self.quelle.annehmen() => {
                    match result {
                        Ok((stream, peer_addr)) => self.in_pool_legen(stream, peer_addr),
                        Err(e) => {
                            tracing::error!(fehler = %e, "Accept-Fehler");
                            tokio::time::sleep(ACCEPT_FEHLER_PAUSE).await;
                        }
                    }
                }

                // Shutdown-Signal
                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!("Acceptor: Shutdown-Signal empfangen");
                        break;
                    }
                }
            }
        }

        tracing::info!("Acceptor gestoppt");
    }

    fn in_pool_legen(&self, stream: L::Stream, peer_addr: SocketAddr) {
        let verbindung = Verbindung::neu(stream, peer_addr);
        let id = verbindung.id();

        match self.pool.push(verbindung) {
            Ok(wartende) => {
                tracing::debug!(
                    peer = %peer_addr,
                    verbindung = %id,
                    wartende,
                    "Verbindung akzeptiert"
                );
            }
            Err(abgelehnt) => {
                tracing::warn!(
                    peer = %peer_addr,
                    max = ?self.pool.max_wartende(),
                    "Warte-Pool voll, Verbindung abgelehnt"
                );
                // Stream wird durch Drop geschlossen
                drop(abgelehnt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use tokio::io::{duplex, DuplexStream};

    type Ereignis = io::Result<(DuplexStream, SocketAddr)>;

    /// Spielt vorgegebene Accept-Ergebnisse ab, danach blockiert sie
    struct SkriptQuelle {
        ereignisse: Mutex<VecDeque<Ereignis>>,
        // Gegenseiten offen halten, sonst sieht der Server sofort EOF
        _clients: Vec<DuplexStream>,
    }

    impl SkriptQuelle {
        fn neu(ablauf: Vec<Result<u16, io::ErrorKind>>) -> Self {
            let mut ereignisse = VecDeque::new();
            let mut clients = Vec::new();
            for schritt in ablauf {
                match schritt {
                    Ok(port) => {
                        let (server, client) = duplex(64);
                        let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();
                        ereignisse.push_back(Ok((server, addr)));
                        clients.push(client);
                    }
                    Err(kind) => ereignisse.push_back(Err(io::Error::from(kind))),
                }
            }
            Self {
                ereignisse: Mutex::new(ereignisse),
                _clients: clients,
            }
        }
    }

    impl VerbindungsQuelle for SkriptQuelle {
        type Stream = DuplexStream;

        fn annehmen(&self) -> impl Future<Output = Ereignis> + Send {
            let naechstes = self.ereignisse.lock().pop_front();
            async move {
                match naechstes {
                    Some(ereignis) => ereignis,
                    None => std::future::pending().await,
                }
            }
        }
    }

    async fn warten_auf_pool(pool: &WartePool<Verbindung<DuplexStream>>, anzahl: usize) {
        for _ in 0..200 {
            if pool.len() >= anzahl {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("Pool hat {anzahl} Verbindungen nicht erreicht");
    }

    #[tokio::test]
    async fn accept_fehler_beendet_schleife_nicht() {
        let pool = Arc::new(WartePool::neu());
        let quelle = SkriptQuelle::neu(vec![
            Err(io::ErrorKind::ConnectionAborted),
            Ok(1),
            Err(io::ErrorKind::Other),
            Ok(2),
        ]);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(Acceptor::neu(quelle, Arc::clone(&pool)).ausfuehren(shutdown_rx));

        // Beide Verbindungen nach den Fehlern landen im Pool
        warten_auf_pool(&pool, 2).await;
        assert!(!task.is_finished());

        let (a, b) = pool.try_pop_pair().unwrap();
        assert_eq!(a.peer_addr().port(), 1);
        assert_eq!(b.peer_addr().port(), 2);

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn voller_pool_lehnt_ab_und_laeuft_weiter() {
        let pool = Arc::new(WartePool::mit_limit(Some(2)));
        let quelle = SkriptQuelle::neu(vec![Ok(1), Ok(2), Ok(3)]);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(Acceptor::neu(quelle, Arc::clone(&pool)).ausfuehren(shutdown_rx));

        warten_auf_pool(&pool, 2).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(pool.len(), 2);
        assert!(!task.is_finished());

        shutdown_tx.send(true).unwrap();
        task.await.unwrap();
    }
}
