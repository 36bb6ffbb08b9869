//! Integration-Tests: Acceptor + Matchmaker + Sessions ueber echtes Loopback-TCP

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use schnick_matchmaking::{Acceptor, Matchmaker, SessionKonfig, Verbindung, WartePool};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct TestServer {
    addr: SocketAddr,
    pool: Arc<WartePool<Verbindung>>,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl TestServer {
    async fn starten(konfig: SessionKonfig) -> Self {
        let pool = Arc::new(WartePool::neu());
        let acceptor = Acceptor::binden("127.0.0.1:0", Arc::clone(&pool))
            .await
            .expect("Listener konnte nicht gebunden werden");
        let addr = acceptor.lokale_addr().unwrap();
        let matchmaker = Matchmaker::neu(Arc::clone(&pool), konfig);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let tasks = vec![
            tokio::spawn(acceptor.ausfuehren(shutdown_rx.clone())),
            tokio::spawn(matchmaker.ausfuehren(shutdown_rx)),
        ];

        Self {
            addr,
            pool,
            shutdown_tx,
            tasks,
        }
    }

    async fn stoppen(self) {
        self.shutdown_tx.send(true).unwrap();
        for task in self.tasks {
            tokio::time::timeout(Duration::from_secs(5), task)
                .await
                .expect("Task hat nicht auf Shutdown reagiert")
                .unwrap();
        }
    }

    /// Wartet bis genau `anzahl` Verbindungen im Pool liegen
    async fn warten_auf_pool(&self, anzahl: usize) {
        for _ in 0..200 {
            if self.pool.len() == anzahl {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("Pool erreicht nicht {anzahl} Eintraege (aktuell {})", self.pool.len());
    }
}

async fn zug_senden(addr: SocketAddr, zug: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(zug.as_bytes()).await.unwrap();
    stream
}

async fn antwort_lesen(mut stream: TcpStream) -> String {
    let mut antwort = String::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut antwort))
        .await
        .expect("Keine Antwort vom Server")
        .unwrap();
    antwort
}

#[tokio::test]
async fn stein_gegen_schere() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    let a = zug_senden(server.addr, "rock").await;
    let b = zug_senden(server.addr, "scissors").await;

    assert_eq!(
        antwort_lesen(a).await,
        "You played rock. Opponent played scissors. You win"
    );
    assert_eq!(
        antwort_lesen(b).await,
        "You played scissors. Opponent played rock. You lose"
    );
    server.stoppen().await;
}

#[tokio::test]
async fn papier_gemischte_schreibweise_ist_unentschieden() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    let a = zug_senden(server.addr, "Paper ").await;
    let b = zug_senden(server.addr, "Paper ").await;

    for stream in [a, b] {
        assert_eq!(
            antwort_lesen(stream).await,
            "You played paper. Opponent played paper. Draw"
        );
    }
    server.stoppen().await;
}

#[tokio::test]
async fn unbekannter_zug_verliert_gegen_stein() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    // A kommt zuerst an und ist damit Spieler 1
    let a = zug_senden(server.addr, "lizard").await;
    server.warten_auf_pool(1).await;
    let b = zug_senden(server.addr, "rock").await;

    assert_eq!(
        antwort_lesen(a).await,
        "You played invalid. Opponent played rock. You lose"
    );
    assert_eq!(
        antwort_lesen(b).await,
        "You played rock. Opponent played invalid. You win"
    );
    server.stoppen().await;
}

#[tokio::test]
async fn einzelner_spieler_bleibt_im_pool() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    let mut allein = zug_senden(server.addr, "rock").await;
    server.warten_auf_pool(1).await;

    // Keine Antwort, Verbindung bleibt offen
    let mut puffer = [0u8; 64];
    let lesen = tokio::time::timeout(Duration::from_millis(200), allein.read(&mut puffer)).await;
    assert!(lesen.is_err(), "Einzelner Spieler darf keine Antwort bekommen");
    assert_eq!(server.pool.len(), 1);

    server.stoppen().await;
}

#[tokio::test]
async fn fifo_reihenfolge_ueber_mehrere_paare() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    // Vier Spieler nacheinander: (1,2) und (3,4) muessen gepaart werden
    let s1 = zug_senden(server.addr, "rock").await;
    server.warten_auf_pool(1).await;
    let s2 = zug_senden(server.addr, "paper").await;
    let a1 = antwort_lesen(s1).await;
    let a2 = antwort_lesen(s2).await;

    let s3 = zug_senden(server.addr, "scissors").await;
    server.warten_auf_pool(1).await;
    let s4 = zug_senden(server.addr, "scissors").await;
    let a3 = antwort_lesen(s3).await;
    let a4 = antwort_lesen(s4).await;

    assert_eq!(a1, "You played rock. Opponent played paper. You lose");
    assert_eq!(a2, "You played paper. Opponent played rock. You win");
    assert_eq!(a3, "You played scissors. Opponent played scissors. Draw");
    assert_eq!(a4, a3);
    server.stoppen().await;
}

#[tokio::test]
async fn viele_parallele_sessions() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    let mut clients = Vec::new();
    for _ in 0..20 {
        let addr = server.addr;
        clients.push(tokio::spawn(async move {
            antwort_lesen(zug_senden(addr, "rock").await).await
        }));
    }

    for client in clients {
        assert_eq!(
            client.await.unwrap(),
            "You played rock. Opponent played rock. Draw"
        );
    }
    assert!(server.pool.is_empty());
    server.stoppen().await;
}

#[tokio::test]
async fn haengende_session_blockiert_andere_nicht() {
    let server = TestServer::starten(SessionKonfig::default()).await;

    // Erstes Paar: Spieler 2 sendet nie
    let _stumm1 = zug_senden(server.addr, "rock").await;
    server.warten_auf_pool(1).await;
    let _stumm2 = TcpStream::connect(server.addr).await.unwrap();
    server.warten_auf_pool(0).await;

    // Zweites Paar laeuft trotzdem durch
    let a = zug_senden(server.addr, "paper").await;
    let b = zug_senden(server.addr, "rock").await;
    assert!(antwort_lesen(a).await.ends_with("You win"));
    assert!(antwort_lesen(b).await.ends_with("You lose"));

    server.stoppen().await;
}

#[tokio::test]
async fn lese_timeout_beendet_haengende_session() {
    let server = TestServer::starten(SessionKonfig {
        lese_timeout: Some(Duration::from_millis(100)),
    })
    .await;

    let a = zug_senden(server.addr, "scissors").await;
    server.warten_auf_pool(1).await;
    let stumm = TcpStream::connect(server.addr).await.unwrap();

    assert_eq!(
        antwort_lesen(a).await,
        "You played scissors. Opponent disconnected. You win"
    );
    // Die stumme Seite bekommt nur den Verbindungsabbruch
    assert_eq!(antwort_lesen(stumm).await, "");
    server.stoppen().await;
}

#[tokio::test]
async fn pool_limit_lehnt_ueberzaehlige_ab() {
    let pool = Arc::new(WartePool::mit_limit(Some(2)));
    let acceptor = Acceptor::binden("127.0.0.1:0", Arc::clone(&pool))
        .await
        .unwrap();
    let addr = acceptor.lokale_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    // Ohne Matchmaker fuellt sich der Pool
    let task = tokio::spawn(acceptor.ausfuehren(shutdown_rx));

    let _a = TcpStream::connect(addr).await.unwrap();
    let _b = TcpStream::connect(addr).await.unwrap();
    for _ in 0..200 {
        if pool.len() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(pool.len(), 2);

    let mut dritter = TcpStream::connect(addr).await.unwrap();
    let mut puffer = [0u8; 8];
    let gelesen = tokio::time::timeout(Duration::from_secs(5), dritter.read(&mut puffer))
        .await
        .expect("Abgelehnte Verbindung wurde nicht geschlossen");
    // Geschlossen: EOF oder Reset
    assert!(matches!(gelesen, Ok(0) | Err(_)));
    assert_eq!(pool.len(), 2);

    shutdown_tx.send(true).unwrap();
    task.await.unwrap();
}
