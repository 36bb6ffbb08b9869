//! Client-seitige Verbindung zum Schnick-Server
//!
//! Ein Spiel besteht aus genau einem Zug: verbinden, Zug senden, bis zum
//! Schliessen der Verbindung lesen. Das Schliessen markiert das Ende der
//! Ergebnisnachricht.

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

/// Standard-Serveradresse
pub const STANDARD_SERVER: &str = "127.0.0.1:12345";

/// Spielt eine Runde und gibt die Ergebnisnachricht des Servers zurueck
///
/// Der Zug wird unveraendert gesendet; die Normalisierung uebernimmt der
/// Server. Schliesst der Server ohne Antwort, ist das Ergebnis leer.
pub async fn spielen(addr: impl ToSocketAddrs, zug: &str) -> Result<String> {
    let mut stream = TcpStream::connect(addr)
        .await
        .context("Verbindung zum Server fehlgeschlagen")?;
    tracing::debug!(peer = ?stream.peer_addr().ok(), "Mit Server verbunden");

    stream
        .write_all(zug.as_bytes())
        .await
        .context("Zug konnte nicht gesendet werden")?;

    let mut antwort = String::new();
    stream
        .read_to_string(&mut antwort)
        .await
        .context("Ergebnis konnte nicht gelesen werden")?;
    Ok(antwort)
}
