//! Verbindungs-Handle
//!
//! Eine `Verbindung` besitzt genau einen Byte-Stream exklusiv. Sie ist nicht
//! `Clone` und wird vom Acceptor ueber den Pool an genau eine Session
//! weitergereicht, die sie am Ende schliesst.

use std::net::SocketAddr;
use std::time::Duration;

use schnick_core::{Result, SchnickError, VerbindungsId};
use schnick_protocol::Move;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

/// Groesse des Empfangspuffers fuer einen Zug
pub const LESEPUFFER_GROESSE: usize = 1024;

/// Exklusiv besessene Client-Verbindung
#[derive(Debug)]
pub struct Verbindung<S = TcpStream> {
    id: VerbindungsId,
    peer_addr: SocketAddr,
    stream: S,
}

impl<S> Verbindung<S> {
    /// Erstellt ein neues Handle fuer einen frisch angenommenen Stream
    pub fn neu(stream: S, peer_addr: SocketAddr) -> Self {
        Self {
            id: VerbindungsId::new(),
            peer_addr,
            stream,
        }
    }

    pub fn id(&self) -> VerbindungsId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}

impl<S> Verbindung<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Liest genau einen Zug mit einem einzelnen Read in einen eigenen Puffer
    ///
    /// Ein Read der 0 Bytes liefert (Client hat ohne Daten geschlossen)
    /// ergibt `Move::Invalid`. Ist `timeout` gesetzt, wird ein ueberlanges
    /// Warten als `SchnickError::Zeitlimit` gemeldet.
    pub async fn zug_lesen(&mut self, timeout: Option<Duration>) -> Result<Move> {
        let mut puffer = [0u8; LESEPUFFER_GROESSE];

        let gelesen = match timeout {
            Some(dauer) => tokio::time::timeout(dauer, self.stream.read(&mut puffer))
                .await
                .map_err(|_| {
                    SchnickError::Zeitlimit(format!("kein Zug innerhalb von {dauer:?}"))
                })??,
            None => self.stream.read(&mut puffer).await?,
        };

        if gelesen == 0 {
            tracing::debug!(verbindung = %self.id, peer = %self.peer_addr, "Leere Eingabe (EOF)");
        }
        Ok(Move::aus_bytes(&puffer[..gelesen]))
    }

    /// Sendet die Ergebnisnachricht in einem Stueck
    pub async fn antwort_senden(&mut self, text: &str) -> Result<()> {
        self.stream.write_all(text.as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Schliesst die Verbindung; Fehler beim Shutdown werden nur geloggt
    pub async fn schliessen(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            tracing::debug!(
                verbindung = %self.id,
                peer = %self.peer_addr,
                fehler = %e,
                "Shutdown fehlgeschlagen"
            );
        }
        // Stream wird durch Drop endgueltig geschlossen
    }
}
