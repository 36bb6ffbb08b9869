//! Schnick Client – Einstiegspunkt
//!
//! Serveradresse aus `SCHNICK_SERVER` (Standard: 127.0.0.1:12345).
//! Der Zug kommt aus dem ersten Argument oder wird interaktiv abgefragt.

use std::io::Write;

use anyhow::{Context, Result};
use schnick_client::{spielen, STANDARD_SERVER};
use schnick_observability::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    // Ohne Logging spielt der Client trotzdem
    if let Err(e) = schnick_observability::logging_initialisieren("warn", LogFormat::Text) {
        eprintln!("Logging nicht verfuegbar: {e}");
    }

    let server = std::env::var("SCHNICK_SERVER").unwrap_or_else(|_| STANDARD_SERVER.into());

    let zug = match std::env::args().nth(1) {
        Some(zug) => zug,
        None => zug_abfragen()?,
    };

    println!("Connecting to {server}, waiting for an opponent...");
    let ergebnis = spielen(server.as_str(), &zug).await?;
    println!("Result: {ergebnis}");
    Ok(())
}

fn zug_abfragen() -> Result<String> {
    print!("Enter your move (rock, paper, scissors): ");
    std::io::stdout().flush()?;

    let mut zeile = String::new();
    std::io::stdin()
        .read_line(&mut zeile)
        .context("Zug konnte nicht von stdin gelesen werden")?;
    Ok(zeile.trim().to_string())
}
