//! CLI module for the auth service
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server
//! - `migrate`: create the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// PMP Auth Service - email and password authentication with signed tokens
#[derive(Parser)]
#[command(name = "pmp-auth-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Create the PostgreSQL schema and exit
    Migrate,
}
