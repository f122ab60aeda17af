use std::{
    env,
    env::VarError,
    path::{Path, PathBuf},
};

use flipkit_engine::{db_types::SeedVendor, SqliteDatabase, VendorApi};

use crate::errors::ServerError;

pub enum CliCommand {
    RunServer,
    /// Import a JSON array of vendors and exit.
    SeedVendors(PathBuf),
    ShowHelp,
}

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn parse_command_line_args() -> CliCommand {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        None => CliCommand::RunServer,
        Some("--seed-vendors") => match args.next() {
            Some(path) => CliCommand::SeedVendors(PathBuf::from(path)),
            None => {
                eprintln!("--seed-vendors requires a path to a JSON file");
                display_help();
                CliCommand::ShowHelp
            },
        },
        Some(_) => {
            // We don't expect any other CLI args, so always print the help
            display_help();
            CliCommand::ShowHelp
        },
    }
}

/// Upsert the given seed file into the vendor table. Existing vendor ids are left untouched, so re-running a seed
/// is harmless.
pub async fn seed_vendors(path: &Path, database_url: &str) -> Result<usize, ServerError> {
    let raw = std::fs::read_to_string(path)?;
    let seed: Vec<SeedVendor> =
        serde_json::from_str(&raw).map_err(|e| ServerError::InvalidRequestBody(format!("Invalid seed file: {e}")))?;
    let db = SqliteDatabase::new_with_url(database_url, 1)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let inserted = VendorApi::new(db).import_vendors(&seed).await?;
    Ok(inserted)
}

fn display_help() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
    display_envs();
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 9] = [
        "RUST_LOG",
        "FK_HOST",
        "FK_PORT",
        "FK_DATABASE_URL",
        "FK_FRONTEND_URL",
        "FK_PAYSTACK_API_URL",
        "FK_GOOGLE_CLIENT_ID",
        "FK_GOOGLE_REDIRECT_URL",
        "FK_EXCHANGE_RATE_URL",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<28} {val:<15}");
    })
}
