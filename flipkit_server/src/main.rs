use dotenvy::dotenv;
use flipkit_server::{
    cli::{parse_command_line_args, seed_vendors, CliCommand},
    config::ServerConfig,
    server::run_server,
};
use log::info;

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = ServerConfig::from_env_or_default();
    match parse_command_line_args() {
        CliCommand::ShowHelp => {},
        CliCommand::SeedVendors(path) => match seed_vendors(&path, &config.database_url).await {
            Ok(n) => println!("Imported {n} new vendor records."),
            Err(e) => eprintln!("{e}"),
        },
        CliCommand::RunServer => {
            info!("🚀️ Starting server on {}:{}", config.host, config.port);
            match run_server(config).await {
                Ok(_) => println!("Bye!"),
                Err(e) => eprintln!("{e}"),
            }
        },
    }
}
