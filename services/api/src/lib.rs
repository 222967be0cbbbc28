mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use injury_comp::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
