mod app;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::run().await
}
