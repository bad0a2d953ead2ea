/// Rock Paper Scissor studio
///
/// Single-page browser front-end: pick an image, see it previewed, press
/// Predict and read the raw class scores. Served by a synchronous tiny_http
/// server; the page needs no JavaScript framework.
///
/// Run with:
///   cargo run --bin studio --release -- --model best-model.json
/// Then open http://127.0.0.1:7878

mod handlers;
mod render;
mod routes;
mod state;
mod util;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::{Arc, Mutex};
use tiny_http::Server;
use tracing::info;

use rps_predict::cli::ModelArgs;
use rps_predict::logging::init_tracing;
use state::StudioState;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to serve on
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: String,

    #[command(flatten)]
    model: ModelArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let server = Server::http(&args.addr)
        .map_err(|e| anyhow!("failed to bind {}: {}", args.addr, e))?;
    let shared_state = Arc::new(Mutex::new(StudioState::new(args.model.predictor())));

    info!(addr = %args.addr, model = %args.model.model.display(), "studio listening on http://{}", args.addr);

    // Each request runs on its own thread; predictions additionally run on
    // worker threads so the page can render "Predicting..." meanwhile.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
