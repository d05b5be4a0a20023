/// Entry point for the Dockdash container dashboard.
///
/// Connects to the local container engine and serves a web page listing the matching
/// containers with their current CPU and memory usage, with a button to start or stop each.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., invalid configuration, the engine client
/// cannot be created, or the listen address cannot be bound).
///
/// # Examples
///
/// ```bash
/// DASHBOARD_NAME_FILTER=mc- DASHBOARD_LISTEN_ADDR=:8080 RUST_LOG=info cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    dockdash::run().await
}
