#[tokio::main]
async fn main() {
    if let Err(e) = banglavoice_lib::run().await {
        banglavoice_lib::app_log!("[main] {e}");
        std::process::exit(1);
    }
}
