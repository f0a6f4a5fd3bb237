mod app;
mod dom;
mod logging;
mod storage;

fn main() {
    logging::init();
    if let Err(e) = app::boot() {
        tracing::error!(error = ?e, "portal failed to boot");
    }
}
