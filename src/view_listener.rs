use crate::screen::{ScreenState, render_view};
use tokio::sync::watch::Receiver;
use tracing::instrument;

#[instrument(skip_all)]
pub async fn view_listener(mut rx: Receiver<ScreenState>) {
    while rx.changed().await.is_ok() {
        let view = render_view(&rx.borrow_and_update());
        println!("\n{}", view);
    }
}
