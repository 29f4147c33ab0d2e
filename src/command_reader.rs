use crate::screen::UiCommand;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::Sender;
use tracing::{error, instrument, warn};

/// Turns input lines into commands. The end of the input counts as quitting.
#[instrument(skip_all)]
pub async fn read_commands<R>(reader: R, tx: Sender<UiCommand>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let command = match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => continue,
            Ok(Some(line)) => match line.parse::<UiCommand>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("⚠️ {}", e);
                    continue;
                }
            },
            Ok(None) => UiCommand::Quit,
            Err(e) => {
                error!("❌ Unable to read commands: {}", e);
                UiCommand::Quit
            }
        };

        if tx.send(command).await.is_err() || command == UiCommand::Quit {
            return;
        }
    }
}
