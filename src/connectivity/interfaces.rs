use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceState {
    Active,
    Inactive,
}

/// The operating system's view of the network interfaces. An active interface does not
/// mean the internet is reachable.
#[async_trait]
pub trait NetworkInterfaces: Debug + Send + Sync {
    async fn current_state(&self) -> Result<InterfaceState, InterfaceError>;

    /// Yields every change of the interface state. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> watch::Receiver<InterfaceState>;
}

#[derive(Error, Debug)]
pub enum InterfaceError {
    #[error("unable to read network interfaces: {0}")]
    Io(#[from] io::Error),
}
