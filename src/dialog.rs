//! Data and close handles of a simple modal dialog.
//!
//! `open` hands out two halves: the component half reads the injected data and closes the dialog,
//! the caller half awaits the result. Rendering is up to the host.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot::{self, error::TryRecvError, Receiver, Sender};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogData {
    pub title: String,
    pub message: String,
}

impl DialogData {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Opens a dialog showing `data`.
pub fn open<R>(data: DialogData) -> (DialogRef<R>, DialogHandle<R>) {
    let (tx, rx) = oneshot::channel();

    tracing::debug!(title = %data.title, "dialog opened");

    (
        DialogRef {
            rx,
            outcome: None,
        },
        DialogHandle {
            data,
            tx: Some(tx),
        },
    )
}

/// Component side: read-only data plus the close action.
#[derive(Debug)]
pub struct DialogHandle<R> {
    data: DialogData,
    tx: Option<Sender<Option<R>>>,
}

impl<R> DialogHandle<R> {
    pub fn data(&self) -> &DialogData {
        &self.data
    }

    pub fn is_open(&self) -> bool {
        self.tx.is_some()
    }

    /// Closes the dialog with an optional result. Returns `false` if it was already closed.
    pub fn close(&mut self, result: Option<R>) -> bool {
        match self.tx.take() {
            Some(tx) => {
                tracing::debug!(title = %self.data.title, "dialog closed");
                // The caller may have dropped its half already, nobody is left to notify then.
                let _ = tx.send(result);
                true
            }
            None => false,
        }
    }
}

/// Caller side: observes how the dialog was closed.
///
/// A handle dropped without an explicit close counts as closed without result. To stop waiting
/// after a while, wrap `after_closed` in `tokio::time::timeout`.
#[derive(Debug)]
pub struct DialogRef<R> {
    rx: Receiver<Option<R>>,
    outcome: Option<Option<R>>,
}

impl<R> DialogRef<R> {
    /// Resolves once the dialog is closed, to its result.
    pub async fn after_closed(self) -> Option<R> {
        if let Some(outcome) = self.outcome {
            return outcome;
        }

        self.rx.await.unwrap_or(None)
    }

    /// Returns whether the dialog has been closed, without waiting.
    pub fn is_closed(&mut self) -> bool {
        self.poll();
        self.outcome.is_some()
    }

    /// The result, once the dialog is closed.
    pub fn try_result(&mut self) -> Option<&Option<R>> {
        self.poll();
        self.outcome.as_ref()
    }

    fn poll(&mut self) {
        if self.outcome.is_some() {
            return;
        }

        match self.rx.try_recv() {
            Ok(result) => self.outcome = Some(result),
            Err(TryRecvError::Closed) => self.outcome = Some(None),
            Err(TryRecvError::Empty) => {}
        }
    }
}
