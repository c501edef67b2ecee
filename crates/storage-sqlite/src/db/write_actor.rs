use super::DbPool;
use crate::errors::StorageError;
use centsible_core::errors::Result;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A job takes the writer's dedicated connection and returns a core Result.
// Box<dyn Any + Send> erases the job's return type across the channel.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
///
/// SQLite allows a single writer at a time; all mutations are funneled
/// through one actor that owns a dedicated connection and processes jobs
/// serially inside immediate transactions.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor holds one pooled connection for its whole lifetime
/// and terminates when every `WriteHandle` has been dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            // Each job runs inside an immediate transaction. StorageError
            // implements From<diesel::result::Error>, so diesel errors map
            // cleanly back to core errors at the boundary.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Ignore error if the requester has gone away.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
