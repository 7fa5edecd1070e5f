use std::any::Any;

/// Opens storage transactions. Every mutating friendship operation runs in
/// exactly one of them.
#[async_trait::async_trait]
pub trait TxManager: Send + Sync {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>>;
}

/// A live transaction. Dropping it without `commit` discards its writes.
#[async_trait::async_trait]
pub trait StorageTx<'t>: Send {
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
    async fn rollback(self: Box<Self>) -> anyhow::Result<()>;

    /// Checked access to the concrete transaction. Only `'static`
    /// transactions can offer it; borrowing ones return `None`.
    fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        None
    }
}
