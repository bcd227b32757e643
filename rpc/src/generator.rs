use tokio::sync::mpsc::{channel, Receiver, Sender};

/// Errors related with [`Generator`] and [`GeneratorYielder`]
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The [`Generator`] half was dropped or closed
    #[error("the generator is closed")]
    UnableToInsert,
}

/// Consumer half of a bounded channel from [`tokio`]. It is the server side source of the items of a stream procedure.
///
/// The other half of the channel is given to the [`GeneratorYielder`]
///
/// Its capacity is one: a [`GeneratorYielder`] can't get more than one item ahead of the consumer.
pub struct Generator<M>(Receiver<M>);

impl<M: Send + 'static> Generator<M> {
    /// Creates the channel and returns a [`Generator`] and its [`GeneratorYielder`]
    pub fn create() -> (Self, GeneratorYielder<M>) {
        let (sender, receiver) = channel(1);
        (Self(receiver), GeneratorYielder::new(sender))
    }

    /// Wait for the next item. `None` once every [`GeneratorYielder`] is dropped and the items are consumed
    pub async fn next(&mut self) -> Option<M> {
        self.0.recv().await
    }

    pub fn close(&mut self) {
        self.0.close()
    }
}

/// Producer half for a [`Generator`]
pub struct GeneratorYielder<M>(Sender<M>);

impl<M> GeneratorYielder<M> {
    fn new(sender: Sender<M>) -> Self {
        Self(sender)
    }

    /// Hand the item to the [`Generator`], waiting while the previous one wasn't consumed yet
    pub async fn r#yield(&self, item: M) -> Result<(), GeneratorError> {
        self.0
            .send(item)
            .await
            .map_err(|_| GeneratorError::UnableToInsert)
    }
}

impl<M> Clone for GeneratorYielder<M> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{Generator, GeneratorError};

    #[tokio::test]
    async fn test_items_are_received_in_order() {
        let (mut generator, yielder) = Generator::create();

        tokio::spawn(async move {
            for i in 0..3 {
                yielder.r#yield(i).await.unwrap();
            }
        });

        assert_eq!(generator.next().await, Some(0));
        assert_eq!(generator.next().await, Some(1));
        assert_eq!(generator.next().await, Some(2));
        assert_eq!(generator.next().await, None);
    }

    #[tokio::test]
    async fn test_yield_fails_when_closed() {
        let (mut generator, yielder) = Generator::<u8>::create();
        generator.close();

        let result = yielder.r#yield(1).await;
        assert!(matches!(result, Err(GeneratorError::UnableToInsert)));
    }
}
