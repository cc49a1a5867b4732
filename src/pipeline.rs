use super::*;

/// Runs the feed's fetches and feeds the results back to it.
///
/// Every fetch runs as its own task on the runtime. Results come back over a
/// channel and are applied by whoever owns the pipeline, so the feed is only
/// ever touched from one place.
pub(crate) struct Pipeline {
  api_url: String,
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  feed: Feed,
  handle: Handle,
}

impl Pipeline {
  fn apply(&mut self, transition: Transition) -> Vec<Notification> {
    for effect in transition.effects {
      self.execute_effect(effect);
    }

    transition.notifications
  }

  fn execute_effect(&self, effect: Effect) {
    let (client, sender) = (self.client.clone(), self.event_tx.clone());

    match effect {
      Effect::FetchIndex { generation } => {
        let resource = Story::top(&self.api_url);

        self.handle.spawn(async move {
          let _ = sender.send(Event::Index {
            generation,
            result: client.try_fetch(&resource).await,
          });
        });
      }
      Effect::FetchStory {
        generation,
        id,
        slot,
      } => {
        let resource = Story::resource(&self.api_url, id);

        self.handle.spawn(async move {
          let _ = sender.send(Event::Story {
            generation,
            slot,
            story: client.fetch(&resource).await,
          });
        });
      }
    }
  }

  pub(crate) fn feed(&self) -> &Feed {
    &self.feed
  }

  pub(crate) fn new(client: Client, config: &Config) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      api_url: config.api_url.clone(),
      client,
      event_rx,
      event_tx,
      feed: Feed::new(config.page_size, config.offset),
      handle: Handle::current(),
    }
  }

  /// Waits for the next fetch to finish and applies it.
  pub(crate) async fn next(&mut self) -> Vec<Notification> {
    let Some(event) = self.event_rx.recv().await else {
      return Vec::new();
    };

    let transition = self.feed.handle_event(event);

    self.apply(transition)
  }

  /// Applies every result that has already arrived, without waiting.
  pub(crate) fn process_pending(&mut self) -> Vec<Notification> {
    let mut notifications = Vec::new();

    while let Ok(event) = self.event_rx.try_recv() {
      let transition = self.feed.handle_event(event);
      notifications.extend(self.apply(transition));
    }

    notifications
  }

  pub(crate) fn refresh(&mut self) -> Vec<Notification> {
    let transition = self.feed.refresh();

    self.apply(transition)
  }

  pub(crate) async fn run_until_settled(&mut self) -> Vec<Notification> {
    let mut notifications = Vec::new();

    while self.feed.is_loading() {
      notifications.extend(self.next().await);
    }

    notifications
  }
}
