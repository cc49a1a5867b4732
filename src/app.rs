use super::*;

pub(crate) struct App {
  help: HelpView,
  list_height: usize,
  pipeline: Pipeline,
  transient_message: Option<TransientMessage>,
  view: ListView,
}

impl App {
  fn apply_notifications(&mut self, notifications: Vec<Notification>) {
    for notification in notifications {
      match notification {
        Notification::Completed { failed, loaded } => {
          let (_, total) = self.pipeline.feed().progress();

          let mut message = format!("Loaded {loaded} of {total} stories");

          if failed > 0 {
            message.push_str(&format!(" ({failed} failed)"));
          }

          self.set_transient_message(message);
        }
        Notification::Failed { error } => {
          self.set_transient_message(format!("error: {error}"));
        }
        Notification::Inserted { id, row } => {
          tracing::trace!(id, row, "inserting row");
          self.view.insert(row);
        }
        Notification::Reset => self.view.reset(),
      }
    }
  }

  fn dispatch(&mut self, action: Action) -> bool {
    let page = self.list_height.saturating_sub(1).max(1);

    match action {
      Action::HideHelp => self.help.hide(),
      Action::None => {}
      Action::OpenSelected => self.open_selected(),
      Action::PageDown => self.view.page_down(page),
      Action::PageUp => self.view.page_up(page),
      Action::Quit => return true,
      Action::Refresh => {
        let notifications = self.pipeline.refresh();
        self.apply_notifications(notifications);
      }
      Action::SelectFirst => self.view.set_selected(0),
      Action::SelectLast => self.view.select_last(),
      Action::SelectNext => self.view.select_next(),
      Action::SelectPrevious => self.view.select_previous(),
      Action::ShowHelp => self.help.show(),
    }

    false
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.list_height = layout[1].height as usize;

    let header = Paragraph::new(Line::from(Span::styled(
      format!("{BASE_INDENT}{TITLE}"),
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    frame.render_widget(header, layout[0]);

    let feed = self.pipeline.feed();

    let list_items: Vec<ListItem> = if feed.row_count() == 0 {
      let text = match feed.phase() {
        Phase::Failed(_) => "Could not load top stories. Press r to try again.",
        Phase::Idle | Phase::LoadingDetails | Phase::LoadingIndex => {
          LOADING_STATUS
        }
        Phase::Ready => "No stories to show.",
      };

      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(text),
      ]))]
    } else {
      let now = now();

      feed
        .rows()
        .map(|story| Self::story_list_item(story, layout[1].width, now))
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(self.view.selected_index())
      .with_offset(self.view.offset());

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.view.set_offset(list_state.offset());

    let dim = Style::default().fg(Color::DarkGray);
    let status = Paragraph::new(self.status()).style(dim);

    frame.render_widget(status, layout[2]);

    self.help.draw(frame);
  }

  pub(crate) fn new(pipeline: Pipeline) -> Self {
    let mut app = Self {
      help: HelpView::default(),
      list_height: 0,
      pipeline,
      transient_message: None,
      view: ListView::default(),
    };

    let notifications = app.pipeline.refresh();

    app.apply_notifications(notifications);

    app
  }

  fn open_selected(&mut self) {
    let Some(url) = self
      .view
      .selected_index()
      .and_then(|row| self.pipeline.feed().story(row))
      .map(Story::open_url)
    else {
      return;
    };

    match webbrowser::open(&url) {
      Ok(()) => {
        self.set_transient_message(format!(
          "Opened in browser: {}",
          truncate(&url, 80)
        ));
      }
      Err(error) => {
        tracing::warn!(%error, url, "could not open link");
        self.set_transient_message(format!("Could not open link: {error}"));
      }
    }
  }

  fn process_pending_events(&mut self) {
    if self
      .transient_message
      .as_ref()
      .is_some_and(TransientMessage::is_expired)
    {
      self.transient_message = None;
    }

    let notifications = self.pipeline.process_pending();

    self.apply_notifications(notifications);
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(100))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let action = if self.help.is_visible() {
        HelpView::handle_key(key)
      } else {
        Action::from_key(key)
      };

      if self.dispatch(action) {
        break;
      }
    }

    Ok(())
  }

  fn set_transient_message(&mut self, message: String) {
    self.transient_message = Some(TransientMessage::new(message));
  }

  fn status(&self) -> String {
    if self.help.is_visible() {
      return HELP_STATUS.into();
    }

    if let Some(transient) = &self.transient_message {
      return transient.text().to_string();
    }

    let feed = self.pipeline.feed();

    match feed.phase() {
      Phase::Failed(_) => {
        "Could not load top stories • r retry • q quit".into()
      }
      Phase::Idle | Phase::Ready => LIST_STATUS.into(),
      Phase::LoadingDetails => {
        let (settled, total) = feed.progress();
        format!("Loading stories {settled}/{total}...")
      }
      Phase::LoadingIndex => LOADING_STATUS.into(),
    }
  }

  fn story_list_item(
    story: &Story,
    available_width: u16,
    now: i64,
  ) -> ListItem<'static> {
    let rank = format!("{:>3}. ", story.rank);
    let indent = format!("{BASE_INDENT}{}", " ".repeat(rank.chars().count()));

    let wrap_width = (available_width as usize)
      .saturating_sub(indent.chars().count())
      .max(1);

    let mut lines = Vec::new();

    let title = wrap_text(&story.title, wrap_width);

    for (i, line) in title.into_iter().enumerate() {
      let prefix = if i == 0 {
        Span::styled(
          format!("{BASE_INDENT}{rank}"),
          Style::default().fg(ACCENT),
        )
      } else {
        Span::raw(indent.clone())
      };

      lines.push(Line::from(vec![
        prefix,
        Span::styled(line, Style::default().fg(Color::White)),
      ]));
    }

    let posted_by = match story.display_host() {
      Some(host) => format!("Posted by {} ({host})", story.by),
      None => format!("Posted by {}", story.by),
    };

    for detail in [posted_by, story.summary(now)] {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(detail, Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }
}
