use {
  action::Action,
  anyhow::{Context, ensure},
  app::App,
  async_trait::async_trait,
  chrono::Utc,
  client::Client,
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  error::FetchError,
  event::Event,
  feed::Feed,
  futures::future::{BoxFuture, FutureExt, Shared},
  help_view::HelpView,
  item::Item,
  list_view::ListView,
  notification::Notification,
  phase::Phase,
  pipeline::Pipeline,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  resource::Resource,
  retry::RetryPolicy,
  serde::{Deserialize, de::DeserializeOwned},
  slot::Slot,
  std::{
    backtrace::BacktraceStatus,
    collections::HashMap,
    env,
    fmt::{self, Debug, Display},
    fs::OpenOptions,
    io::{self, IsTerminal, Stdout, Write},
    path::PathBuf,
    process,
    str::FromStr,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
  },
  story::Story,
  thiserror::Error,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing_subscriber::{EnvFilter, prelude::*},
  transient_message::TransientMessage,
  transition::Transition,
  transport::{HttpTransport, Transport},
  url::Url,
  utils::{
    format_age, format_comments, format_points, now, truncate, wrap_text,
  },
};

#[cfg(test)]
use mock_transport::MockTransport;

mod action;
mod app;
mod client;
mod config;
mod effect;
mod error;
mod event;
mod feed;
mod help_view;
mod item;
mod list_view;
#[cfg(test)]
mod mock_transport;
mod notification;
mod phase;
mod pipeline;
mod resource;
mod retry;
mod slot;
mod story;
mod transient_message;
mod transition;
mod transport;
mod utils;

const ACCENT: Color = Color::Rgb(252, 102, 33);

const BASE_INDENT: &str = " ";

const DEFAULT_LOG_FILTER: &str = "topstories=info";

const HELP_STATUS: &str = "Press ? or esc to close help";

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home/g  jump to first story
  end/G   jump to last story

Actions:
  enter   open the selected story in your browser
  o       open the selected story in your browser
  r       reload the top stories
  q       quit
  esc     close help or quit
  ?       toggle this help
";

const HELP_TITLE: &str = "Help";

const ITEM_PAGE_URL: &str = "https://news.ycombinator.com/item?id=";

const LIST_STATUS: &str =
  "↑/k up • ↓/j down • enter open link • r refresh • q/esc quit • ? help";

const LOADING_STATUS: &str = "Loading top stories...";

const TITLE: &str = "TOP STORIES";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging(config: &Config) -> Result {
  let Some(path) = &config.log_file else {
    return Ok(());
  };

  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(file)),
    )
    .with(filter)
    .try_init()
    .context("could not initialize logging")?;

  Ok(())
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

async fn print_stories(
  pipeline: &mut Pipeline,
  out: &mut impl Write,
  err: &mut impl Write,
) -> Result {
  pipeline.refresh();
  pipeline.run_until_settled().await;

  let feed = pipeline.feed();

  if let Phase::Failed(error) = feed.phase() {
    return Err(error.clone()).context("could not load top stories");
  }

  let (_, total) = feed.progress();

  if total == 0 {
    writeln!(err, "No top stories")?;
    return Ok(());
  }

  let (failed, loaded) = (feed.failed_count(), feed.row_count());

  ensure!(loaded > 0, "could not load any of {total} top stories");

  let now = now();

  for story in feed.rows() {
    writeln!(out, "{:>3}. {}", story.rank, story.title)?;

    match story.display_host() {
      Some(host) => writeln!(out, "     Posted by {} ({host})", story.by)?,
      None => writeln!(out, "     Posted by {}", story.by)?,
    }

    writeln!(out, "     {}", story.summary(now))?;
  }

  if failed > 0 {
    tracing::warn!(failed, "some stories could not be loaded");
    writeln!(err, "Loaded {loaded} of {total} stories ({failed} failed)")?;
  }

  Ok(())
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let config = Config::from_env().context("invalid configuration")?;

  initialize_logging(&config)?;

  let transport = HttpTransport::new(config.timeout)?;

  let client = Client::new(Arc::new(transport), config.retry);

  let mut pipeline = Pipeline::new(client, &config);

  if !io::stdout().is_terminal() {
    return print_stories(
      &mut pipeline,
      &mut io::stdout().lock(),
      &mut io::stderr().lock(),
    )
    .await;
  }

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(pipeline);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BASE: &str = "https://api.test/v0";

  fn item(id: u64) -> String {
    format!(
      r#"{{"by":"user{id}","id":{id},"kids":[{id}0],"score":{id},"time":1700000000,"title":"Story {id}","url":"https://www.example.com/{id}"}}"#
    )
  }

  fn item_url(id: u64) -> String {
    format!("{BASE}/item/{id}.json")
  }

  async fn print(transport: MockTransport) -> (Result, String, String) {
    let config = Config {
      api_url: BASE.into(),
      page_size: 3,
      retry: RetryPolicy::none(),
      ..Config::default()
    };

    let client = Client::new(Arc::new(transport), config.retry);
    let mut pipeline = Pipeline::new(client, &config);

    let (mut out, mut err) = (Vec::new(), Vec::new());

    let result = print_stories(&mut pipeline, &mut out, &mut err).await;

    (
      result,
      String::from_utf8_lossy(&out).into_owned(),
      String::from_utf8_lossy(&err).into_owned(),
    )
  }

  fn top_url() -> String {
    format!("{BASE}/topstories.json")
  }

  #[tokio::test(start_paused = true)]
  async fn print_stories_fails_when_every_story_fails() {
    let transport = MockTransport::default().reply(&top_url(), "[1, 2, 3]");

    let (result, out, err) = print(transport).await;

    assert_eq!(
      result.unwrap_err().to_string(),
      "could not load any of 3 top stories"
    );

    assert_eq!(out, "");
    assert_eq!(err, "");
  }

  #[tokio::test(start_paused = true)]
  async fn print_stories_fails_when_index_fails() {
    let (result, out, _) = print(MockTransport::default()).await;

    assert_eq!(result.unwrap_err().to_string(), "could not load top stories");

    assert_eq!(out, "");
  }

  #[tokio::test(start_paused = true)]
  async fn print_stories_reports_empty_index() {
    let transport = MockTransport::default().reply(&top_url(), "[]");

    let (result, out, err) = print(transport).await;

    assert!(result.is_ok());
    assert_eq!(out, "");
    assert_eq!(err, "No top stories\n");
  }

  #[tokio::test(start_paused = true)]
  async fn print_stories_writes_ranked_rows_and_failures() {
    let transport = MockTransport::default()
      .reply(&top_url(), "[1, 2, 3, 4]")
      .reply(&item_url(1), &item(1))
      .reply_after(&item_url(2), Duration::from_millis(10), &item(2))
      .fail(&item_url(3), FetchError::transport(&item_url(3), "refused"));

    let (result, out, err) = print(transport).await;

    assert!(result.is_ok());

    let lines = out.lines().collect::<Vec<&str>>();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "  1. Story 1");
    assert_eq!(lines[1], "     Posted by user1 (example.com)");
    assert!(lines[2].starts_with("     1 point • 1 comment • "));
    assert_eq!(lines[3], "  2. Story 2");
    assert_eq!(lines[4], "     Posted by user2 (example.com)");
    assert!(lines[5].starts_with("     2 points • 1 comment • "));

    assert_eq!(err, "Loaded 2 of 3 stories (1 failed)\n");
  }
}
