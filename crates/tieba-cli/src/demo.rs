use std::cell::RefCell;
use std::time::Duration;

use colored::Colorize;
use tracing::info;

use tieba_app::{
    App, AppConfig, AuthTab, Collection, FormField, ItemId, Page, RenderSignal, RenderSurface,
    UiEvent,
};
use tieba_fabric::{debounce, ToastChange, VirtualClock};
use tieba_gate::names;
use tieba_store::{InMemoryBackend, PreferenceStore};
use tieba_thread::PostReactions;
use tieba_types::{CommentId, Severity, Timestamp};

/// Virtual time covered by one real-time sleep.
const TICK: Duration = Duration::from_millis(50);

/// Accepted playback speeds.
pub const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.01..=1000.0;

/// Prints render signals as they arrive.
struct TerminalSurface {
    started: Timestamp,
    now: Timestamp,
}

impl TerminalSurface {
    fn line(&self, what: impl std::fmt::Display) {
        let elapsed = self.now.saturating_since(&self.started).as_millis();
        println!("{} {}", format!("[{elapsed:>6} ms]").dimmed(), what);
    }
}

impl RenderSurface for TerminalSurface {
    fn render(&mut self, signal: RenderSignal) {
        match signal {
            RenderSignal::Toast(ToastChange::Added {
                message, severity, ..
            }) => {
                let text = format!("toast [{severity}] {message}");
                match severity {
                    Severity::Error => self.line(text.red()),
                    Severity::Success => self.line(text.green()),
                    Severity::Info => self.line(text.blue()),
                }
            }
            RenderSignal::Toast(change) => self.line(format!("{change:?}").dimmed()),
            RenderSignal::Navigate(route) => self.line(format!("→ {}", route.to_url()).cyan().bold()),
            other => self.line(format!("{other:?}")),
        }
    }
}

/// One scripted action.
enum Step {
    Pause(Duration),
    Event(UiEvent),
    /// Typed into the search box; searches once typing pauses.
    Type(&'static str),
}

fn script(first_comment: CommentId, own_post: ItemId) -> Vec<Step> {
    use Step::*;
    let ms = Duration::from_millis;
    vec![
        Event(UiEvent::PageEntered(Page::PostDetail)),
        Pause(ms(300)),
        Event(UiEvent::LikePost),
        Pause(ms(400)),
        Event(UiEvent::CommentSubmitted("   ".into())),
        Pause(ms(400)),
        Event(UiEvent::CommentSubmitted("Great write-up, thanks!".into())),
        Pause(ms(400)),
        Event(UiEvent::LikeComment(first_comment)),
        Event(UiEvent::SortChanged("hot".into())),
        Pause(ms(400)),
        Event(UiEvent::ToggleReply(first_comment)),
        Pause(ms(600)),
        Event(UiEvent::ReplySubmitted {
            comment: first_comment,
            text: "Agreed.".into(),
        }),
        Pause(ms(500)),
        Type("r"),
        Pause(ms(100)),
        Type("ru"),
        Pause(ms(100)),
        Type("rust"),
        Pause(ms(600)),
        Event(UiEvent::PageEntered(Page::Auth)),
        Event(UiEvent::LoginSubmitted {
            fields: vec![
                FormField::required(names::USERNAME, "ab"),
                FormField::required(names::PASSWORD, "secret"),
            ],
            remember_me: false,
        }),
        Pause(ms(300)),
        Event(UiEvent::FieldEdited {
            form: AuthTab::Login,
            field: names::USERNAME.into(),
        }),
        Event(UiEvent::LoginSubmitted {
            fields: vec![
                FormField::required(names::USERNAME, "rustacean"),
                FormField::required(names::PASSWORD, "secret"),
            ],
            remember_me: true,
        }),
        Event(UiEvent::PageEntered(Page::Profile)),
        Pause(ms(200)),
        Event(UiEvent::DeletePost(own_post)),
    ]
}

pub fn run(config: AppConfig, speed: f64) -> anyhow::Result<()> {
    anyhow::ensure!(
        SPEED_RANGE.contains(&speed),
        "speed must be between {} and {}, got {speed}",
        SPEED_RANGE.start(),
        SPEED_RANGE.end()
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session(config, speed))
}

async fn session(config: AppConfig, speed: f64) -> anyhow::Result<()> {
    let clock = VirtualClock::from_wall_clock();
    let surface = TerminalSurface {
        started: clock.now(),
        now: clock.now(),
    };
    let prefs = PreferenceStore::new(InMemoryBackend::new());
    let mut app = App::new(config, prefs, clock, surface);

    let seeded_at = Timestamp::from_millis(clock.now().millis.saturating_sub(3_600_000));
    let first = app
        .thread_mut()
        .seed_comment("old_timer", "First!", seeded_at, 12);
    app.thread_mut()
        .seed_comment("lurker", "Bookmarked.", seeded_at, 30);
    app.set_post(PostReactions::new(1_234, false));
    let own_post = ItemId::new("p-1")?;
    app.profile_mut()
        .seed(Collection::Posts, own_post.clone(), "My first post");

    let typed = RefCell::new(Vec::new());
    let mut search = debounce(Duration::from_millis(300), |query: String| {
        typed.borrow_mut().push(query)
    });

    info!(speed, "demo started");
    for step in script(first, own_post) {
        match step {
            Step::Event(event) => app.dispatch(event),
            Step::Type(text) => search.call(app.now(), text.to_string()),
            Step::Pause(span) => {
                let mut left = span;
                while !left.is_zero() {
                    let step = left.min(TICK);
                    tokio::time::sleep(real_time(step, speed)?).await;
                    tick(&mut app, step);
                    left -= step;
                    search.poll(app.now());
                    for query in typed.borrow_mut().drain(..) {
                        app.dispatch(UiEvent::SearchSubmitted(query));
                    }
                }
            }
        }
    }

    while let Some(due) = app.next_due() {
        let span = due.saturating_since(&app.now());
        tokio::time::sleep(real_time(span, speed)?).await;
        tick(&mut app, span);
    }
    info!("demo finished");
    Ok(())
}

/// Wall-clock time to sleep for `span` of virtual time.
fn real_time(span: Duration, speed: f64) -> anyhow::Result<Duration> {
    Ok(Duration::try_from_secs_f64(span.as_secs_f64() / speed)?)
}

fn tick(app: &mut App<TerminalSurface>, by: Duration) {
    let now = app.now().plus(by);
    app.surface_mut().now = now;
    app.advance(by);
}
