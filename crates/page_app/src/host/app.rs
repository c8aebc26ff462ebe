use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;
use page_core::{
    update, FormMount, FormSnapshot, Msg, PageMounts, PageState, StatusLine, VideoWidgetView,
};
use page_engine::{make_backend, EngineHandle, FeedSettings, ProxyFeedFetcher};
use page_logging::page_info;

use super::config::{self, PageConfig};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::render;
use super::status::StatusReporter;

#[derive(Debug, Parser)]
#[command(name = "page_app", about = "Terminal host for the page interaction layer")]
struct Cli {
    /// Path to the RON page configuration.
    #[arg(long, default_value = "page.ron")]
    config: PathBuf,

    /// Contact form field as name=value; repeatable. When given, one
    /// submission is performed after the page has loaded.
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value = "file")]
    log: LogDestination,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got {raw:?}")),
    }
}

/// Stand-in for the page's form element: the mutable field values that
/// snapshots are captured from and that a successful submission resets.
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    fn has_input(&self) -> bool {
        self.fields.iter().any(|(_, value)| !value.is_empty())
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::new(self.fields.clone())
    }

    /// Resets every field to its default (empty) value, keeping the fields
    /// themselves.
    pub fn clear(&mut self) {
        for (_, value) in &mut self.fields {
            value.clear();
        }
    }
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log);
    let config = config::load(&cli.config);
    run_page(config, cli.fields)
}

fn run_page(config: PageConfig, cli_fields: Vec<(String, String)>) -> anyhow::Result<()> {
    page_info!("page host starting (backend {:?})", config.backend);

    let mounts = PageMounts {
        contact_form: config.mounts.contact_form.then(|| FormMount {
            submit_label: config.mounts.submit_label.clone(),
        }),
        video_widget: config.mounts.video_widget,
        nav: config.mounts.nav,
    };

    let mut state = PageState::new(mounts);
    let mut fields = FormFields::new(cli_fields);
    let reporter = StatusReporter::new(config.status_mode);

    let engine = EngineHandle::new(
        make_backend(config.backend.kind()),
        Arc::new(ProxyFeedFetcher::new(FeedSettings {
            proxy_base: config.feed.proxy_base.clone(),
        })),
    );
    let runner = EffectRunner::new(engine, config.endpoint.clone(), config.feed.feed_url());

    // The explicit load entry point: fires once, controllers with absent
    // mounts simply never register.
    state = dispatch(state, Msg::PageLoaded, &runner, &mut fields, &reporter);
    state = settle_widget(state, &runner, &mut fields, &reporter);

    // One user-driven submission when the invocation supplied field values.
    if fields.has_input() && state.view().form.is_some() {
        let snapshot = fields.snapshot();
        state = dispatch(
            state,
            Msg::SubmitRequested { snapshot },
            &runner,
            &mut fields,
            &reporter,
        );
        state = settle_form(state, &runner, &mut fields, &reporter);
    }

    let view = state.view();
    for line in render::render_lines(&view) {
        println!("{line}");
    }
    if let Some(widget) = &view.widget {
        let html = render::widget_html(widget);
        if !html.is_empty() {
            println!("{html}");
        }
    }

    Ok(())
}

/// Applies one message, executes its effects, and reports any status change.
fn dispatch(
    state: PageState,
    msg: Msg,
    runner: &EffectRunner,
    fields: &mut FormFields,
    reporter: &StatusReporter,
) -> PageState {
    let before = current_status(&state);
    let (next, effects) = update(state, msg);
    runner.run(effects, fields);

    let after = current_status(&next);
    if after != before {
        if let Some(line) = &after {
            reporter.report(line);
        }
    }
    next
}

fn current_status(state: &PageState) -> Option<StatusLine> {
    state.view().form.and_then(|form| form.status)
}

/// Blocks until the widget leaves `Loading`. No deadline; the transport's
/// own timeout behavior decides when a hung load resolves.
fn settle_widget(
    mut state: PageState,
    runner: &EffectRunner,
    fields: &mut FormFields,
    reporter: &StatusReporter,
) -> PageState {
    while matches!(state.view().widget, Some(VideoWidgetView::Loading)) {
        state = drain_one(state, runner, fields, reporter);
    }
    state
}

/// Blocks until the in-flight submission completes and the control is
/// re-enabled.
fn settle_form(
    mut state: PageState,
    runner: &EffectRunner,
    fields: &mut FormFields,
    reporter: &StatusReporter,
) -> PageState {
    while state
        .view()
        .form
        .as_ref()
        .is_some_and(|form| form.control.disabled)
    {
        state = drain_one(state, runner, fields, reporter);
    }
    state
}

fn drain_one(
    mut state: PageState,
    runner: &EffectRunner,
    fields: &mut FormFields,
    reporter: &StatusReporter,
) -> PageState {
    let msgs = runner.poll();
    if msgs.is_empty() {
        thread::sleep(Duration::from_millis(20));
        return state;
    }
    for msg in msgs {
        state = dispatch(state, msg, runner, fields, reporter);
    }
    state
}
