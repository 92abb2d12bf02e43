//! lang-adjust demo
//!
//! Binds a title label and a quality dropdown to the language state, then
//! cycles through every available language and logs what the widgets show.
//! The language picked on first start is remembered in the config file.

use std::rc::Rc;

use anyhow::Context;
use lang_adjust::i18n::{self, SystemLocaleDetector};
use lang_adjust::storage::config;
use lang_adjust::ui::{Dropdown, Label};
use lang_adjust::AdjusterHub;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUALITY_KEYS: [&str; 3] = ["quality.low", "quality.medium", "quality.high"];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting lang-adjust v{}", env!("CARGO_PKG_VERSION"));

    let mut app_config = config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        config::AppConfig::default()
    });

    let state = i18n::init_language_state(&app_config.i18n, &SystemLocaleDetector)
        .context("failed to initialize languages")?;

    if app_config.i18n.language.is_none() {
        app_config.i18n.language = Some(state.current_language().id().to_string());
        if let Err(e) = config::save_config(&app_config) {
            tracing::warn!("Failed to remember startup language: {}", e);
        }
    }

    let hub = AdjusterHub::new(&state);

    let title = Label::new("", 24).with_fit(false, 40, 1).into_shared();
    let _title_adjuster =
        hub.attach_text_adjuster(&title, Some(hub.build_key_resolver("settings.title", None)));

    let caption = Label::new("", 18).into_shared();
    let quality = Dropdown::new(QUALITY_KEYS)
        .with_caption(Rc::clone(&caption))
        .into_shared();
    let resolvers = QUALITY_KEYS
        .iter()
        .map(|key| hub.build_key_resolver(*key, None))
        .collect();
    let _quality_adjuster = hub.attach_dropdown_adjuster(&quality, resolvers);

    for id in state.available_ids() {
        state
            .set_language(&id)
            .with_context(|| format!("failed to switch to {id}"))?;

        let title = title.borrow();
        let quality = quality.borrow();
        let options: Vec<&str> = (0..quality.option_count())
            .filter_map(|i| quality.option_label(i))
            .collect();

        tracing::info!(
            "[{}] title={:?} best_fit={} max={} min={} options={:?} caption={:?}",
            id,
            title.text(),
            title.best_fit(),
            title.max_fit_size(),
            title.min_fit_size(),
            options,
            caption.borrow().text()
        );
    }

    Ok(())
}
