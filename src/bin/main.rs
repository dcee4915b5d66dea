use std::{cell::Cell, rc::Rc};

use log::info;
use swipefeed_core::{
    ad::AdKind,
    app::{FeedApp, FeedConfig, TickResult},
    feed::{DEMO_VIDEOS, FeedCatalog, FeedItem, StaticFeedSource, VideoItem},
    input::FeedInput,
    ledger::MemoryLedger,
    render::Screen,
};

use ledger_sync::RetryingLedger;
use presenter::ConsolePresenter;
use script::{ScriptedInput, scroll_to};

#[path = "main/ledger_sync.rs"]
mod ledger_sync;
#[path = "main/presenter.rs"]
mod presenter;
#[path = "main/script.rs"]
mod script;

const TICK_MS: u64 = 50;
const SESSION_MS: u64 = 60_000;
const VIDEO_COUNT: usize = 16;
const NATIVE_AD_EVERY: u16 = 8;
const LEDGER_CAPACITY: usize = 128;
const LEDGER_STARTUP_FAILURES: u8 = 2;
const LEDGER_RETRY_BACKOFF_MIN_MS: u64 = 500;
const LEDGER_RETRY_BACKOFF_MAX_MS: u64 = 8_000;
const ITEM_HEIGHT_PX: f32 = 844.0;
const RESIZED_ITEM_HEIGHT_PX: f32 = 700.0;
const DEFAULT_VIEWER: &str = "me";
const VIEWER_ENV: &str = "SWIPEFEED_VIEWER";

const TITLES: [&str; 4] = [
    "Dicas Incríveis de React",
    "Paraíso Escondido no Brasil",
    "Receita Rápida de Pão",
    "Treino de 5 Minutos",
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let viewer = std::env::var(VIEWER_ENV).unwrap_or_else(|_| DEFAULT_VIEWER.to_owned());
    let ids: Vec<String> = (0..VIDEO_COUNT).map(|n| format!("clip-{n:02}")).collect();
    let videos: Vec<VideoItem<'_>> = ids
        .iter()
        .enumerate()
        .map(|(n, id)| {
            let demo = &DEMO_VIDEOS[n % DEMO_VIDEOS.len()];
            VideoItem {
                id: id.as_str(),
                creator_id: if n % 3 == 2 { viewer.as_str() } else { demo.creator_id },
                creator_name: if n % 3 == 2 { "Você" } else { demo.creator_name },
                title: TITLES[n % TITLES.len()],
                views: demo.views + n as u32 * 37,
                ..*demo
            }
        })
        .collect();
    let content = StaticFeedSource::new(&videos).with_native_ads(
        NATIVE_AD_EVERY,
        "anunciante_oficial",
        "Conheça o Novo App Premium",
    );

    let clock = Rc::new(Cell::new(0u64));
    let input = ScriptedInput::new(&timeline(), clock.clone());

    let mut backend = MemoryLedger::<LEDGER_CAPACITY>::new();
    backend.fail_next(LEDGER_STARTUP_FAILURES);
    let ledger = RetryingLedger::new(backend);

    let ads = ConsolePresenter::new(Some(AdKind::RewardedInterstitial));
    let config = FeedConfig {
        item_height_px: ITEM_HEIGHT_PX,
        app_open_ad: true,
        ..FeedConfig::default()
    };

    let mut app = FeedApp::new(content, input, ledger, ads, config);
    if !app.set_viewer(Some(viewer.as_str())) {
        info!("identity: running signed out");
    }
    info!(
        "swipefeed: session start viewer={:?} items={} tick={}ms",
        app.viewer(),
        app.content().item_count(),
        TICK_MS
    );

    let mut now_ms = 0;
    while now_ms <= SESSION_MS {
        clock.set(now_ms);
        if app.tick(now_ms) == TickResult::RenderRequested {
            app.with_screen(now_ms, |screen| render(now_ms, screen));
        }
        app.ledger_mut().flush_due(now_ms);
        now_ms += TICK_MS;
    }

    let wallet = app.wallet();
    info!(
        "wallet: balance={} watch={} ad_bonus={} creator={} rewards={} ads_completed={}",
        wallet.balance,
        wallet.viewer_earnings,
        wallet.ad_bonus_earnings,
        wallet.creator_earnings,
        wallet.rewards_granted,
        wallet.ads_completed
    );

    let ledger = app.ledger();
    let settled = ledger.backend().wallet_for(viewer.as_str());
    info!(
        "ledger: entries={} pending={} dropped={} settled_balance={} presented_ads={}",
        ledger.backend().entries().len(),
        ledger.pending(),
        ledger.dropped(),
        settled.balance,
        app.ads().presented()
    );
    for entry in ledger.backend().entries() {
        info!(
            "ledger: {:?} {} {:?} {}",
            entry.party, entry.account, entry.kind, entry.amount
        );
    }
}

/// Scripted gestures for one demo session.
fn timeline() -> Vec<(u64, FeedInput)> {
    let h = ITEM_HEIGHT_PX;
    vec![
        // App-open ad unlocks after 5 s; item 0 keeps accruing underneath.
        (2_000, FeedInput::AdDismiss),
        (5_100, FeedInput::AdDismiss),
        // Fling past the threshold of item 0 into the first interstitial.
        (9_000, scroll_to(1, h)),
        (9_050, scroll_to(3, h)),
        (9_100, scroll_to(5, h)),
        (10_000, FeedInput::AdCollect),
        (14_200, FeedInput::AdCollect),
        // Bounce around the triggered index.
        (15_000, scroll_to(4, h)),
        (15_500, scroll_to(5, h)),
        (24_000, scroll_to(10, h)),
        (29_100, FeedInput::AdCollect),
        // Rewarded interstitial fails to load and shows a placeholder.
        (30_000, scroll_to(12, h)),
        (35_100, FeedInput::AdCollect),
        (36_000, FeedInput::RequestRewardedAd),
        (36_500, scroll_to(2, h)),
        (51_100, FeedInput::AdCollect),
        (52_000, FeedInput::Resize {
            item_height_px: RESIZED_ITEM_HEIGHT_PX,
        }),
        (52_100, scroll_to(17, RESIZED_ITEM_HEIGHT_PX)),
        (53_000, scroll_to(99, RESIZED_ITEM_HEIGHT_PX)),
    ]
}

fn render(now_ms: u64, screen: Screen<'_>) {
    match screen {
        Screen::Empty { wallet } => {
            info!("[{:>6}ms] feed empty, balance={}", now_ms, wallet.balance);
        }
        Screen::Feed(view) => {
            let label = match view.item {
                FeedItem::Video(video) => video.title,
                FeedItem::NativeAd(ad) => ad.headline,
            };
            info!(
                "[{:>6}ms] {}/{} {:<28} progress={:>3}% rewarded={} views={} balance={}",
                now_ms,
                view.index + 1,
                view.total,
                label,
                view.progress_pct,
                view.rewarded,
                view.views,
                view.balance
            );
        }
        Screen::Ad { ad, behind } => {
            info!(
                "[{:>6}ms] ad {} placeholder={} {} over={:?}",
                now_ms,
                ad.title,
                ad.placeholder,
                if ad.can_close {
                    "closable".to_owned()
                } else {
                    format!("{}s", ad.seconds_left)
                },
                behind.map(|view| view.index)
            );
        }
    }
}
