//! Replay page snapshots through the render loop.
//!
//! Each JSON file is served as the page response for one pass; after the
//! pass the headless panel is saved as `pass-N.png`.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p firmware --bin replay --features emulator -- \
//!     --out snapshots home-1.json home-2.json
//! ```

// Desktop tooling: unwrap/expect/panic acceptable outside the firmware.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use firmware::{ApplicationController, ControllerConfig, HeadlessPanel, RemoteImageSource, REFRESH, TOUCH_CHANNEL};
use platform::image_cache_local::LocalImageCache;
use platform::{HttpClient, HttpError, HttpResponse, STATUS_OK};
use ui::{NoCallbacks, Page, RefreshType};

const BASE_URL: &str = "http://replay.local";

#[derive(Parser)]
#[command(name = "replay")]
#[command(about = "Render page snapshots to PNG through the e-paper engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Page responses (JSON), replayed in order
    #[arg(required = true)]
    pages: Vec<PathBuf>,
    /// Directory for the PNG snapshots
    #[arg(short, long, default_value = "replay-out")]
    out: PathBuf,
    /// Image cache directory holding `{name}_{w}x{h}.bin` files.
    /// Falls back to $IMAGE_CACHE, then `<out>/images`.
    #[arg(long)]
    images: Option<PathBuf>,
    /// Page the snapshots belong to (home, music)
    #[arg(long, default_value = "home")]
    page: String,
    /// Milliseconds of simulated time between passes
    #[arg(long, default_value_t = 1_000)]
    step_ms: u64,
}

/// Serves the current snapshot for the page URL; everything else is 404.
struct ReplayHttp {
    page_url: String,
    body: Vec<u8>,
}

impl HttpClient for ReplayHttp {
    async fn get(&mut self, url: &str, _timeout_ms: u32) -> Result<HttpResponse, HttpError> {
        if url == self.page_url {
            Ok(HttpResponse { status: STATUS_OK, body: self.body.clone() })
        } else {
            Ok(HttpResponse { status: 404, body: Vec::new() })
        }
    }

    async fn post(&mut self, url: &str, _body: &[u8]) -> Result<u16, HttpError> {
        info!(%url, "callback posted");
        Ok(STATUS_OK)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let page = Page::from_name(&cli.page).with_context(|| format!("unknown page '{}'", cli.page))?;
    std::fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;

    let cache = match cli.images {
        Some(dir) => LocalImageCache::new(&dir.to_string_lossy()),
        None => LocalImageCache::from_env()
            .unwrap_or_else(|| LocalImageCache::new(&cli.out.join("images").to_string_lossy())),
    };
    let image_http = ReplayHttp { page_url: String::new(), body: Vec::new() };
    let images = RemoteImageSource::new(image_http, cache, BASE_URL);
    let http = ReplayHttp { page_url: page.url(BASE_URL), body: Vec::new() };

    let config = ControllerConfig::default().with_base_url(BASE_URL).with_page(page);
    let mut controller = ApplicationController::new(
        config,
        HeadlessPanel::new(),
        http,
        images,
        NoCallbacks,
        &REFRESH,
        TOUCH_CHANNEL.receiver(),
    );

    let mut now_ms = 0_u64;
    for (pass, path) in cli.pages.iter().enumerate() {
        let body = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        controller.http_mut().body = body;
        if pass > 0 {
            REFRESH.request(RefreshType::RefetchElements);
        }

        match controller.tick(now_ms).await {
            Ok(report) => info!(
                pass,
                file = %path.display(),
                live = controller.store().len(),
                drawn = report.drain.drawn,
                failed = report.drain.failed,
                blitted = report.drain.blitted,
                "pass rendered"
            ),
            Err(e) => warn!(pass, file = %path.display(), error = %e, "pass failed"),
        }

        let png = cli.out.join(format!("pass-{pass}.png"));
        controller.panel().save_png(&png).with_context(|| format!("writing {}", png.display()))?;
        now_ms = now_ms.saturating_add(cli.step_ms);
    }

    info!(
        passes = cli.pages.len(),
        pushes = controller.panel().pushes(),
        blits = controller.panel().blits(),
        out = %cli.out.display(),
        "replay finished"
    );
    Ok(())
}
