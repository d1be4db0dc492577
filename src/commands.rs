use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::Instrument;

use crate::extractor::{ExtractorLink, LinkSink, SubtitleFile, SubtitleSink};
use crate::output;
use crate::provider::{DispatchReport, Provider};
use crate::telemetry;
use crate::telemetry::ops::links::Phase as LinksPhase;

#[derive(Args)]
pub struct SearchCmd {
    pub query: String,
}

#[derive(Args)]
pub struct LoadCmd {
    /// Title page URL, as returned by `catalog` or `search`
    pub url: String,
}

#[derive(Args)]
pub struct LinksCmd {
    /// Title page URL or raw player markup
    pub data: String,
}

pub fn info(provider: &Provider) -> Result<()> {
    output::emit_result("info", &provider.info())
}

pub async fn catalog(provider: &Provider) -> Result<()> {
    let categories = provider.catalog().await.context("catalog")?;
    telemetry::catalog().result(&categories)
}

pub async fn search(provider: &Provider, args: SearchCmd) -> Result<()> {
    let hits = provider.search(&args.query).await.with_context(|| format!("search {:?}", args.query))?;
    telemetry::search().result(&hits)
}

pub async fn load(provider: &Provider, args: LoadCmd) -> Result<()> {
    let log = telemetry::load();
    let detail = match provider.load(&args.url).await {
        Ok(d) => d,
        Err(e) if e.is_login_wall() => {
            log.warn("title needs a logged-in session; retrying will not help");
            return Err(e.into());
        }
        Err(e) => return Err(anyhow::Error::new(e).context(format!("load {}", args.url))),
    };
    log.result(&detail)
}

#[derive(Serialize)]
struct LinksResult {
    links: Vec<ExtractorLink>,
    subtitles: Vec<SubtitleFile>,
    #[serde(flatten)]
    report: DispatchReport,
}

pub async fn links(provider: &Provider, args: LinksCmd) -> Result<()> {
    let log = telemetry::links();
    let found_links: Arc<Mutex<Vec<ExtractorLink>>> = Arc::default();
    let found_subs: Arc<Mutex<Vec<SubtitleFile>>> = Arc::default();

    let link_sink: LinkSink = {
        let found = found_links.clone();
        Arc::new(move |link: ExtractorLink| {
            if let Ok(mut v) = found.lock() {
                v.push(link);
            }
        })
    };
    let subtitle_sink: SubtitleSink = {
        let found = found_subs.clone();
        Arc::new(move |sub: SubtitleFile| {
            if let Ok(mut v) = found.lock() {
                v.push(sub);
            }
        })
    };

    let dispatch = provider.load_links(&args.data, subtitle_sink, link_sink).await.context("load links")?;
    // The process exits after printing, so wait for every source here.
    let report = dispatch.join().instrument(log.span(&LinksPhase::Join)).await;
    log.info_kv("sources finished", [("ok", report.succeeded().to_string()), ("failed", report.failed().len().to_string())]);
    for failed in report.failed() {
        log.warn_kv("source failed", [("source", failed.source.clone()), ("target", failed.target.clone())]);
    }

    let result = LinksResult {
        links: std::mem::take(&mut *found_links.lock().map_err(|_| anyhow::anyhow!("link sink poisoned"))?),
        subtitles: std::mem::take(&mut *found_subs.lock().map_err(|_| anyhow::anyhow!("subtitle sink poisoned"))?),
        report,
    };
    log.result(&result)
}
