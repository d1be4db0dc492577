use std::sync::Arc;

use scraper::Html;
use serde::Serialize;
use tokio::task::JoinHandle;
use url::Url;

use crate::extractor::{Extractor, ExtractorError, LinkSink, SubtitleSink};

use super::normalize::{absolute_url, text_of};
use super::selectors::*;

/// One streaming-provider tab of the player and the URL its "open" button leads to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceTab {
    pub name: String,
    pub target: String,
}

/// Player markup -> source tabs, in tab order.
///
/// A tab's `href="#id"` names the pane holding its open-source button; tabs whose
/// pane or button is missing are skipped.
pub fn parse_source_tabs(payload: &str, base: &Url) -> Vec<SourceTab> {
    let frag = Html::parse_fragment(payload);
    frag.select(&SOURCE_TAB)
        .filter_map(|tab| {
            let name = text_of(tab);
            let fragment = tab.value().attr("href")?.trim_start_matches('#');
            if fragment.is_empty() {
                return None;
            }
            let Some(pane) = frag.select(&PANE).find(|el| el.value().id() == Some(fragment)) else {
                tracing::warn!(source = %name, pane = %fragment, "source tab without pane skipped");
                return None;
            };
            let target = pane
                .select(&OPEN_SOURCE)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|h| absolute_url(base, h));
            let Some(target) = target else {
                tracing::warn!(source = %name, "source pane without open button skipped");
                return None;
            };
            Some(SourceTab { name, target })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceOutcome {
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl DispatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> Vec<&SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok()).collect()
    }
}

/// Extractor tasks already running, one per source tab.
///
/// Dropping this detaches the tasks; [`LinkDispatch::join`] waits for all of them
/// and reports each source's outcome.
#[derive(Debug)]
pub struct LinkDispatch {
    tasks: Vec<(SourceTab, JoinHandle<Result<(), ExtractorError>>)>,
}

impl LinkDispatch {
    /// Spawns every extraction before returning; none waits on another.
    pub fn spawn(
        tabs: Vec<SourceTab>,
        extractor: Arc<dyn Extractor>,
        subtitles: SubtitleSink,
        links: LinkSink,
    ) -> Self {
        let tasks = tabs
            .into_iter()
            .map(|tab| {
                let extractor = extractor.clone();
                let subtitles = subtitles.clone();
                let links = links.clone();
                let target = tab.target.clone();
                let source = tab.name.clone();
                let handle = tokio::spawn(async move {
                    let res = extractor.extract(&target, subtitles, links).await;
                    if let Err(e) = &res {
                        tracing::warn!(source = %source, target = %target, error = %e, "source extraction failed");
                    }
                    res
                });
                (tab, handle)
            })
            .collect();
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &SourceTab> {
        self.tasks.iter().map(|(tab, _)| tab)
    }

    pub async fn join(self) -> DispatchReport {
        let mut outcomes = Vec::with_capacity(self.tasks.len());
        for (tab, handle) in self.tasks {
            let error = match handle.await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(join_err) => Some(format!("extractor task aborted: {join_err}")),
            };
            outcomes.push(SourceOutcome { source: tab.name, target: tab.target, error });
        }
        DispatchReport { outcomes }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::extractor::mock::RecordingExtractor;
    use crate::extractor::{ExtractorLink, SubtitleFile};

    const PLAYER_HTML: &str = r##"
      <div class="playerContainer">
        <ul class="players">
          <li><a href="#vidoza">Vidoza</a></li>
          <li><a href="#streamtape">Streamtape</a></li>
          <li><a href="#upstream">Upstream</a></li>
        </ul>
        <div class="tab-content">
          <div id="vidoza"><a class="buttonprch" href="/watch/f/vidoza/abc">Otwórz</a></div>
          <div id="streamtape"><a class="buttonprch" href="https://streamtape.example/e/xyz">Otwórz</a></div>
          <div id="upstream"><a class="buttonprch" href="//upstream.example/embed-q1.html">Otwórz</a></div>
        </div>
      </div>"##;

    fn base() -> Url {
        Url::parse("https://ekino-tv.pl/").unwrap()
    }

    fn sinks() -> (SubtitleSink, LinkSink, Arc<Mutex<Vec<ExtractorLink>>>, Arc<Mutex<Vec<SubtitleFile>>>) {
        let links: Arc<Mutex<Vec<ExtractorLink>>> = Arc::default();
        let subs: Arc<Mutex<Vec<SubtitleFile>>> = Arc::default();
        let (l, s) = (links.clone(), subs.clone());
        let subtitle_sink: SubtitleSink = Arc::new(move |f: SubtitleFile| s.lock().unwrap().push(f));
        let link_sink: LinkSink = Arc::new(move |x: ExtractorLink| l.lock().unwrap().push(x));
        (subtitle_sink, link_sink, links, subs)
    }

    #[test]
    fn tabs_resolve_to_pane_buttons() {
        let tabs = parse_source_tabs(PLAYER_HTML, &base());
        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs[0], SourceTab { name: "Vidoza".into(), target: "https://ekino-tv.pl/watch/f/vidoza/abc".into() });
        assert_eq!(tabs[1].target, "https://streamtape.example/e/xyz");
        assert_eq!(tabs[2].target, "https://upstream.example/embed-q1.html");
    }

    #[test]
    fn tabs_without_pane_or_button_are_skipped() {
        let html = r##"<ul class="players">
            <li><a href="#gone">Gone</a></li>
            <li><a href="#empty">Empty</a></li>
            <li><a href="#">Blank</a></li>
          </ul>
          <div id="empty"><span>nic</span></div>"##;
        assert!(parse_source_tabs(html, &base()).is_empty());
    }

    #[tokio::test]
    async fn three_tabs_dispatch_three_concurrent_extractions() {
        let extractor = Arc::new(RecordingExtractor::new().with_barrier(3));
        let (subs, links, got_links, got_subs) = sinks();

        let dispatch = LinkDispatch::spawn(parse_source_tabs(PLAYER_HTML, &base()), extractor.clone(), subs, links);
        assert_eq!(dispatch.len(), 3);

        let report = dispatch.join().await;
        assert_eq!(report.succeeded(), 3, "{:?}", report.failed());
        let mut calls = extractor.calls();
        calls.sort();
        assert_eq!(
            calls,
            [
                "https://ekino-tv.pl/watch/f/vidoza/abc",
                "https://streamtape.example/e/xyz",
                "https://upstream.example/embed-q1.html",
            ]
        );
        assert_eq!(got_links.lock().unwrap().len(), 3);
        assert_eq!(got_subs.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn partial_failure_shows_up_in_report_only() {
        let extractor = Arc::new(RecordingExtractor::new().failing_on("streamtape"));
        let (subs, links, got_links, _) = sinks();

        let report = LinkDispatch::spawn(parse_source_tabs(PLAYER_HTML, &base()), extractor, subs, links)
            .join()
            .await;
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.succeeded(), 2);
        let failed = report.failed();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].source, "Streamtape");
        assert_eq!(got_links.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn dropped_dispatch_keeps_running() {
        let extractor = Arc::new(RecordingExtractor::new());
        let (subs, links, got_links, _) = sinks();

        drop(LinkDispatch::spawn(parse_source_tabs(PLAYER_HTML, &base()), extractor.clone(), subs, links));

        for _ in 0..100 {
            if got_links.lock().unwrap().len() == 3 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(extractor.calls().len(), 3);
        assert_eq!(got_links.lock().unwrap().len(), 3);
    }
}
