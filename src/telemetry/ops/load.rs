use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Load;

#[derive(Copy, Clone, Debug)]
pub enum Phase { FetchTitle, ParseTitle }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::FetchTitle => "fetch_title",
        Phase::ParseTitle => "parse_title",
    }}
    fn span(&self) -> Span { match self {
        Phase::FetchTitle => info_span!("fetch_title"),
        Phase::ParseTitle => info_span!("parse_title"),
    }}
}

impl OpMarker for Load {
    const NAME: &'static str = "load";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("load") }
}
