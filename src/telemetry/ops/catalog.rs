use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Catalog;

#[derive(Copy, Clone, Debug)]
pub enum Phase { FetchPage, ParseBlocks }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::FetchPage => "fetch_page",
        Phase::ParseBlocks => "parse_blocks",
    }}
    fn span(&self) -> Span { match self {
        Phase::FetchPage => info_span!("fetch_page"),
        Phase::ParseBlocks => info_span!("parse_blocks"),
    }}
}

impl OpMarker for Catalog {
    const NAME: &'static str = "catalog";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("catalog") }
}
