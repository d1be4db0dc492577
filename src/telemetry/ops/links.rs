use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Links;

#[derive(Copy, Clone, Debug)]
pub enum Phase { FetchPlayer, ParseTabs, Dispatch, Join }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::FetchPlayer => "fetch_player",
        Phase::ParseTabs => "parse_tabs",
        Phase::Dispatch => "dispatch",
        Phase::Join => "join",
    }}
    fn span(&self) -> Span { match self {
        Phase::FetchPlayer => info_span!("fetch_player"),
        Phase::ParseTabs => info_span!("parse_tabs"),
        Phase::Dispatch => info_span!("dispatch"),
        Phase::Join => info_span!("join"),
    }}
}

impl OpMarker for Links {
    const NAME: &'static str = "links";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("links") }
}
