pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn catalog() -> LogCtx<ops::catalog::Catalog> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn search() -> LogCtx<ops::search::Search> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn load() -> LogCtx<ops::load::Load> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn links() -> LogCtx<ops::links::Links> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
