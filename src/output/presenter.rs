use std::io::{self, Write};

use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

/// Human output: a header line, then the bare result (always indented).
pub struct TextPresenter;
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        match env.meta.as_ref().and_then(|m| m.count) {
            Some(n) => writeln!(w, "Result: {} ({} items)", env.op, n)?,
            None => writeln!(w, "Result: {}", env.op)?,
        }
        serde_json::to_writer_pretty(&mut *w, &env.result).map_err(to_io)?;
        writeln!(w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
