//! Response compression negotiated from `Accept-Encoding`.
//!
//! Brotli and gzip are offered first, in that order, with zlib `deflate` as a
//! fallback for clients that accept nothing else.

use std::io::Write;
use std::sync::Arc;

use brotli::enc::BrotliEncoderParams;
use flate2::write::{GzEncoder, ZlibEncoder};
use tracing::{debug, warn};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// MIME types compressed by default.
const DEFAULT_MIME_TYPES: &[&str] = &[
    "text/plain",
    "text/css",
    "application/javascript",
    "text/javascript",
    "text/html",
    "application/xml",
    "text/xml",
    "application/json",
    "text/json",
    "application/wasm",
];

const BROTLI_QUALITY: i32 = 4;
const BROTLI_WINDOW: i32 = 22;

/// A content coding this stage can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Coding {
    Brotli,
    Gzip,
    Deflate,
}

impl Coding {
    /// Server preference, used to break q-value ties.
    const PREFERENCE: [Coding; 3] = [Coding::Brotli, Coding::Gzip, Coding::Deflate];

    fn as_str(self) -> &'static str {
        match self {
            Self::Brotli => "br",
            Self::Gzip => "gzip",
            Self::Deflate => "deflate",
        }
    }
}

/// Compresses response bodies when the client's `Accept-Encoding` allows it.
///
/// Only responses whose `content-type` is in the configured MIME list are
/// touched. Those always gain `vary: accept-encoding`, compressed or not.
pub struct Compression {
    mime_types: Vec<String>,
}

impl Compression {
    /// Fast compression over the default text MIME types.
    pub fn new() -> Self {
        Self {
            mime_types: DEFAULT_MIME_TYPES.iter().map(|m| (*m).to_owned()).collect(),
        }
    }

    /// Adds another eligible MIME type, e.g. `application/octet-stream`.
    pub fn with_mime_type(mut self, mime: &str) -> Self {
        self.mime_types.push(mime.to_ascii_lowercase());
        self
    }

    fn is_eligible(&self, res: &Response) -> bool {
        let Some(content_type) = res.header("content-type") else {
            return false;
        };
        let media_type = content_type.split(';').next().unwrap_or("").trim();
        self.mime_types.iter().any(|m| m.eq_ignore_ascii_case(media_type))
    }

    fn encode(&self, coding: Coding, body: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(body.len() / 2);
        match coding {
            Coding::Brotli => {
                let params = BrotliEncoderParams {
                    quality: BROTLI_QUALITY,
                    lgwin: BROTLI_WINDOW,
                    ..BrotliEncoderParams::default()
                };
                brotli::BrotliCompress(&mut &body[..], &mut out, &params)?;
                Ok(out)
            }
            Coding::Gzip => {
                let mut enc = GzEncoder::new(out, flate2::Compression::fast());
                enc.write_all(body)?;
                enc.finish()
            }
            Coding::Deflate => {
                let mut enc = ZlibEncoder::new(out, flate2::Compression::fast());
                enc.write_all(body)?;
                enc.finish()
            }
        }
    }
}

impl Default for Compression {
    fn default() -> Self { Self::new() }
}

impl Middleware for Compression {
    fn process(self: Arc<Self>, req: Request, next: Next) -> BoxFuture {
        // A list header may arrive split over several field lines.
        let accept = req.header_all("accept-encoding").collect::<Vec<_>>().join(", ");
        let is_head = req.method() == Method::Head;

        Box::pin(async move {
            let mut res = next.run(req).await;
            if is_head || !self.is_eligible(&res) {
                return res;
            }
            res.append_header("vary", "accept-encoding");

            let status = res.status_code();
            if res.header("content-encoding").is_some()
                || res.body().is_empty()
                || status == Status::NoContent.code()
                || status == Status::NotModified.code()
            {
                return res;
            }
            let Some(coding) = negotiate(&accept) else {
                return res;
            };

            match self.encode(coding, res.body()) {
                Ok(compressed) => {
                    let original = res.replace_body(compressed);
                    debug!(
                        encoding = coding.as_str(),
                        original = original.len(),
                        compressed = res.body().len(),
                        "compressed response body",
                    );
                    res.set_header("content-encoding", coding.as_str());
                    res.remove_header("content-length");
                }
                Err(e) => warn!(encoding = coding.as_str(), "compression failed, sending identity: {e}"),
            }
            res
        })
    }
}

/// Picks the coding to use for an `Accept-Encoding` value, if any.
///
/// `q=0` rejects a coding, `*` covers codings not named explicitly, and ties
/// go to br, then gzip, then deflate.
fn negotiate(accept: &str) -> Option<Coding> {
    let mut named: [Option<f32>; 3] = [None; 3];
    let mut wildcard = None;

    for item in accept.split(',') {
        let mut parts = item.split(';');
        let name = parts.next().unwrap_or("").trim();
        let q = parts
            .filter_map(|p| {
                let p = p.trim();
                p.strip_prefix("q=").or_else(|| p.strip_prefix("Q="))
            })
            .next()
            .map(|v| v.trim().parse::<f32>().unwrap_or(0.0))
            .unwrap_or(1.0);

        match name.to_ascii_lowercase().as_str() {
            "br" => named[0] = Some(q),
            "gzip" | "x-gzip" => named[1] = Some(q),
            "deflate" => named[2] = Some(q),
            "*" => wildcard = Some(q),
            _ => {}
        }
    }

    let mut best: Option<(Coding, f32)> = None;
    for (coding, q) in Coding::PREFERENCE.into_iter().zip(named) {
        let q = q.or(wildcard).unwrap_or(0.0);
        if q > 0.0 && best.is_none_or(|(_, top)| q > top) {
            best = Some((coding, q));
        }
    }
    best.map(|(coding, _)| coding)
}
