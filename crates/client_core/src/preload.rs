use std::collections::HashSet;

use reqwest::Client;
use shared::domain::MenuItem;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    /// Binary 3D model, requested with `as="fetch"` and CORS.
    Model,
}

/// Page-level resource hints (`<link rel="preload">`).
pub trait ResourceHints {
    fn has_hint(&self, href: &str) -> bool;
    /// Returns whether a hint was actually issued.
    fn add_hint(&mut self, href: &str, kind: PreloadKind) -> bool;
}

/// In-memory hint list, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct HintRegistry {
    hints: Vec<(String, PreloadKind)>,
}

impl HintRegistry {
    pub fn hints(&self) -> &[(String, PreloadKind)] {
        &self.hints
    }
}

impl ResourceHints for HintRegistry {
    fn has_hint(&self, href: &str) -> bool {
        self.hints.iter().any(|(existing, _)| existing == href)
    }

    fn add_hint(&mut self, href: &str, kind: PreloadKind) -> bool {
        self.hints.push((href.to_string(), kind));
        true
    }
}

/// Warms the HTTP cache by firing a detached GET per hinted asset.
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpWarmupHints {
    http: Client,
    base: Url,
    issued: HashSet<String>,
}

impl HttpWarmupHints {
    pub fn new(http: Client, base: Url) -> Self {
        Self {
            http,
            base,
            issued: HashSet::new(),
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

impl ResourceHints for HttpWarmupHints {
    fn has_hint(&self, href: &str) -> bool {
        self.issued.contains(href)
    }

    fn add_hint(&mut self, href: &str, _kind: PreloadKind) -> bool {
        let Ok(url) = self.base.join(href) else {
            debug!(%href, "preload skipped, unresolvable url");
            return false;
        };
        self.issued.insert(href.to_string());

        let http = self.http.clone();
        tokio::spawn(async move {
            match http.get(url.clone()).send().await {
                Ok(response) => {
                    // Drain the body so the bytes actually land in any cache in front of us.
                    let status = response.status();
                    let _ = response.bytes().await;
                    debug!(%url, %status, "model preloaded");
                }
                Err(error) => debug!(%url, %error, "model preload failed"),
            }
        });
        true
    }
}

#[derive(Debug, Default)]
pub struct ModelPreloader<H> {
    hints: H,
}

impl<H: ResourceHints> ModelPreloader<H> {
    pub fn new(hints: H) -> Self {
        Self { hints }
    }

    /// Hints the first item's glb. Returns whether a new hint was issued.
    pub fn preload_first(&mut self, items: &[MenuItem]) -> bool {
        match items.first().and_then(MenuItem::glb) {
            Some(glb) => self.preload(glb),
            None => false,
        }
    }

    pub fn preload(&mut self, href: &str) -> bool {
        if self.hints.has_hint(href) {
            return false;
        }
        let added = self.hints.add_hint(href, PreloadKind::Model);
        if added {
            debug!(%href, "added model preload hint");
        }
        added
    }

    pub fn hints(&self) -> &H {
        &self.hints
    }
}

#[cfg(test)]
#[path = "tests/preload_tests.rs"]
mod tests;
