use std::collections::{HashMap, HashSet};

use bytes::Bytes;

/// Session cache of card image bytes, keyed by URL.
#[derive(Debug, Default)]
pub struct ImageCache {
    loaded: HashMap<String, Bytes>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl ImageCache {
    pub fn get(&self, url: &str) -> Option<&Bytes> {
        self.loaded.get(url)
    }

    /// URLs that still need downloading. Returned URLs are marked pending so
    /// a second call does not request them again.
    pub fn missing<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing = Vec::new();
        for url in urls {
            if url.is_empty()
                || self.loaded.contains_key(url)
                || self.pending.contains(url)
                || self.failed.contains(url)
            {
                continue;
            }
            self.pending.insert(url.to_owned());
            missing.push(url.to_owned());
        }
        missing
    }

    pub fn insert(&mut self, url: String, bytes: Option<Bytes>) {
        self.pending.remove(&url);
        match bytes {
            Some(b) => {
                self.loaded.insert(url, b);
            }
            None => {
                self.failed.insert(url);
            }
        }
    }
}

pub async fn download_image(client: reqwest::Client, url: String) -> (String, Option<Bytes>) {
    let bytes = match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => res.bytes().await.ok(),
        Ok(res) => {
            log::debug!("Image {} returned {}", url, res.status());
            None
        }
        Err(e) => {
            log::debug!("Image {} failed: {}", url, e);
            None
        }
    };
    (url, bytes)
}
