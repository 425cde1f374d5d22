// src/scrape/mod.rs
//! Fetch fan-out shared by both sources.
//!
//! Each unit of work is one document. Units are fetched by tokio tasks behind
//! a semaphore and sent back over a channel; the single collector parses each
//! body as it arrives and files the result under the unit's index, so the
//! assembled output keeps discovery order however the fetches interleave.

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, warn};
use url::Url;

use crate::{
    fetch::{FetchError, Fetcher},
    parse::Parsed,
    summary::UnitStats,
};

pub mod oua;
pub mod polish;

const CHANNEL_CAPACITY: usize = 100;

/// One document to fetch, plus whatever the parser needs to tag its rows.
#[derive(Debug, Clone)]
pub struct Unit<C> {
    pub url: Url,
    pub context: C,
}

struct Fetched<C> {
    index: usize,
    url: Url,
    context: C,
    body: Result<String, FetchError>,
}

fn spawn_fetches<F, C>(
    fetcher: Arc<F>,
    units: Vec<Unit<C>>,
    concurrency: usize,
) -> mpsc::Receiver<Fetched<C>>
where
    F: Fetcher,
    C: Send + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));

    for (index, unit) in units.into_iter().enumerate() {
        let fetcher = Arc::clone(&fetcher);
        let tx = tx.clone();
        let sem = Arc::clone(&sem);
        tokio::spawn(async move {
            let Ok(_permit) = sem.acquire_owned().await else {
                return;
            };
            let body = fetcher.fetch(&unit.url).await;
            let _ = tx
                .send(Fetched {
                    index,
                    url: unit.url,
                    context: unit.context,
                    body,
                })
                .await;
        });
    }
    // drop the original sender so `rx.recv()` ends once every task has reported
    drop(tx);
    rx
}

/// Fetches every unit and runs `parse` on each body. A failed fetch or a
/// page without the expected content counts against `stats` and yields
/// nothing; it never stops the other units.
pub async fn fetch_and_parse<F, C, T>(
    fetcher: Arc<F>,
    units: Vec<Unit<C>>,
    concurrency: usize,
    stats: &mut UnitStats,
    mut parse: impl FnMut(&C, &str) -> Parsed<T>,
) -> Vec<(C, T)>
where
    F: Fetcher,
    C: Send + 'static,
{
    let total = units.len();
    stats.attempted += total;
    let mut slots: Vec<Option<(C, T)>> = (0..total).map(|_| None).collect();

    let mut rx = spawn_fetches(fetcher, units, concurrency);
    let mut done = 0usize;
    while let Some(fetched) = rx.recv().await {
        done += 1;
        let Fetched {
            index,
            url,
            context,
            body,
        } = fetched;
        match body {
            Ok(html) => match parse(&context, &html) {
                Parsed::Data(t) => {
                    stats.with_data += 1;
                    slots[index] = Some((context, t));
                }
                Parsed::NoData(reason) => {
                    debug!(%url, reason, "no data");
                    stats.no_data += 1;
                }
            },
            Err(e) => {
                warn!(error = %e, "fetch failed; skipping unit");
                stats.fetch_failed += 1;
            }
        }
        if done % 50 == 0 {
            debug!(done, total, "progress");
        }
    }

    slots.into_iter().flatten().collect()
}
