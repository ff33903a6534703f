// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::future::Future;
use tokio::time::Instant;
use tracing::info;

/// Await `work` and log how long it took under `label`
pub async fn timed<F: Future>(label: &'static str, work: F) -> F::Output {
    let start = Instant::now();
    let output = work.await;
    let elapsed = start.elapsed();
    info!(
        label,
        elapsed_ms = elapsed.as_millis() as u64,
        "{} finished in {:.6}s",
        label,
        elapsed.as_secs_f64()
    );
    output
}
