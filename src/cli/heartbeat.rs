use std::time::Duration;

use clap::Parser;
use reqwest::{Client, Url};

use crate::prelude::*;

/// Booking monitor ping sent after a successful submission. Monitoring is
/// best-effort: a failed ping never fails the reservation itself.
#[derive(Parser)]
pub struct HeartbeatArgs {
    /// Monitoring endpoint notified of every submitted reservation.
    #[clap(long = "heartbeat-url", env = "LABDESK_HEARTBEAT_URL")]
    pub url: Option<Url>,
}

impl HeartbeatArgs {
    pub async fn send(&self, reservation_id: &str) {
        if let Some(url) = &self.url
            && let Err(error) = Self::send_fallible(ping_url(url, reservation_id)).await
        {
            warn!("failed to notify the booking monitor: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(url: Url) -> Result {
        info!("notifying the booking monitor…");
        Client::builder().timeout(Duration::from_secs(3)).build()?.post(url).send().await?;
        Ok(())
    }
}

/// The submitted reservation identifier rides along as a query parameter so
/// the monitor can correlate pings with bookings.
fn ping_url(url: &Url, reservation_id: &str) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("reservation", reservation_id);
    url
}
