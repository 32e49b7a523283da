use engine_logging::{engine_debug, engine_info};

use crate::page::BrowserPage;
use crate::settings::PaginationSettings;
use crate::types::PageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationReport {
    pub scrolls: u32,
    /// False when the iteration cap stopped the loop.
    pub converged: bool,
    pub final_height: u64,
}

/// Reveals lazily loaded results by scrolling until the document height stops
/// changing or `max_iterations` scrolls have been made.
///
/// This is polling, not event driven: unusually slow loading can end the loop
/// one dwell too early.
pub async fn expand<P>(page: &mut P, settings: &PaginationSettings) -> Result<PaginationReport, PageError>
where
    P: BrowserPage + ?Sized,
{
    let mut last_height = page.document_height().await?;
    let mut scrolls = 0;

    while scrolls < settings.max_iterations {
        page.scroll_to_bottom().await?;
        scrolls += 1;
        tokio::time::sleep(settings.dwell).await;

        let height = page.document_height().await?;
        engine_debug!("Scroll {}: height {} -> {}", scrolls, last_height, height);
        if height == last_height {
            engine_info!("Pagination converged after {} scrolls", scrolls);
            return Ok(PaginationReport {
                scrolls,
                converged: true,
                final_height: height,
            });
        }
        last_height = height;
    }

    engine_info!("Pagination stopped at the cap of {} scrolls", settings.max_iterations);
    Ok(PaginationReport {
        scrolls,
        converged: false,
        final_height: last_height,
    })
}
