fn send_event(tx: &UnboundedSender<ScrapeEvent>, event: ScrapeEvent) {
    let _ = tx.send(event);
}

async fn listing_scan<F: PageFetcher>(
    config: &ScrapeConfig,
    fetcher: &F,
    tx: &UnboundedSender<ScrapeEvent>,
) -> Result<Vec<CategoryRecord>, ScrapeError> {
    send_event(
        tx,
        ScrapeEvent::ListingRequested {
            url: config.listing_url.clone(),
        },
    );
    let page = fetcher
        .get(&config.listing_url, config.listing_timeout)
        .await
        .map_err(ScrapeError::Listing)?;
    send_event(
        tx,
        ScrapeEvent::ListingFetched {
            url: config.listing_url.clone(),
            status: page.status,
        },
    );

    let scan = scan_listing_html(&page.body, &config.origin, &config.path_marker);
    send_event(
        tx,
        ScrapeEvent::AnchorsMatched {
            count: scan.matched,
        },
    );
    for record in &scan.records {
        send_event(tx, ScrapeEvent::Category(record.clone()));
    }

    Ok(scan.records)
}

async fn fallback_scan<F: PageFetcher>(
    config: &ScrapeConfig,
    fetcher: &F,
    records: &mut [CategoryRecord],
    tx: &UnboundedSender<ScrapeEvent>,
) {
    let pending = records.iter().filter(|r| r.image_url.is_none()).count();
    send_event(tx, ScrapeEvent::FallbackStarted { pending });

    for record in records.iter_mut().filter(|r| r.image_url.is_none()) {
        send_event(
            tx,
            ScrapeEvent::FallbackChecking {
                name: record.name.clone(),
                url: record.url.clone(),
            },
        );

        match fetcher.get(&record.url, config.fallback_timeout).await {
            Ok(page) => match fallback_image_source(&page.body) {
                Some(raw) => {
                    let image_url = normalize_url(&config.origin, &raw);
                    send_event(
                        tx,
                        ScrapeEvent::FallbackResolved {
                            name: record.name.clone(),
                            image_url: image_url.clone(),
                        },
                    );
                    record.image_url = Some(image_url);
                }
                None => send_event(
                    tx,
                    ScrapeEvent::FallbackMissed {
                        name: record.name.clone(),
                    },
                ),
            },
            Err(err) => send_event(
                tx,
                ScrapeEvent::FallbackFailed {
                    name: record.name.clone(),
                    reason: err.to_string(),
                },
            ),
        }

        tokio::time::sleep(config.fallback_delay).await;
    }
}

async fn resolve_categories<F: PageFetcher>(
    config: &ScrapeConfig,
    fetcher: &F,
    tx: &UnboundedSender<ScrapeEvent>,
) -> Result<Vec<CategoryRecord>, ScrapeError> {
    let mut records = listing_scan(config, fetcher, tx).await?;
    fallback_scan(config, fetcher, &mut records, tx).await;
    Ok(records)
}
