fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

fn render_event(event: &ScrapeEvent) {
    match event {
        ScrapeEvent::ListingRequested { url } => info!("fetching listing page {url}"),
        ScrapeEvent::ListingFetched { url, status } => {
            info!("listing page fetched: status={status} url={url}")
        }
        ScrapeEvent::AnchorsMatched { count } => info!("{count} category links found"),
        ScrapeEvent::Category(record) => match &record.image_url {
            Some(image_url) => info!(
                "category '{}' slug={} image={image_url}",
                record.name, record.slug
            ),
            None => info!(
                "category '{}' slug={} image=not found",
                record.name, record.slug
            ),
        },
        ScrapeEvent::FallbackStarted { pending } => {
            info!("checking category pages for {pending} categories without an image")
        }
        ScrapeEvent::FallbackChecking { name, url } => debug!("checking '{name}' at {url}"),
        ScrapeEvent::FallbackResolved { name, image_url } => {
            info!("image found for '{name}': {image_url}")
        }
        ScrapeEvent::FallbackMissed { name } => info!("no image on the page of '{name}'"),
        ScrapeEvent::FallbackFailed { name, reason } => {
            warn!("page of '{name}' could not be fetched: {reason}")
        }
    }
}

async fn run_pipeline(config: &ScrapeConfig) -> Result<Vec<CategoryRecord>, ScrapeError> {
    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let (tx, mut rx) = mpsc::unbounded_channel::<ScrapeEvent>();

    let scrape = async move {
        let result = resolve_categories(config, &fetcher, &tx).await;
        drop(tx);
        result
    };
    let render = async {
        while let Some(event) = rx.recv().await {
            render_event(&event);
        }
    };
    let (result, ()) = tokio::join!(scrape, render);

    let records = result?;
    write_categories(&config.output_path, &records)?;
    Ok(records)
}

fn report_summary(config: &ScrapeConfig, records: &[CategoryRecord]) {
    info!(
        "saved {} categories to {}",
        records.len(),
        config.output_path.display()
    );

    let missing = categories_without_image(records);
    if !missing.is_empty() {
        warn!("categories without an image ({}):", missing.len());
        for name in missing {
            warn!("  - {name}");
        }
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = ScrapeConfig::from(&cli);

    match run_pipeline(&config).await {
        Ok(records) => {
            report_summary(&config, &records);
            info!("finished: categories={}", records.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            info!("finished: categories=0");
            ExitCode::FAILURE
        }
    }
}
