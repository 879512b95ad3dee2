const DEFAULT_ORIGIN: &str = "https://www.canvas701.com";
const DEFAULT_LISTING_URL: &str = "https://www.canvas701.com/kanvas-kategorileri";
const DEFAULT_PATH_MARKER: &str = "/kanvas-tablolar/";
const DEFAULT_OUTPUT_PATH: &str = "canvas701_categories.json";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const DEFAULT_FALLBACK_DELAY_MS: u64 = 1000;

const LISTING_TIMEOUT: Duration = Duration::from_secs(30);
const FALLBACK_TIMEOUT: Duration = Duration::from_secs(15);

// highest priority first
const IMAGE_SOURCE_ATTRS: [&str; 3] = ["src", "data-src", "data-lazy-src"];

#[derive(Debug, Parser, Clone)]
#[command(
    name = "cat701",
    version,
    about = "Collect category links and thumbnail images from a listing page into JSON"
)]
struct Cli {
    #[arg(value_name = "LISTING_URL", default_value = DEFAULT_LISTING_URL)]
    listing_url: String,

    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    #[arg(long, value_name = "URL", default_value = DEFAULT_ORIGIN)]
    origin: String,

    #[arg(long, value_name = "PATH", default_value = DEFAULT_PATH_MARKER)]
    path_marker: String,

    #[arg(long, value_name = "UA", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, value_name = "MS", default_value_t = DEFAULT_FALLBACK_DELAY_MS)]
    delay_ms: u64,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone)]
struct ScrapeConfig {
    // no trailing slash
    origin: String,
    listing_url: String,
    path_marker: String,
    user_agent: String,
    listing_timeout: Duration,
    fallback_timeout: Duration,
    fallback_delay: Duration,
    output_path: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            listing_url: DEFAULT_LISTING_URL.to_string(),
            path_marker: DEFAULT_PATH_MARKER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listing_timeout: LISTING_TIMEOUT,
            fallback_timeout: FALLBACK_TIMEOUT,
            fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl From<&Cli> for ScrapeConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            origin: cli.origin.trim().trim_end_matches('/').to_string(),
            listing_url: cli.listing_url.trim().to_string(),
            path_marker: cli.path_marker.clone(),
            user_agent: cli.user_agent.clone(),
            fallback_delay: Duration::from_millis(cli.delay_ms),
            output_path: cli.output.clone(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct CategoryRecord {
    name: String,
    slug: String,
    url: String,
    image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FetchedPage {
    status: u16,
    body: String,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with http {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
enum ScrapeError {
    #[error("http client setup failed: {0}")]
    Client(#[source] reqwest::Error),
    #[error("listing page unavailable: {0}")]
    Listing(#[source] FetchError),
    #[error("could not encode categories: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScrapeEvent {
    ListingRequested {
        url: String,
    },
    ListingFetched {
        url: String,
        status: u16,
    },
    AnchorsMatched {
        count: usize,
    },
    Category(CategoryRecord),
    FallbackStarted {
        pending: usize,
    },
    FallbackChecking {
        name: String,
        url: String,
    },
    FallbackResolved {
        name: String,
        image_url: String,
    },
    FallbackMissed {
        name: String,
    },
    FallbackFailed {
        name: String,
        reason: String,
    },
}
