use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Parser};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

include!("types.rs");
include!("fetch.rs");
include!("extract.rs");
include!("scan.rs");
include!("data_io.rs");
include!("runtime.rs");
