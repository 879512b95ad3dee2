fn has_known_scheme(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https" | "data"))
        .unwrap_or(false)
}

fn normalize_url(origin: &str, raw: &str) -> String {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if has_known_scheme(raw) {
        return raw.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if raw.starts_with('/') {
        format!("{origin}{raw}")
    } else {
        format!("{origin}/{raw}")
    }
}

fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn category_slug<'a>(href: &'a str, marker: &str) -> Option<&'a str> {
    let (_, tail) = href.rsplit_once(marker)?;
    let slug = tail.trim_matches('/');
    (!slug.is_empty()).then_some(slug)
}

fn image_source(img: ElementRef<'_>) -> Option<String> {
    IMAGE_SOURCE_ATTRS
        .iter()
        .filter_map(|name| img.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn background_image_url(style: &str) -> Option<&str> {
    let start = style.find("url(")? + "url(".len();
    let end = start + style[start..].find(')')?;
    let payload = style[start..end]
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim();
    (!payload.is_empty()).then_some(payload)
}

fn parent_background_image(anchor: ElementRef<'_>) -> Option<String> {
    let parent = anchor.parent().and_then(ElementRef::wrap)?;
    let style = parent.value().attr("style")?;
    if !style.contains("background-image") {
        return None;
    }
    background_image_url(style).map(ToString::to_string)
}

fn anchor_image_source(anchor: ElementRef<'_>, img_selector: &Selector) -> Option<String> {
    anchor
        .select(img_selector)
        .next()
        .and_then(image_source)
        .or_else(|| parent_background_image(anchor))
}

#[derive(Debug, Default)]
struct ListingScan {
    // counted before slug filtering
    matched: usize,
    records: Vec<CategoryRecord>,
}

fn scan_listing_html(html: &str, origin: &str, marker: &str) -> ListingScan {
    let doc = Html::parse_document(html);
    let (anchor_selector, img_selector) = match (Selector::parse("a[href]"), Selector::parse("img"))
    {
        (Ok(a), Ok(img)) => (a, img),
        _ => return ListingScan::default(),
    };

    let mut scan = ListingScan::default();
    let mut seen = HashSet::new();
    for anchor in doc.select(&anchor_selector) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if !href.contains(marker) {
            continue;
        }
        scan.matched += 1;

        let Some(slug) = category_slug(href, marker) else {
            continue;
        };
        if !seen.insert(slug.to_string()) {
            continue;
        }

        let name = normalize_text(&anchor.text().collect::<String>());
        let image_url =
            anchor_image_source(anchor, &img_selector).map(|raw| normalize_url(origin, &raw));
        scan.records.push(CategoryRecord {
            name,
            slug: slug.to_string(),
            url: normalize_url(origin, href),
            image_url,
        });
    }

    scan
}

fn is_product_image(img: &ElementRef<'_>) -> bool {
    img.value()
        .attr("class")
        .map(|class| {
            let class = class.to_lowercase();
            class.contains("product") || class.contains("item")
        })
        .unwrap_or(false)
}

fn is_upload_image(img: &ElementRef<'_>) -> bool {
    img.value()
        .attr("src")
        .map(|src| src.contains("upload"))
        .unwrap_or(false)
}

// Only the first matching element is consulted.
fn fallback_image_source(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = match Selector::parse("img") {
        Ok(s) => s,
        Err(_) => return None,
    };

    let candidate = doc
        .select(&selector)
        .find(is_product_image)
        .or_else(|| doc.select(&selector).find(is_upload_image))?;
    image_source(candidate)
}
