//! Resolution of `src`-style references.
//!
//! [§ 2.4 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
//!
//! This is deliberately small: absolute references pass through, everything
//! else is joined onto the document base. It is not a URL Standard parser.

/// Schemes treated as absolute references.
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "data:", "file:"];

/// Whether `href` already names a resource without needing a base.
#[must_use]
pub fn is_absolute(href: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|prefix| href.starts_with(prefix))
}

/// Resolve a potentially relative reference against a base URL or path.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// Without a base, relative references are returned unchanged so they can
/// still be read as local paths.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    if is_absolute(href) {
        return href.to_string();
    }

    let Some(base) = base_url else {
        return href.to_string();
    };

    if let Some(rest) = href.strip_prefix("//") {
        // Protocol-relative reference: keep the base's scheme.
        let scheme = base.split_once(':').map_or("http", |(scheme, _)| scheme);
        return format!("{scheme}://{rest}");
    }

    if href.starts_with('/') {
        // Origin-relative reference: keep scheme and authority.
        return match base.find("://") {
            Some(scheme_end) => {
                let after_scheme = &base[scheme_end + 3..];
                let origin_len = after_scheme.find('/').unwrap_or(after_scheme.len());
                format!("{}{href}", &base[..scheme_end + 3 + origin_len])
            }
            None => href.to_string(),
        };
    }

    let base_dir = base.rsplit_once('/').map_or("", |(dir, _)| dir);
    let joined = if base_dir.is_empty() {
        href.to_string()
    } else {
        format!("{base_dir}/{href}")
    };
    remove_dot_segments(&joined)
}

/// [RFC 3986 § 5.2.4](https://www.rfc-editor.org/rfc/rfc3986#section-5.2.4)
/// Collapse `.` and `..` path segments. The authority part of a URL is never
/// popped.
fn remove_dot_segments(path: &str) -> String {
    let (prefix, rest) = match path.find("://") {
        Some(scheme_end) => {
            let after = &path[scheme_end + 3..];
            let split = scheme_end + 3 + after.find('/').unwrap_or(after.len());
            path.split_at(split)
        }
        None => ("", path),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "." => {}
            ".." => {
                // Never pop the leading empty segment of an absolute path.
                if segments.len() > 1 || segments.first().is_some_and(|s| !s.is_empty()) {
                    let _ = segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    format!("{prefix}{}", segments.join("/"))
}
