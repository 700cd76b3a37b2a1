//! Helpers for turning a problem reference into a search query.

/// Extract the problem slug from a problem-page URL
/// (`…/problems/<slug>/…`).
pub fn slug_from_url(url: &str) -> Option<String> {
    let without_scheme = url.splitn(2, "://").last().unwrap_or(url);
    let path = without_scheme.splitn(2, '/').nth(1)?;
    let path = path.split(['?', '#']).next().unwrap_or("");
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    let idx = parts.iter().position(|p| *p == "problems")?;
    parts.get(idx + 1).map(|s| s.to_string())
}

/// Title-case a slug for display (`two-sum` → `Two Sum`).
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compose the search query the panel used: the problem title plus a
/// solution-video suffix.
pub fn search_query(title: &str) -> String {
    format!("{} LeetCode solution", title.trim())
}

/// Resolve a user-supplied topic (a problem URL, a bare slug, or a
/// free-form title) into a search query.
pub fn query_for_topic(topic: &str) -> String {
    if let Some(slug) = slug_from_url(topic) {
        return search_query(&title_from_slug(&slug));
    }
    let trimmed = topic.trim();
    if !trimmed.contains(' ') && trimmed.contains('-') {
        return search_query(&title_from_slug(trimmed));
    }
    search_query(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_full_url() {
        assert_eq!(
            slug_from_url("https://leetcode.com/problems/two-sum/description/"),
            Some("two-sum".to_string())
        );
    }

    #[test]
    fn slug_from_url_without_scheme() {
        assert_eq!(
            slug_from_url("leetcode.com/problems/merge-k-sorted-lists"),
            Some("merge-k-sorted-lists".to_string())
        );
    }

    #[test]
    fn slug_ignores_query_and_fragment() {
        assert_eq!(
            slug_from_url("https://leetcode.com/problems/two-sum/?envType=daily#top"),
            Some("two-sum".to_string())
        );
    }

    #[test]
    fn non_problem_urls_have_no_slug() {
        assert_eq!(slug_from_url("https://leetcode.com/problemset/all/"), None);
        assert_eq!(slug_from_url("two sum"), None);
    }

    #[test]
    fn titles_from_slugs() {
        assert_eq!(title_from_slug("two-sum"), "Two Sum");
        assert_eq!(
            title_from_slug("longest-substring-without-repeating-characters"),
            "Longest Substring Without Repeating Characters"
        );
        assert_eq!(title_from_slug("lru-cache"), "Lru Cache");
    }

    #[test]
    fn query_for_each_topic_shape() {
        assert_eq!(
            query_for_topic("https://leetcode.com/problems/two-sum/"),
            "Two Sum LeetCode solution"
        );
        assert_eq!(query_for_topic("two-sum"), "Two Sum LeetCode solution");
        assert_eq!(query_for_topic("Two Sum"), "Two Sum LeetCode solution");
    }
}
