// Trend research unit tests with a mocked search provider

use adforge::search::*;
use adforge::story::Channel;
use adforge::themes::*;
use chrono::NaiveDate;
use mockall::mock;
use mockall::predicate::*;

mock! {
    pub Search {}

    impl WebSearch for Search {
        fn web_search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>, SearchError>;
        fn image_search(&self, query: &str, max_results: u32) -> Result<Vec<ImageSearchResult>, SearchError>;
    }
}

fn spring() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 10).unwrap()
}

fn result(title: &str, description: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        description: description.to_string(),
        url: "https://trends.example".to_string(),
    }
}

#[test]
fn test_research_queries_each_template_once() {
    let mut search = MockSearch::new();
    search
        .expect_web_search()
        .with(eq("trending products Canada Spring 2026"), eq(5))
        .times(1)
        .returning(|_, _| Ok(vec![]));
    search
        .expect_web_search()
        .with(eq("popular products Amazon Canada Spring 2026"), eq(5))
        .times(1)
        .returning(|_, _| Ok(vec![result("Canadian shoppers love these", "popular picks")]));

    let themes = research_themes(&search, &[Channel::AmazonCa], spring());
    let ca = &themes[&Channel::AmazonCa];
    assert_eq!(ca.len(), 2);
    assert_eq!(ca[0].name, "Spring Picks \u{2013} Canada");
    assert!(ca[0].rationale.contains("Trend signal: \"canadian shoppers love these popular picks...\""));
    assert!(ca[1].rationale.contains("Trend signal"));
}

#[test]
fn test_rate_limited_search_still_yields_themes() {
    let mut search = MockSearch::new();
    search
        .expect_web_search()
        .returning(|_, _| Err(SearchError::RateLimited));

    let themes = research_themes(&search, &[Channel::AmazonBeauty, Channel::Amazon], spring());
    assert_eq!(themes.keys().copied().collect::<Vec<_>>(), vec![Channel::AmazonBeauty, Channel::Amazon]);
    for list in themes.values() {
        assert!(list.iter().all(|t| !t.rationale.contains("Trend signal")));
    }
}

#[test]
fn test_unmatched_results_leave_rationale_plain() {
    let themes = extract_themes_at(
        &[result("Stock market update", "Shares closed lower")],
        Channel::AmazonHome,
        spring(),
    );
    assert_eq!(themes, candidate_themes(Channel::AmazonHome, spring()));
}

#[test]
fn test_image_search_failures_recover() {
    let mut search = MockSearch::new();
    search
        .expect_image_search()
        .with(eq("linen duvet"), eq(8))
        .returning(|_, _| Err(SearchError::Status(503)));
    assert!(search_images(&search, "linen duvet", 8).is_empty());
}

#[test]
fn test_themes_serialize_keyed_by_handle() {
    let mut search = MockSearch::new();
    search.expect_web_search().returning(|_, _| Ok(vec![]));
    let themes = research_themes(&search, &[Channel::AmazonFashion], spring());
    let json = serde_json::to_value(&themes).unwrap();
    assert_eq!(json["@AmazonFashion"][0]["name"], "Spring Edit");
}
