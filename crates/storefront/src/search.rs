//! Multi-category search.
//!
//! A query is a comma-separated list of category terms (possibly the
//! output of the search assistant). Each term is looked up
//! concurrently; a failed or empty lookup lands the term in
//! `not_found` without affecting its siblings, and groups come back in
//! the order the terms were asked for.

use std::collections::HashMap;
use std::future::Future;

use serde::Serialize;
use sqlx::PgPool;
use tokio::task::JoinSet;

use quickcart_core::Product;

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;

/// Products found for a single category term.
#[derive(Debug, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub products: Vec<Product>,
}

/// The full response for a search request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The comma-separated term list that was actually searched.
    pub query: String,
    /// The raw text the user typed, when the assistant rewrote it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
    pub found: Vec<CategoryGroup>,
    pub not_found: Vec<String>,
}

/// Split a raw query into lowercase category terms.
///
/// Empty fragments (doubled commas, trailing commas, whitespace-only
/// input) are dropped; duplicates are kept first-occurrence only.
#[must_use]
pub fn parse_terms(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    for fragment in query.split(',') {
        let term = fragment.trim().to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Look up every term concurrently and partition into found/not-found.
///
/// Lookups run independently; an individual database error is logged
/// and treated as not-found for that term only.
pub async fn search_categories(pool: &PgPool, terms: Vec<String>) -> Vec<(String, Vec<Product>)> {
    let pool = pool.clone();
    settle_lookups(terms, move |term| {
        let pool = pool.clone();
        async move { ProductRepository::new(&pool).by_category(&term).await }
    })
    .await
}

/// The settle-all loop, generic over the per-term lookup.
async fn settle_lookups<F, Fut>(terms: Vec<String>, lookup: F) -> Vec<(String, Vec<Product>)>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<Product>, RepositoryError>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, term) in terms.iter().cloned().enumerate() {
        let fut = lookup(term.clone());
        tasks.spawn(async move { (index, term, fut.await) });
    }

    let mut by_index: HashMap<usize, (String, Vec<Product>)> = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, term, Ok(products))) => {
                by_index.insert(index, (term, products));
            }
            Ok((index, term, Err(e))) => {
                tracing::warn!(category = %term, error = %e, "category lookup failed");
                by_index.insert(index, (term, Vec::new()));
            }
            Err(e) => {
                // A panicked lookup task; the term it carried is lost,
                // so it simply drops out of the response.
                tracing::error!(error = %e, "category lookup task panicked");
            }
        }
    }

    (0..terms.len())
        .filter_map(|index| by_index.remove(&index))
        .collect()
}

/// Assemble the response, splitting empty results into `not_found`.
#[must_use]
pub fn build_response(
    query: String,
    original_query: Option<String>,
    groups: Vec<(String, Vec<Product>)>,
) -> SearchResponse {
    let mut found = Vec::new();
    let mut not_found = Vec::new();
    for (category, products) in groups {
        if products.is_empty() {
            not_found.push(category);
        } else {
            found.push(CategoryGroup { category, products });
        }
    }
    SearchResponse {
        query,
        original_query,
        found,
        not_found,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terms_splits_and_lowercases() {
        assert_eq!(
            parse_terms("Milk, Bread ,SOAP"),
            vec!["milk", "bread", "soap"]
        );
    }

    #[test]
    fn test_parse_terms_drops_empty_fragments() {
        assert_eq!(parse_terms("milk,,bread,"), vec!["milk", "bread"]);
        assert!(parse_terms("  ,  ,").is_empty());
        assert!(parse_terms("").is_empty());
    }

    #[test]
    fn test_parse_terms_dedupes_first_occurrence() {
        assert_eq!(parse_terms("milk, Milk, bread"), vec!["milk", "bread"]);
    }

    #[test]
    fn test_build_response_partitions_empty_groups() {
        let response = build_response(
            "milk, socks".to_owned(),
            None,
            vec![
                ("milk".to_owned(), vec![sample_product("milk")]),
                ("socks".to_owned(), Vec::new()),
            ],
        );
        assert_eq!(response.found.len(), 1);
        assert_eq!(response.found[0].category, "milk");
        assert_eq!(response.not_found, vec!["socks"]);
    }

    #[tokio::test]
    async fn test_failed_lookup_does_not_cancel_siblings() {
        let terms = vec!["milk".to_owned(), "bread".to_owned(), "soap".to_owned()];
        let groups = settle_lookups(terms, |term| async move {
            match term.as_str() {
                "bread" => Err(RepositoryError::Database(sqlx::Error::PoolClosed)),
                _ => Ok(vec![sample_product(&term)]),
            }
        })
        .await;

        // Requested order preserved; the failed term is an empty group
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, "milk");
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[1].0, "bread");
        assert!(groups[1].1.is_empty());
        assert_eq!(groups[2].0, "soap");
        assert_eq!(groups[2].1.len(), 1);

        // and lands in notFound when the response is assembled
        let response = build_response("milk, bread, soap".to_owned(), None, groups);
        assert_eq!(response.found.len(), 2);
        assert_eq!(response.not_found, vec!["bread"]);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = build_response(
            "milk".to_owned(),
            Some("I want some milk".to_owned()),
            vec![("milk".to_owned(), Vec::new())],
        );
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["originalQuery"], "I want some milk");
        assert_eq!(json["notFound"][0], "milk");
    }

    fn sample_product(category: &str) -> Product {
        Product {
            id: quickcart_core::ProductId::generate(),
            name: "Whole Milk".to_owned(),
            category: category.to_owned(),
            price: "3.50".parse().unwrap(),
            image_url: "https://img.example/milk.png".to_owned(),
            created_at: chrono::Utc::now(),
            is_hot_deal: false,
            is_featured: false,
        }
    }
}
