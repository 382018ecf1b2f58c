use std::sync::Arc;

use mealdb_engine::{EngineConfig, EngineError, FeedAggregator, MealDbClient};

fn meal_json(id: &str, name: &str) -> String {
    format!(
        r#"{{
            "idMeal": "{id}",
            "strMeal": "{name}",
            "strMealThumb": "https://example.com/{id}.jpg",
            "strCategory": "Beef",
            "strArea": "British",
            "strInstructions": "Cook it.",
            "strIngredient1": "beef",
            "strMeasure1": "1 lb"
        }}"#
    )
}

fn meals_body(records: &[String]) -> String {
    format!(r#"{{"meals": [{}]}}"#, records.join(","))
}

const CATEGORIES_BODY: &str = r#"
{
    "categories": [
        {
            "strCategory": "Beef",
            "strCategoryThumb": "https://example.com/beef.png",
            "strCategoryDescription": "Beef dishes"
        },
        {
            "strCategory": "Dessert",
            "strCategoryThumb": "https://example.com/dessert.png",
            "strCategoryDescription": "Dessert dishes"
        }
    ]
}
"#;

fn aggregator(server: &mockito::Server, random_batch: usize) -> FeedAggregator {
    let config = EngineConfig {
        random_batch,
        ..EngineConfig::default()
    };
    let client = MealDbClient::with_base_url(server.url());
    FeedAggregator::new(Arc::new(client), &config)
}

#[tokio::test]
async fn test_feed_bundle_loads_concurrently() {
    let mut server = mockito::Server::new_async().await;

    let _m1 = server
        .mock("GET", "/categories.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATEGORIES_BODY)
        .create_async()
        .await;

    // three batch draws plus the featured draw
    let m2 = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(meals_body(&[meal_json("52874", "Beef and Mustard Pie")]))
        .expect(4)
        .create_async()
        .await;

    let feed = aggregator(&server, 3).load_feed().await.unwrap();
    m2.assert_async().await;

    assert_eq!(feed.categories.len(), 2);
    assert_eq!(feed.categories[0].id, 1);
    assert_eq!(feed.categories[0].name, "Beef");
    assert_eq!(feed.categories[1].id, 2);

    assert_eq!(feed.recipes.len(), 3);
    assert_eq!(feed.recipes[0].title, "Beef and Mustard Pie");
    assert_eq!(feed.featured.unwrap().id, "52874");
}

#[tokio::test]
async fn test_feed_fails_when_any_fetch_fails() {
    let mut server = mockito::Server::new_async().await;

    let _m1 = server
        .mock("GET", "/categories.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATEGORIES_BODY)
        .create_async()
        .await;

    let _m2 = server
        .mock("GET", "/random.php")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let error = aggregator(&server, 3).load_feed().await.unwrap_err();
    assert!(matches!(error, EngineError::Network(_)));
}

#[tokio::test]
async fn test_feed_rejects_malformed_random_payload() {
    let mut server = mockito::Server::new_async().await;

    let _m1 = server
        .mock("GET", "/categories.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATEGORIES_BODY)
        .create_async()
        .await;

    let _m2 = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>maintenance page</html>")
        .create_async()
        .await;

    let error = aggregator(&server, 2).load_feed().await.unwrap_err();
    match error {
        EngineError::MalformedResponse { endpoint, .. } => {
            assert_eq!(endpoint, "random.php");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_category_feed_drops_unusable_records() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/filter.php?c=Beef")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(meals_body(&[
            meal_json("1", "Stew"),
            // no usable title, dropped during normalization
            r#"{"idMeal": "2", "strMeal": ""}"#.to_string(),
            meal_json("3", "Brisket"),
        ]))
        .create_async()
        .await;

    let recipes = aggregator(&server, 3)
        .load_category_feed("Beef")
        .await
        .unwrap();

    let titles: Vec<_> = recipes.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Stew", "Brisket"]);
}

#[tokio::test]
async fn test_category_feed_propagates_failure() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/filter.php?c=Beef")
        .with_status(500)
        .with_body("nope")
        .create_async()
        .await;

    let result = aggregator(&server, 3).load_category_feed("Beef").await;
    assert!(result.is_err());
}
