use course_finder::core::listing::ListingState;
use course_finder::core::pagination::PageLink;
use course_finder::core::wizard::WizardTransition;
use course_finder::{CmsClient, FilterKey, ListingView, StepWizard};
use httpmock::prelude::*;

fn universities_body() -> serde_json::Value {
    serde_json::json!({
        "docs": [
            {"id": 1, "name": "Universiti Sains Malaysia"},
            {"id": 2, "name": "Curtin University Malaysia"}
        ]
    })
}

fn courses_body(page: u32, total_pages: u32) -> serde_json::Value {
    serde_json::json!({
        "docs": [
            {
                "id": 101,
                "name": "Master of Business Administration",
                "relatedSchools": {"name": "Universiti Sains Malaysia@Graduate School of Business"},
                "level": "master",
                "currency": "MYR",
                "fee": 42000,
                "durationInMonth": ["24"],
                "intakes": ["2", "9"],
                "locations": ["penang"]
            }
        ],
        "page": page,
        "totalPages": total_pages,
        "totalDocs": 12,
        "hasNextPage": page < total_pages,
        "hasPrevPage": page > 1,
        "limit": 10,
        "nextPage": if page < total_pages { serde_json::json!(page + 1) } else { serde_json::Value::Null }
    })
}

#[tokio::test]
async fn test_wizard_hands_off_to_listing() {
    let server = MockServer::start();

    let universities_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/universities")
            .query_param("depth", "0")
            .query_param("select[name]", "true")
            .query_param("limit", "100");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(universities_body());
    });

    let courses_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/courses")
            .query_param("where[locations][contains]", "penang")
            .query_param("where[level][equals]", "master")
            .query_param("where[intakes][contains]", "9")
            .query_param("depth", "2")
            .query_param("limit", "10")
            .query_param("page", "1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(courses_body(1, 2));
    });

    let client = CmsClient::new(server.url("/api"));

    let mut wizard = StepWizard::new();
    wizard.load_universities(&client).await;
    universities_mock.assert();

    for value in ["penang", "master", "9"] {
        wizard.select_option(value).unwrap();
        wizard.next().unwrap();
    }
    assert_eq!(wizard.options().len(), 2);

    let url = match wizard.next().unwrap() {
        WizardTransition::Navigate { url } => url,
        other => panic!("expected navigation, got {:?}", other),
    };
    assert_eq!(
        url,
        "/courses?location=penang&level=master&intake=9&university=&page=1"
    );

    let mut view = ListingView::from_url(&url).unwrap();
    assert_eq!(view.filters().university, None);
    view.load(&client).await;
    courses_mock.assert();

    let cards = view.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].university, "Universiti Sains Malaysia");
    assert_eq!(cards[0].fee, "RM42,000");
    assert_eq!(view.result_count_line(), "共找到 12 个结果");
    assert_eq!(
        view.page_links(),
        vec![
            PageLink::Page { number: 1, active: true },
            PageLink::Page { number: 2, active: false },
        ]
    );
}

#[tokio::test]
async fn test_page_navigation_refetches_with_same_filters() {
    let server = MockServer::start();

    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/api/courses")
            .query_param("where[level][equals]", "master")
            .query_param("page", "1");
        then.status(200).json_body(courses_body(1, 2));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/api/courses")
            .query_param("where[level][equals]", "master")
            .query_param("page", "2");
        then.status(200).json_body(courses_body(2, 2));
    });

    let client = CmsClient::new(server.url("/api"));
    let mut view = ListingView::from_url("/courses?level=master&page=1").unwrap();
    view.load(&client).await;

    let url = view.next_page().unwrap().expect("second page exists");
    assert_eq!(url, "/courses?level=master&page=2");
    view.load(&client).await;

    first.assert();
    second.assert();
    assert_eq!(view.loaded_page().unwrap().page, 2);
    assert_eq!(view.next_page().unwrap(), None);
}

#[tokio::test]
async fn test_out_of_range_page_falls_back_to_last_page() {
    let server = MockServer::start();

    let too_far = server.mock(|when, then| {
        when.method(GET)
            .path("/api/courses")
            .query_param("where[intakes][contains]", "9")
            .query_param("page", "9");
        then.status(200).json_body(courses_body(9, 2));
    });
    let last = server.mock(|when, then| {
        when.method(GET)
            .path("/api/courses")
            .query_param("where[intakes][contains]", "9")
            .query_param("page", "2");
        then.status(200).json_body(courses_body(2, 2));
    });

    let client = CmsClient::new(server.url("/api"));
    let mut view = ListingView::from_url("/courses?intake=9&page=9").unwrap();
    view.load_clamped(&client).await.unwrap();

    too_far.assert();
    last.assert();
    assert_eq!(view.current_page(), 2);
    assert_eq!(view.url(), "/courses?intake=9&page=2");
    assert_eq!(view.loaded_page().unwrap().page, 2);
}

#[tokio::test]
async fn test_filter_change_fetches_first_page() {
    let server = MockServer::start();

    let filtered = server.mock(|when, then| {
        when.method(GET)
            .path("/api/courses")
            .query_param("where[locations][contains]", "johor")
            .query_param("where[relatedSchools.relatedUniversities.id][equals]", "2")
            .query_param("page", "1");
        then.status(200).json_body(courses_body(1, 1));
    });

    let client = CmsClient::new(server.url("/api"));
    let mut view = ListingView::from_url("/courses?location=johor&page=3").unwrap();
    let url = view.update_filter(FilterKey::University, "2").unwrap();
    assert_eq!(url, "/courses?location=johor&university=2&page=1");

    view.load(&client).await;
    filtered.assert();
    assert!(view.page_links().is_empty());
}

#[tokio::test]
async fn test_server_error_leaves_view_loading() {
    let server = MockServer::start();
    let failing = server.mock(|when, then| {
        when.method(GET).path("/api/courses");
        then.status(500);
    });

    let client = CmsClient::new(server.url("/api"));
    let mut view = ListingView::from_url("/courses").unwrap();
    view.load(&client).await;

    failing.assert();
    assert_eq!(view.state(), &ListingState::Loading);
    assert!(view.cards().is_empty());
    assert_eq!(view.result_count_line(), "共找到 0 个结果");
}
