use crate::tests::utils::{
    app_with, body_string, export_csv, get, post, session_cookie, start_session, test_app,
    FakePlaces,
};

#[test]
fn first_visit_sets_session_cookie() {
    let app = test_app();

    let resp = get(&app, "/", None);

    assert_eq!(resp.status(), 200);
    assert!(session_cookie(&resp).starts_with("lead_session="));
    assert!(body_string(resp).contains("run a single search or a City + Subregions batch"));
}

#[test]
fn search_redirects_home_and_shows_notice() {
    let app = test_app();
    let cookie = start_session(&app);

    let resp = post(
        &app,
        "/search/text",
        &[("query", "bakery in Lozenets"), ("append", "on")],
        Some(&cookie),
    );

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap().to_str().unwrap(), "/");

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Now tracking 1 unique places."));
    assert!(page.contains("Text:bakery in Lozenets"));

    // notices are shown once
    let again = body_string(get(&app, "/", Some(&cookie)));
    assert!(!again.contains("Now tracking"));
}

#[test]
fn batch_survives_one_failed_subregion() {
    let places = FakePlaces {
        fail_on: Some("District 4,".into()),
    };
    let app = app_with(places, Some("test-key"));
    let cookie = start_session(&app);
    let subregions: Vec<String> = (1..=10).map(|i| format!("District {i}")).collect();
    let subregions = subregions.join("\n");

    post(
        &app,
        "/search/batch",
        &[
            ("city", "Sofia"),
            ("subregions", &subregions),
            ("keyword", "cafe"),
        ],
        Some(&cookie),
    );

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Error searching"));
    assert!(page.contains("District 4"));
    assert!(page.contains("9 of 10 queries succeeded"));

    let csv = export_csv(&app, &cookie);
    assert_eq!(csv.lines().count(), 1 + 9);
    assert!(csv.contains("Sofia > District 1"));
}

#[test]
fn batch_without_subregions_warns() {
    let app = test_app();
    let cookie = start_session(&app);

    post(
        &app,
        "/search/batch",
        &[("city", "Sofia"), ("subregions", "  \n ")],
        Some(&cookie),
    );

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Please provide a City and at least one Subregion."));
}

#[test]
fn missing_api_key_is_reported_not_fatal() {
    let app = app_with(FakePlaces::default(), None);
    let cookie = start_session(&app);

    let resp = post(&app, "/search/text", &[("query", "pizza")], Some(&cookie));
    assert_eq!(resp.status(), 303);

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Please enter your Google API key."));
}

#[test]
fn key_saved_in_session_is_used_for_searches() {
    let app = app_with(FakePlaces::default(), None);
    let cookie = start_session(&app);

    post(&app, "/settings/key", &[("api_key", "my-key")], Some(&cookie));
    post(&app, "/search/text", &[("query", "pizza")], Some(&cookie));

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Now tracking 1 unique places."));
}

#[test]
fn search_without_append_replaces_results() {
    let app = test_app();
    let cookie = start_session(&app);

    post(
        &app,
        "/search/nearby",
        &[("lat", "42.6977"), ("lng", "23.3219"), ("append", "on")],
        Some(&cookie),
    );
    post(&app, "/search/text", &[("query", "pizza")], Some(&cookie));

    let csv = export_csv(&app, &cookie);
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Text:pizza"));
    assert!(!csv.contains("Nearby@"));
}

#[test]
fn invalid_number_is_shown_as_error() {
    let app = test_app();
    let cookie = start_session(&app);

    post(&app, "/search/nearby", &[("lat", "north")], Some(&cookie));

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Invalid lat"));
}
