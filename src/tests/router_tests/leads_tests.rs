use crate::tests::utils::{
    body_string, export_csv, gated_app, get, post, start_session, test_app,
};

fn seeded_session(app: &crate::app::App) -> String {
    let cookie = start_session(app);
    post(
        app,
        "/search/nearby",
        &[("lat", "42.6977"), ("lng", "23.3219"), ("append", "on")],
        Some(&cookie),
    );
    cookie
}

#[test]
fn crm_edit_is_exported() {
    let app = test_app();
    let cookie = seeded_session(&app);

    post(
        &app,
        "/leads/update",
        &[
            ("place_id", "near-2"),
            ("status", "interested"),
            ("owner", "Maria"),
            ("notes", "wants a demo, Tuesday"),
        ],
        Some(&cookie),
    );

    let csv = export_csv(&app, &cookie);
    let row = csv.lines().find(|l| l.starts_with("near-2")).unwrap();
    assert!(row.contains("interested"));
    assert!(row.contains("Maria"));
    assert!(row.contains("\"wants a demo, Tuesday\""));
}

#[test]
fn update_without_place_id_shows_error() {
    let app = test_app();
    let cookie = seeded_session(&app);

    post(&app, "/leads/update", &[("status", "x")], Some(&cookie));

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("missing place_id"));
}

#[test]
fn details_then_email_enrichment_fill_columns() {
    let app = test_app();
    let cookie = seeded_session(&app);

    post(&app, "/enrich/details", &[("max_rows", "200")], Some(&cookie));
    post(
        &app,
        "/enrich/emails",
        &[("max_rows", "50"), ("max_pages", "1")],
        Some(&cookie),
    );

    let csv = export_csv(&app, &cookie);
    assert!(csv.contains("+359 2 555 0101"));
    assert!(csv.contains("near-1.example.bg"));
    assert!(csv.contains("hello@example.bg"));

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("found emails for 2 of 2 websites crawled"));
}

#[test]
fn enrichment_on_empty_table_is_a_no_op() {
    let app = test_app();
    let cookie = start_session(&app);

    post(&app, "/enrich/emails", &[], Some(&cookie));

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("Nothing to enrich yet."));
}

#[test]
fn clear_empties_the_table() {
    let app = test_app();
    let cookie = seeded_session(&app);

    post(&app, "/leads/clear", &[], Some(&cookie));

    assert_eq!(export_csv(&app, &cookie).lines().count(), 1);
}

#[test]
fn unknown_route_is_404() {
    let app = test_app();
    let resp = get(&app, "/nope", None);
    assert_eq!(resp.status(), 404);
}

#[test]
fn results_page_paginates() {
    let app = test_app();
    let cookie = start_session(&app);
    let subregions: Vec<String> = (1..=25).map(|i| format!("Block {i}")).collect();
    post(
        &app,
        "/search/batch",
        &[("city", "Varna"), ("subregions", &subregions.join("\n"))],
        Some(&cookie),
    );

    let page = body_string(get(&app, "/?page=2&page_size=10", Some(&cookie)));
    assert!(page.contains("Page 2 of 3"));
    assert!(page.contains("Block 11"));
    assert!(!page.contains("Block 21,"));
}

#[test]
fn crm_edit_during_details_enrichment_is_kept() {
    let (app, gate) = gated_app();
    let cookie = seeded_session(&app);

    std::thread::scope(|s| {
        let enrich = s.spawn(|| {
            post(&app, "/enrich/details", &[], Some(&cookie));
        });

        gate.entered.recv().unwrap();
        post(
            &app,
            "/leads/update",
            &[("place_id", "near-2"), ("status", "won")],
            Some(&cookie),
        );
        gate.release.send(()).unwrap();

        enrich.join().unwrap();
    });

    let csv = export_csv(&app, &cookie);
    let row = csv.lines().find(|l| l.starts_with("near-2")).unwrap();
    assert!(row.contains("won"));
    assert!(row.contains("+359 2 555 0101"));
}

#[test]
fn clear_during_details_enrichment_stays_cleared() {
    let (app, gate) = gated_app();
    let cookie = seeded_session(&app);

    std::thread::scope(|s| {
        let enrich = s.spawn(|| {
            post(&app, "/enrich/details", &[], Some(&cookie));
        });

        gate.entered.recv().unwrap();
        post(&app, "/leads/clear", &[], Some(&cookie));
        gate.release.send(()).unwrap();

        enrich.join().unwrap();
    });

    let csv = export_csv(&app, &cookie);
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn email_enrichment_skips_rows_without_website() {
    let app = test_app();
    let cookie = seeded_session(&app);

    post(&app, "/enrich/emails", &[], Some(&cookie));

    let page = body_string(get(&app, "/", Some(&cookie)));
    assert!(page.contains("No rows with a website and no email to crawl."));
}
