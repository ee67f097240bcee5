use crate::leads::record::COLUMNS;
use crate::tests::utils::{body_string, export_csv, get, post, start_session, test_app};

#[test]
fn empty_table_exports_header_only() {
    let app = test_app();
    let cookie = start_session(&app);

    let resp = get(&app, "/export.csv", Some(&cookie));

    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("Content-Type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert_eq!(
        resp.headers().get("Content-Disposition").unwrap(),
        "attachment; filename=\"leads_full.csv\""
    );
    assert_eq!(body_string(resp), format!("{}\n", COLUMNS.join(",")));
}

#[test]
fn export_keeps_origin_of_each_search() {
    let app = test_app();
    let cookie = start_session(&app);

    post(
        &app,
        "/search/nearby",
        &[("lat", "42.6977"), ("lng", "23.3219"), ("radius", "1500"), ("append", "on")],
        Some(&cookie),
    );
    post(
        &app,
        "/search/text",
        &[("query", "florist"), ("append", "on")],
        Some(&cookie),
    );

    let csv = export_csv(&app, &cookie);
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let origins: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[COLUMNS.len() - 1].to_string())
        .collect();

    assert_eq!(
        origins,
        vec!["Nearby@42.6977,23.3219", "Nearby@42.6977,23.3219", "Text:florist"]
    );
}

#[test]
fn repeated_search_does_not_duplicate_rows() {
    let app = test_app();
    let cookie = start_session(&app);

    for _ in 0..2 {
        post(
            &app,
            "/search/text",
            &[("query", "florist"), ("append", "on")],
            Some(&cookie),
        );
    }

    assert_eq!(export_csv(&app, &cookie).lines().count(), 2);
}

#[test]
fn xlsx_download_has_spreadsheet_type() {
    let app = test_app();
    let cookie = start_session(&app);

    let resp = get(&app, "/export.xlsx", Some(&cookie));

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[test]
fn sessions_do_not_share_tables() {
    let app = test_app();
    let alice = start_session(&app);
    let bob = start_session(&app);

    post(&app, "/search/text", &[("query", "florist")], Some(&alice));

    assert_eq!(export_csv(&app, &alice).lines().count(), 2);
    assert_eq!(export_csv(&app, &bob).lines().count(), 1);
}
