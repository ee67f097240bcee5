// templates/pages/home.rs

use crate::leads::query::{DEFAULT_CITY, DEFAULT_SUBREGIONS};
use crate::leads::{LeadRecord, Page};
use crate::templates::components::{button, card, notice_list, pager, Notice};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct HomeVm<'a> {
    pub notices: &'a [Notice],
    pub has_api_key: bool,
    pub total: usize,
    pub page: Page<'a>,
    pub page_size: usize,
}

pub fn home_page(vm: &HomeVm) -> Markup {
    desktop_layout(
        "Local Lead Finder",
        html! {
            div class="shell" {
                aside {
                    (api_key_card(vm.has_api_key))
                    (nearby_card())
                    (text_card())
                    (batch_card())
                }
                main {
                    (notice_list(vm.notices))

                    @if vm.total == 0 {
                        div class="notice notice-info" {
                            "Add your API key and run a single search or a City + Subregions batch."
                        }
                    } @else {
                        h2 { "Results (" (vm.total) " unique places)" }
                        (pager(vm.page.page, vm.page.total_pages, vm.page_size))
                        (results_table(vm.page.rows, vm.page.offset))
                        (enrich_cards())
                        (export_card())
                    }
                }
            }
        },
    )
}

fn api_key_card(has_key: bool) -> Markup {
    card(
        "API key",
        html! {
            form method="post" action="/settings/key" {
                label for="api_key" { "Google API Key" }
                input
                    type="password"
                    id="api_key"
                    name="api_key"
                    autocomplete="off"
                    placeholder=(if has_key { "Key saved for this session" } else { "" });
                (button("Save key"))
            }
        },
    )
}

fn append_toggle() -> Markup {
    html! {
        label {
            input type="checkbox" name="append" checked;
            " Append to existing results"
        }
    }
}

fn nearby_card() -> Markup {
    card(
        "Nearby search",
        html! {
            form method="post" action="/search/nearby" {
                label for="lat" { "Latitude" }
                input type="number" step="0.000001" id="lat" name="lat" value="42.6977";
                label for="lng" { "Longitude" }
                input type="number" step="0.000001" id="lng" name="lng" value="23.3219";
                label for="radius" { "Radius (meters)" }
                input type="number" min="100" max="50000" id="radius" name="radius" value="3000";
                label for="keyword" { "Keyword (optional)" }
                input type="text" id="keyword" name="keyword" value="restaurant";
                label for="place_type" { "Place type (optional)" }
                input type="text" id="place_type" name="place_type";
                (append_toggle())
                (button("Run nearby search"))
            }
        },
    )
}

fn text_card() -> Markup {
    card(
        "Text search",
        html! {
            form method="post" action="/search/text" {
                label for="query" { "Query" }
                input type="text" id="query" name="query" value="restaurants near Sredets, Sofia";
                label for="bias_lat" { "Bias latitude (optional)" }
                input type="number" step="0.000001" id="bias_lat" name="bias_lat" value="0";
                label for="bias_lng" { "Bias longitude (optional)" }
                input type="number" step="0.000001" id="bias_lng" name="bias_lng" value="0";
                label for="bias_radius" { "Bias radius (meters, 0 to omit)" }
                input type="number" min="0" max="50000" id="bias_radius" name="bias_radius" value="0";
                (append_toggle())
                (button("Run text search"))
            }
        },
    )
}

fn batch_card() -> Markup {
    card(
        "Batch: City + Subregions",
        html! {
            p class="microcopy" {
                "Runs '<keyword> near <Subregion>, <City>' for each subregion and merges the results."
            }
            form method="post" action="/search/batch" {
                label for="city" { "City" }
                input type="text" id="city" name="city" value=(DEFAULT_CITY);
                label for="subregions" { "Subregions (one per line)" }
                textarea id="subregions" name="subregions" rows="10" {
                    (DEFAULT_SUBREGIONS.join("\n"))
                }
                label for="batch_keyword" { "Batch keyword (optional)" }
                input type="text" id="batch_keyword" name="keyword" value="restaurant";
                (button("Run batch"))
            }
        },
    )
}

fn edit_input(form_id: &str, name: &str, value: &str) -> Markup {
    html! {
        input type="text" form=(form_id) name=(name) value=(value);
    }
}

/// Only http(s) websites are rendered as links.
fn web_link(website: &str) -> Option<&str> {
    let lower = website.trim().to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then_some(website.trim())
}

fn results_table(rows: &[LeadRecord], offset: usize) -> Markup {
    html! {
        div style="overflow-x: auto;" {
            table class="leads" {
                thead {
                    tr {
                        th { "#" }
                        th { "Name" }
                        th { "Address" }
                        th { "Phone" }
                        th { "Website" }
                        th { "Email" }
                        th { "Rating" }
                        th { "Types" }
                        th { "Status" }
                        th { "Contact" }
                        th { "Owner" }
                        th { "Deal value" }
                        th { "Last contacted" }
                        th { "Notes" }
                        th { "Search origin" }
                        th {}
                    }
                }
                tbody {
                    @for (i, row) in rows.iter().enumerate() {
                        @let form_id = format!("edit-{}", offset + i);
                        tr {
                            td { (offset + i + 1) }
                            td { (row.name) }
                            td { (row.address) }
                            td { (row.phone) }
                            td {
                                @if let Some(href) = web_link(&row.website) {
                                    a href=(href) target="_blank" rel="noopener" { (row.website) }
                                } @else {
                                    (row.website)
                                }
                            }
                            td { (edit_input(&form_id, "email", &row.email)) }
                            td { @if let Some(r) = row.rating { (format!("{r:.1}")) } }
                            td { (row.types) }
                            td { (edit_input(&form_id, "status", &row.status)) }
                            td { (edit_input(&form_id, "contact_name", &row.contact_name)) }
                            td { (edit_input(&form_id, "owner", &row.owner)) }
                            td { (edit_input(&form_id, "deal_value", &row.deal_value)) }
                            td { (edit_input(&form_id, "last_contacted", &row.last_contacted)) }
                            td { (edit_input(&form_id, "notes", &row.notes)) }
                            td { (row.search_origin) }
                            td {
                                form id=(form_id) method="post" action="/leads/update" {
                                    input type="hidden" name="place_id" value=(row.place_id);
                                    button type="submit" { "Save" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn enrich_cards() -> Markup {
    html! {
        (card(
            "Details (address, phone, website)",
            html! {
                p class="microcopy" { "Fetches Place Details for the first N rows (uses additional API calls)." }
                form method="post" action="/enrich/details" {
                    label for="details_max_rows" { "Max rows to enrich" }
                    input type="number" min="10" max="2000" step="10" id="details_max_rows" name="max_rows" value="200";
                    (button("Fetch address, phone & website"))
                }
            },
        ))
        (card(
            "Email enrichment (website crawler)",
            html! {
                p class="microcopy" { "Crawls each website (limited pages) and extracts email addresses." }
                form method="post" action="/enrich/emails" {
                    label for="email_max_rows" { "Max rows to process" }
                    input type="number" min="10" max="500" step="10" id="email_max_rows" name="max_rows" value="50";
                    label for="max_pages" { "Max pages per site" }
                    input type="number" min="1" max="10" id="max_pages" name="max_pages" value="3";
                    (button("Fetch emails from websites"))
                }
            },
        ))
    }
}

fn export_card() -> Markup {
    card(
        "Export (all columns)",
        html! {
            p {
                a href="/export.csv" { "⬇ Download full CSV" }
                " · "
                a href="/export.xlsx" { "⬇ Download XLSX" }
            }
            form method="post" action="/leads/clear" {
                (button("Clear results"))
            }
        },
    )
}
