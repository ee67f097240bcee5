use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.shell { display: grid; grid-template-columns: 320px 1fr; gap: 1.5rem; padding: 1.5rem; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.card h3 { margin-top: 0; }
label { display: block; font-size: 0.85rem; margin-top: 0.5rem; }
input, select, textarea { width: 100%; box-sizing: border-box; padding: 4px; }
input[type=checkbox] { width: auto; }
.btn { margin-top: 0.75rem; padding: 6px 14px; background: #524ed2; color: white; border: none; border-radius: 4px; cursor: pointer; }
.notice { padding: 0.6rem 1rem; border-radius: 6px; margin-bottom: 0.5rem; }
.notice-success { background: #d1fae5; }
.notice-info { background: #dbeafe; }
.notice-warning { background: #fef3c7; }
.notice-error { background: #fee2e2; }
table.leads { border-collapse: collapse; width: 100%; font-size: 0.85em; }
table.leads th, table.leads td { border-bottom: 1px solid #f3f4f6; padding: 4px 6px; text-align: left; vertical-align: top; }
table.leads input { min-width: 6rem; }
.pager { display: flex; gap: 1rem; align-items: center; margin: 0.75rem 0; }
.pager form.inline { display: flex; gap: 0.5rem; align-items: center; }
.pager select { width: auto; }
footer { padding: 1rem 1.5rem; font-size: 0.8em; color: #6b7280; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "Local Lead Finder (Google Places)" }
                    nav {
                        ul {
                            li { a href="/" { "Results" } }
                            li { a href="/export.csv" { "Export CSV" } }
                            li { a href="/export.xlsx" { "Export XLSX" } }
                        }
                    }
                }
                (content)
                footer {
                    "Attribution: © Google. Data shown is provided by Google and used under the Maps Platform Terms. "
                    "Full export is for private/internal use only."
                }
            }
        }
    }
}
