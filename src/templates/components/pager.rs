use maud::{html, Markup};

pub fn pager(page: usize, total_pages: usize, page_size: usize) -> Markup {
    html! {
        nav class="pager" {
            @if page > 1 {
                a href=(format!("/?page={}&page_size={}", page - 1, page_size)) { "← Prev" }
            }
            span { "Page " (page) " of " (total_pages) }
            @if page < total_pages {
                a href=(format!("/?page={}&page_size={}", page + 1, page_size)) { "Next →" }
            }
            form method="get" action="/" class="inline" {
                input type="hidden" name="page" value="1";
                label for="page_size" { "Rows per page" }
                select name="page_size" id="page_size" onchange="this.form.submit()" {
                    @for size in (10..=200).step_by(10) {
                        option value=(size) selected[size == page_size] { (size) }
                    }
                }
            }
        }
    }
}
