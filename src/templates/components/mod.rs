use maud::{html, Markup};

pub mod notice;
pub mod pager;

pub use notice::{notice_list, Notice};
pub use pager::pager;

pub fn button(label: &str) -> Markup {
    html! {
        button type="submit" class="btn" { (label) }
    }
}

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
