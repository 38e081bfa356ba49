//! PageFrame: root wrapper for settings pages.
//!
//! Sets `id` to `"{entity}--{category}"` (e.g. `"extra_fields_filament--list"`)
//! and `data-page-category` on the root element, so a DOM id copied from the
//! inspector leads back to the page component.

use leptos::prelude::*;

/// Table of records
pub const PAGE_CAT_LIST: &str = "list";

/// Build a page id in the `{entity}--{category}` format
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{entity}--{category}")
}

#[component]
pub fn PageFrame(
    /// HTML id built with [`page_id`]
    #[prop(into)]
    page_id: String,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div id=page_id class="page" data-page-category=category>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id() {
        assert_eq!(page_id("extra_fields_spool", PAGE_CAT_LIST), "extra_fields_spool--list");
    }
}
