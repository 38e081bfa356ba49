use crate::domain::a001_extra_field::ui::list::ExtraFieldsPage;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

/// Landing page of the settings section
const DEFAULT_PATH: &str = "/settings/extra/spool";

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <main class="app-main">
                <Routes fallback=|| view! { <Redirect path=DEFAULT_PATH /> }>
                    <Route path=path!("/settings/extra/:entity_type") view=ExtraFieldsPage />
                </Routes>
            </main>
        </Router>
    }
}
