use crate::config::NoteConfig;
use crate::pages::ProfilePage;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: NoteConfig) -> impl IntoView {
    provide_context(config);

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("profile/:id") view=ProfilePage />
                <Route path=path!("") view=|| view! { <Redirect path="/profile/1" /> } />
            </Routes>
        </Router>
    }
}
